//! Ticket lookups, door check-in and cancellation.

use chrono::{DateTime, Duration, Utc};
use entity::sea_orm_active_enums::TicketStatus;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::ticket::TicketRepository, error::AppError, model::ticket::Ticket, model::user::User,
};

/// Age after which an unpaid ticket releases its seat.
pub const PENDING_TICKET_TTL_HOURS: i64 = 24;

pub struct TicketService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> TicketService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_mine(&self, user_id: i32) -> Result<Vec<Ticket>, AppError> {
        Ok(TicketRepository::new(self.db).get_for_user(user_id).await?)
    }

    /// Ticket by code, visible to its holder and to admins.
    ///
    /// Other users get 404 so codes cannot be guessed.
    pub async fn get_by_code(&self, code: &str, requester: &User) -> Result<Ticket, AppError> {
        TicketRepository::new(self.db)
            .find_by_code(&code.trim().to_uppercase())
            .await?
            .filter(|ticket| requester.admin || ticket.user_id == requester.id)
            .ok_or_else(|| AppError::NotFound("Ticket not found".to_string()))
    }

    /// Admits the holder of an issued ticket at the door.
    ///
    /// # Returns
    /// - `Ok(Ticket)` - Ticket now checked in
    /// - `Err(AppError::NotFound)` - Unknown code
    /// - `Err(AppError::Conflict)` - Already checked in
    /// - `Err(AppError::BadRequest)` - Ticket is unpaid or cancelled
    pub async fn check_in(&self, code: &str, now: DateTime<Utc>) -> Result<Ticket, AppError> {
        let repo = TicketRepository::new(self.db);

        let ticket = repo
            .find_by_code(&code.trim().to_uppercase())
            .await?
            .ok_or_else(|| AppError::NotFound("Ticket not found".to_string()))?;

        match ticket.status {
            TicketStatus::Issued => {}
            TicketStatus::CheckedIn => {
                return Err(AppError::Conflict(format!(
                    "Ticket {} was already checked in",
                    ticket.code
                )))
            }
            TicketStatus::Pending => {
                return Err(AppError::BadRequest(format!(
                    "Ticket {} has not been paid",
                    ticket.code
                )))
            }
            TicketStatus::Cancelled => {
                return Err(AppError::BadRequest(format!(
                    "Ticket {} is cancelled",
                    ticket.code
                )))
            }
        }

        let checked_in = repo
            .check_in(ticket.id, now)
            .await?
            .ok_or_else(|| AppError::NotFound("Ticket not found".to_string()))?;
        tracing::info!("Checked in ticket {} for event {}", checked_in.code, checked_in.event_id);

        Ok(checked_in)
    }

    /// Cancels a ticket, freeing its seat. Cancelling twice is a no-op.
    pub async fn cancel(&self, ticket_id: i32) -> Result<Ticket, AppError> {
        let repo = TicketRepository::new(self.db);

        let ticket = repo
            .find_by_id(ticket_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ticket not found".to_string()))?;

        match ticket.status {
            TicketStatus::Cancelled => Ok(ticket),
            TicketStatus::CheckedIn => Err(AppError::BadRequest(
                "Checked-in tickets cannot be cancelled".to_string(),
            )),
            TicketStatus::Pending | TicketStatus::Issued => {
                let cancelled = repo
                    .cancel(ticket.id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Ticket not found".to_string()))?;
                tracing::info!("Cancelled ticket {}", cancelled.code);
                Ok(cancelled)
            }
        }
    }

    /// Cancels the pending ticket of an abandoned Stripe checkout.
    pub async fn expire_checkout(&self, session_id: &str) -> Result<(), AppError> {
        let repo = TicketRepository::new(self.db);

        if let Some(ticket) = repo.find_by_session(session_id).await? {
            if ticket.status == TicketStatus::Pending {
                repo.cancel(ticket.id).await?;
                tracing::info!("Cancelled unpaid ticket {}", ticket.id);
            }
        }

        Ok(())
    }

    /// Cancels pending tickets older than the pending TTL.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of tickets cancelled
    pub async fn cancel_stale_pending(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let cutoff = now - Duration::hours(PENDING_TICKET_TTL_HOURS);
        Ok(TicketRepository::new(self.db)
            .cancel_stale_pending(cutoff)
            .await?)
    }
}
