//! Ticket domain model.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::TicketStatus;
use rand::Rng;

use crate::model::ticket::{TicketDto, TicketStatusDto};

const TICKET_CODE_LENGTH: usize = 12;

impl From<TicketStatus> for TicketStatusDto {
    fn from(value: TicketStatus) -> Self {
        match value {
            TicketStatus::Pending => TicketStatusDto::Pending,
            TicketStatus::Issued => TicketStatusDto::Issued,
            TicketStatus::CheckedIn => TicketStatusDto::CheckedIn,
            TicketStatus::Cancelled => TicketStatusDto::Cancelled,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub id: i32,
    pub event_id: i32,
    pub user_id: i32,
    pub code: String,
    pub status: TicketStatus,
    pub amount_paid_cents: i64,
    pub coupon_id: Option<i32>,
    pub stripe_session_id: Option<String>,
    pub qr_url: Option<String>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Ticket {
    pub fn from_entity(entity: entity::ticket::Model) -> Self {
        Self {
            id: entity.id,
            event_id: entity.event_id,
            user_id: entity.user_id,
            code: entity.code,
            status: entity.status,
            amount_paid_cents: entity.amount_paid_cents,
            coupon_id: entity.coupon_id,
            stripe_session_id: entity.stripe_session_id,
            qr_url: entity.qr_url,
            checked_in_at: entity.checked_in_at,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> TicketDto {
        TicketDto {
            id: self.id,
            event_id: self.event_id,
            user_id: self.user_id,
            code: self.code,
            status: self.status.into(),
            amount_paid_cents: self.amount_paid_cents,
            qr_url: self.qr_url,
            checked_in_at: self.checked_in_at,
            created_at: self.created_at,
        }
    }
}

/// Fields of a new ticket.
#[derive(Debug, Clone)]
pub struct CreateTicketParams {
    pub event_id: i32,
    pub user_id: i32,
    pub status: TicketStatus,
    pub amount_paid_cents: i64,
    pub coupon_id: Option<i32>,
}

/// Result of a ticket checkout.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    /// Nothing to pay; the ticket was issued.
    Issued(Ticket),
    /// A pending ticket awaits payment at `checkout_url`.
    PaymentRequired { ticket_id: i32, checkout_url: String },
}

/// Generates a random ticket code from an alphabet without look-alike characters.
pub fn generate_ticket_code() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

    let mut rng = rand::rng();
    (0..TICKET_CODE_LENGTH)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}
