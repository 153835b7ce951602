//! Ticket repository.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::TicketStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::ticket::{generate_ticket_code, CreateTicketParams, Ticket};

pub struct TicketRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TicketRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a ticket with a freshly generated code.
    pub async fn create(&self, params: CreateTicketParams) -> Result<Ticket, DbErr> {
        let entity = entity::ticket::ActiveModel {
            event_id: ActiveValue::Set(params.event_id),
            user_id: ActiveValue::Set(params.user_id),
            code: ActiveValue::Set(generate_ticket_code()),
            status: ActiveValue::Set(params.status),
            amount_paid_cents: ActiveValue::Set(params.amount_paid_cents),
            coupon_id: ActiveValue::Set(params.coupon_id),
            stripe_session_id: ActiveValue::Set(None),
            qr_url: ActiveValue::Set(None),
            checked_in_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Ticket::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Ticket>, DbErr> {
        let entity = entity::prelude::Ticket::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Ticket::from_entity))
    }

    pub async fn find_by_code(&self, code: &str) -> Result<Option<Ticket>, DbErr> {
        let entity = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::Code.eq(code))
            .one(self.db)
            .await?;

        Ok(entity.map(Ticket::from_entity))
    }

    pub async fn find_by_session(&self, session_id: &str) -> Result<Option<Ticket>, DbErr> {
        let entity = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::StripeSessionId.eq(session_id))
            .one(self.db)
            .await?;

        Ok(entity.map(Ticket::from_entity))
    }

    /// Whether the user holds an issued or checked-in ticket for the event.
    pub async fn user_has_live_ticket(&self, event_id: i32, user_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::EventId.eq(event_id))
            .filter(entity::ticket::Column::UserId.eq(user_id))
            .filter(
                entity::ticket::Column::Status
                    .is_in([TicketStatus::Issued, TicketStatus::CheckedIn]),
            )
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Cancels the user's unpaid tickets for the event, releasing their seats.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of tickets cancelled
    pub async fn cancel_pending_for_user(&self, event_id: i32, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Ticket::update_many()
            .set(entity::ticket::ActiveModel {
                status: ActiveValue::Set(TicketStatus::Cancelled),
                ..Default::default()
            })
            .filter(entity::ticket::Column::EventId.eq(event_id))
            .filter(entity::ticket::Column::UserId.eq(user_id))
            .filter(entity::ticket::Column::Status.eq(TicketStatus::Pending))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn count_pending_for_user(&self, event_id: i32, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::EventId.eq(event_id))
            .filter(entity::ticket::Column::UserId.eq(user_id))
            .filter(entity::ticket::Column::Status.eq(TicketStatus::Pending))
            .count(self.db)
            .await
    }

    /// Tickets of a user, newest first.
    pub async fn get_for_user(&self, user_id: i32) -> Result<Vec<Ticket>, DbErr> {
        let tickets = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::UserId.eq(user_id))
            .order_by_desc(entity::ticket::Column::CreatedAt)
            .order_by_desc(entity::ticket::Column::Id)
            .all(self.db)
            .await?;

        Ok(tickets.into_iter().map(Ticket::from_entity).collect())
    }

    pub async fn set_stripe_session(&self, id: i32, session_id: String) -> Result<(), DbErr> {
        entity::prelude::Ticket::update_many()
            .set(entity::ticket::ActiveModel {
                stripe_session_id: ActiveValue::Set(Some(session_id)),
                ..Default::default()
            })
            .filter(entity::ticket::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn set_qr_url(&self, id: i32, qr_url: String) -> Result<(), DbErr> {
        entity::prelude::Ticket::update_many()
            .set(entity::ticket::ActiveModel {
                qr_url: ActiveValue::Set(Some(qr_url)),
                ..Default::default()
            })
            .filter(entity::ticket::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Moves a pending or cancelled ticket to issued with the amount actually paid.
    ///
    /// The status check is part of the update, so of two concurrent calls only one
    /// issues the ticket.
    ///
    /// # Returns
    /// - `Ok(Some(Ticket))` - The ticket was issued by this call
    /// - `Ok(None)` - Unknown ticket, or it was already issued or checked in
    pub async fn issue(&self, id: i32, amount_paid_cents: i64) -> Result<Option<Ticket>, DbErr> {
        let result = entity::prelude::Ticket::update_many()
            .set(entity::ticket::ActiveModel {
                status: ActiveValue::Set(TicketStatus::Issued),
                amount_paid_cents: ActiveValue::Set(amount_paid_cents),
                ..Default::default()
            })
            .filter(entity::ticket::Column::Id.eq(id))
            .filter(
                entity::ticket::Column::Status
                    .is_in([TicketStatus::Pending, TicketStatus::Cancelled]),
            )
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    pub async fn check_in(&self, id: i32, at: DateTime<Utc>) -> Result<Option<Ticket>, DbErr> {
        let Some(entity) = entity::prelude::Ticket::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::ticket::ActiveModel = entity.into();
        active.status = ActiveValue::Set(TicketStatus::CheckedIn);
        active.checked_in_at = ActiveValue::Set(Some(at));
        let entity = active.update(self.db).await?;

        Ok(Some(Ticket::from_entity(entity)))
    }

    pub async fn cancel(&self, id: i32) -> Result<Option<Ticket>, DbErr> {
        let Some(entity) = entity::prelude::Ticket::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::ticket::ActiveModel = entity.into();
        active.status = ActiveValue::Set(TicketStatus::Cancelled);
        let entity = active.update(self.db).await?;

        Ok(Some(Ticket::from_entity(entity)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Ticket::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    /// Cancels pending tickets created before `cutoff`.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of tickets cancelled
    pub async fn cancel_stale_pending(&self, cutoff: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::Ticket::update_many()
            .set(entity::ticket::ActiveModel {
                status: ActiveValue::Set(TicketStatus::Cancelled),
                ..Default::default()
            })
            .filter(entity::ticket::Column::Status.eq(TicketStatus::Pending))
            .filter(entity::ticket::Column::CreatedAt.lt(cutoff))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
