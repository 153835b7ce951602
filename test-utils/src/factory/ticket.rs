//! Ticket factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::TicketStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for tickets. Defaults to an issued ticket with nothing paid.
pub struct TicketFactory<'a> {
    db: &'a DatabaseConnection,
    event_id: i32,
    user_id: i32,
    code: String,
    status: TicketStatus,
    amount_paid_cents: i64,
    coupon_id: Option<i32>,
    stripe_session_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl<'a> TicketFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, event_id: i32, user_id: i32) -> Self {
        Self {
            db,
            event_id,
            user_id,
            code: format!("TCK{:08}", next_id()),
            status: TicketStatus::Issued,
            amount_paid_cents: 0,
            coupon_id: None,
            stripe_session_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn status(mut self, status: TicketStatus) -> Self {
        self.status = status;
        self
    }

    pub fn amount_paid(mut self, cents: i64) -> Self {
        self.amount_paid_cents = cents;
        self
    }

    pub fn coupon_id(mut self, coupon_id: i32) -> Self {
        self.coupon_id = Some(coupon_id);
        self
    }

    pub fn stripe_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.stripe_session_id = Some(session_id.into());
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub async fn build(self) -> Result<entity::ticket::Model, DbErr> {
        entity::ticket::ActiveModel {
            event_id: ActiveValue::Set(self.event_id),
            user_id: ActiveValue::Set(self.user_id),
            code: ActiveValue::Set(self.code),
            status: ActiveValue::Set(self.status),
            amount_paid_cents: ActiveValue::Set(self.amount_paid_cents),
            coupon_id: ActiveValue::Set(self.coupon_id),
            stripe_session_id: ActiveValue::Set(self.stripe_session_id),
            qr_url: ActiveValue::Set(None),
            checked_in_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_ticket(
    db: &DatabaseConnection,
    event_id: i32,
    user_id: i32,
) -> Result<entity::ticket::Model, DbErr> {
    TicketFactory::new(db, event_id, user_id).build().await
}
