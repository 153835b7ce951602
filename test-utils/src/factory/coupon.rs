//! Coupon factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for coupons. Defaults to an active, unlimited 10% coupon.
pub struct CouponFactory<'a> {
    db: &'a DatabaseConnection,
    code: String,
    percent_off: Option<i32>,
    amount_off_cents: Option<i64>,
    max_redemptions: Option<i32>,
    redemption_count: i32,
    expires_at: Option<DateTime<Utc>>,
    event_id: Option<i32>,
    active: bool,
}

impl<'a> CouponFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            code: format!("SAVE{}", next_id()),
            percent_off: Some(10),
            amount_off_cents: None,
            max_redemptions: None,
            redemption_count: 0,
            expires_at: None,
            event_id: None,
            active: true,
        }
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn percent_off(mut self, percent: i32) -> Self {
        self.percent_off = Some(percent);
        self.amount_off_cents = None;
        self
    }

    pub fn amount_off(mut self, cents: i64) -> Self {
        self.amount_off_cents = Some(cents);
        self.percent_off = None;
        self
    }

    pub fn max_redemptions(mut self, max: i32) -> Self {
        self.max_redemptions = Some(max);
        self
    }

    pub fn redemption_count(mut self, count: i32) -> Self {
        self.redemption_count = count;
        self
    }

    pub fn expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn event_id(mut self, event_id: i32) -> Self {
        self.event_id = Some(event_id);
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub async fn build(self) -> Result<entity::coupon::Model, DbErr> {
        entity::coupon::ActiveModel {
            code: ActiveValue::Set(self.code),
            percent_off: ActiveValue::Set(self.percent_off),
            amount_off_cents: ActiveValue::Set(self.amount_off_cents),
            max_redemptions: ActiveValue::Set(self.max_redemptions),
            redemption_count: ActiveValue::Set(self.redemption_count),
            expires_at: ActiveValue::Set(self.expires_at),
            event_id: ActiveValue::Set(self.event_id),
            active: ActiveValue::Set(self.active),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_coupon(db: &DatabaseConnection) -> Result<entity::coupon::Model, DbErr> {
    CouponFactory::new(db).build().await
}
