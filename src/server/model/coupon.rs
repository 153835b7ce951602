//! Coupon domain model and discount arithmetic.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{
    model::coupon::{CouponDto, CouponFormDto},
    server::integration::stripe::MIN_CHARGE_CENTS,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Coupon {
    pub id: i32,
    pub code: String,
    pub percent_off: Option<i32>,
    pub amount_off_cents: Option<i64>,
    pub max_redemptions: Option<i32>,
    pub redemption_count: i32,
    pub expires_at: Option<DateTime<Utc>>,
    pub event_id: Option<i32>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Reason a coupon cannot be applied to a price.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CouponRejection {
    #[error("Coupon is not active")]
    Inactive,
    #[error("Coupon has expired")]
    Expired,
    #[error("Coupon has reached its redemption limit")]
    Exhausted,
    #[error("Coupon is not valid for this event")]
    WrongEvent,
    /// The discounted amount is positive but below the payment provider minimum.
    #[error(
        "Discounted price of {0} cents is below the minimum charge of {min} cents",
        min = MIN_CHARGE_CENTS
    )]
    BelowMinimumCharge(i64),
}

impl Coupon {
    pub fn from_entity(entity: entity::coupon::Model) -> Self {
        Self {
            id: entity.id,
            code: entity.code,
            percent_off: entity.percent_off,
            amount_off_cents: entity.amount_off_cents,
            max_redemptions: entity.max_redemptions,
            redemption_count: entity.redemption_count,
            expires_at: entity.expires_at,
            event_id: entity.event_id,
            active: entity.active,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> CouponDto {
        CouponDto {
            id: self.id,
            code: self.code,
            percent_off: self.percent_off,
            amount_off_cents: self.amount_off_cents,
            max_redemptions: self.max_redemptions,
            redemption_count: self.redemption_count,
            expires_at: self.expires_at,
            event_id: self.event_id,
            active: self.active,
            created_at: self.created_at,
        }
    }

    /// Computes the amount due after applying this coupon to `price_cents`.
    ///
    /// Percent coupons subtract `round(price * pct / 100)`; amount coupons subtract their
    /// value and floor at zero. A positive result under `MIN_CHARGE_CENTS` is rejected
    /// because the payment provider cannot charge it; zero stays valid and means free.
    ///
    /// # Arguments
    /// - `price_cents` - Undiscounted price
    /// - `event_id` - Event being purchased, checked against the coupon's scope
    /// - `now` - Current time, checked against the expiry
    pub fn apply(
        &self,
        price_cents: i64,
        event_id: i32,
        now: DateTime<Utc>,
    ) -> Result<i64, CouponRejection> {
        if !self.active {
            return Err(CouponRejection::Inactive);
        }
        if self.expires_at.is_some_and(|expires_at| expires_at <= now) {
            return Err(CouponRejection::Expired);
        }
        if self
            .max_redemptions
            .is_some_and(|max| self.redemption_count >= max)
        {
            return Err(CouponRejection::Exhausted);
        }
        if self.event_id.is_some_and(|scoped| scoped != event_id) {
            return Err(CouponRejection::WrongEvent);
        }

        let discounted = match (self.percent_off, self.amount_off_cents) {
            (Some(percent), _) => {
                let discount = (price_cents as f64 * percent as f64 / 100.0).round() as i64;
                price_cents - discount
            }
            (None, Some(amount_off)) => (price_cents - amount_off).max(0),
            (None, None) => price_cents,
        };
        let discounted = discounted.max(0);

        if discounted > 0 && discounted < MIN_CHARGE_CENTS {
            return Err(CouponRejection::BelowMinimumCharge(discounted));
        }

        Ok(discounted)
    }
}

/// Normalizes a user-entered coupon code.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

#[derive(Debug, Clone)]
pub struct CouponParams {
    pub code: String,
    pub percent_off: Option<i32>,
    pub amount_off_cents: Option<i64>,
    pub max_redemptions: Option<i32>,
    pub expires_at: Option<DateTime<Utc>>,
    pub event_id: Option<i32>,
    pub active: bool,
}

impl CouponParams {
    pub fn from_dto(dto: CouponFormDto) -> Self {
        Self {
            code: normalize_code(&dto.code),
            percent_off: dto.percent_off,
            amount_off_cents: dto.amount_off_cents,
            max_redemptions: dto.max_redemptions,
            expires_at: dto.expires_at,
            event_id: dto.event_id,
            active: dto.active,
        }
    }
}
