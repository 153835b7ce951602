//! Coupon administration and price quotes.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{coupon::CouponRepository, event::EventRepository},
    error::AppError,
    model::{
        coupon::{normalize_code, Coupon, CouponParams},
        event::Event,
    },
    service::event::EventService,
    util::validate::require_non_blank,
};

/// Price of one ticket after an optional coupon.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub coupon: Option<Coupon>,
    pub original_cents: i64,
    pub amount_cents: i64,
}

pub struct CouponService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> CouponService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a coupon.
    ///
    /// # Returns
    /// - `Ok(Coupon)` - Created coupon
    /// - `Err(AppError::BadRequest)` - Invalid discount, limit or event scope
    /// - `Err(AppError::Conflict)` - Code already used
    pub async fn create(&self, params: CouponParams) -> Result<Coupon, AppError> {
        self.validate(&params, None).await?;

        let coupon = CouponRepository::new(self.db).create(params).await?;
        tracing::info!("Created coupon {} ({})", coupon.id, coupon.code);

        Ok(coupon)
    }

    pub async fn update(&self, id: i32, params: CouponParams) -> Result<Coupon, AppError> {
        self.validate(&params, Some(id)).await?;

        CouponRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Coupon not found".to_string()))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !CouponRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound("Coupon not found".to_string()));
        }
        Ok(())
    }

    pub async fn get_all(&self) -> Result<Vec<Coupon>, AppError> {
        Ok(CouponRepository::new(self.db).get_all().await?)
    }

    /// Discounted price of a published ticketed event, without redeeming the coupon.
    pub async fn preview(
        &self,
        event_id: i32,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Quote, AppError> {
        let event = EventService::new(self.db).find_published(event_id).await?;
        if !event.ticketed {
            return Err(AppError::BadRequest(
                "This event does not sell tickets".to_string(),
            ));
        }

        self.quote(&event, Some(code), now).await
    }

    /// Computes the ticket price of `event` with an optional coupon code.
    ///
    /// A blank code counts as no coupon.
    ///
    /// # Returns
    /// - `Ok(Quote)` - Amount to charge
    /// - `Err(AppError::BadRequest)` - Unknown code, or the coupon was rejected
    pub async fn quote(
        &self,
        event: &Event,
        code: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Quote, AppError> {
        let original_cents = event.ticket_price_cents;

        let Some(code) = code.map(normalize_code).filter(|code| !code.is_empty()) else {
            return Ok(Quote {
                coupon: None,
                original_cents,
                amount_cents: original_cents,
            });
        };

        let coupon = CouponRepository::new(self.db)
            .find_by_code(&code)
            .await?
            .ok_or_else(|| AppError::BadRequest(format!("Coupon '{}' does not exist", code)))?;

        let amount_cents = coupon
            .apply(original_cents, event.id, now)
            .map_err(|rejection| AppError::BadRequest(rejection.to_string()))?;

        Ok(Quote {
            coupon: Some(coupon),
            original_cents,
            amount_cents,
        })
    }

    /// Counts one redemption. Failures are logged and swallowed.
    pub async fn redeem(&self, coupon_id: i32) {
        match CouponRepository::new(self.db)
            .increment_redemption(coupon_id)
            .await
        {
            Ok(Some(coupon)) => tracing::debug!(
                "Coupon {} redeemed {} times",
                coupon.code,
                coupon.redemption_count
            ),
            Ok(None) => tracing::warn!("Coupon {} vanished before redemption", coupon_id),
            Err(e) => tracing::warn!("Failed to redeem coupon {}: {}", coupon_id, e),
        }
    }

    async fn validate(&self, params: &CouponParams, except_id: Option<i32>) -> Result<(), AppError> {
        require_non_blank("code", &params.code)?;

        match (params.percent_off, params.amount_off_cents) {
            (Some(percent), None) if (1..=100).contains(&percent) => {}
            (None, Some(amount)) if amount > 0 => {}
            (Some(_), Some(_)) | (None, None) => {
                return Err(AppError::BadRequest(
                    "Set exactly one of percent_off or amount_off_cents".to_string(),
                ))
            }
            (Some(_), None) => {
                return Err(AppError::BadRequest(
                    "percent_off must be between 1 and 100".to_string(),
                ))
            }
            (None, Some(_)) => {
                return Err(AppError::BadRequest(
                    "amount_off_cents must be positive".to_string(),
                ))
            }
        }

        if params.max_redemptions.is_some_and(|max| max <= 0) {
            return Err(AppError::BadRequest(
                "max_redemptions must be positive".to_string(),
            ));
        }

        if let Some(event_id) = params.event_id {
            if EventRepository::new(self.db)
                .find_by_id(event_id)
                .await?
                .is_none()
            {
                return Err(AppError::BadRequest(format!(
                    "Event {} does not exist",
                    event_id
                )));
            }
        }

        if CouponRepository::new(self.db)
            .code_taken(&params.code, except_id)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Coupon '{}' already exists",
                params.code
            )));
        }

        Ok(())
    }
}
