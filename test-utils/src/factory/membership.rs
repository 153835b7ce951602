//! Membership tier and membership factories.

use chrono::{DateTime, Duration, Utc};
use entity::sea_orm_active_enums::{MembershipStatus, TierLevel};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Inserts the three tier rows that production databases receive from migrations.
///
/// The pro tier carries a Stripe price and Discord role so checkout and role sync
/// paths have something to work with.
pub async fn seed_tiers(db: &DatabaseConnection) -> Result<(), DbErr> {
    let tiers = [
        (TierLevel::Free, "Free", 0, None, None),
        (
            TierLevel::Pro,
            "Pro",
            1500,
            Some("price_pro".to_string()),
            Some("2001".to_string()),
        ),
        (TierLevel::ProPlus, "Pro+", 4900, None, None),
    ];

    for (level, name, price, stripe_price_id, discord_role_id) in tiers {
        entity::membership_tier::ActiveModel {
            level: ActiveValue::Set(level),
            name: ActiveValue::Set(name.to_string()),
            description: ActiveValue::Set(None),
            monthly_price_cents: ActiveValue::Set(price),
            stripe_price_id: ActiveValue::Set(stripe_price_id),
            discord_role_id: ActiveValue::Set(discord_role_id),
        }
        .insert(db)
        .await?;
    }

    Ok(())
}

/// Factory for creating memberships. Defaults to an active pro membership expiring in
/// 30 days.
pub struct MembershipFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    tier: TierLevel,
    status: MembershipStatus,
    expires_at: Option<DateTime<Utc>>,
    stripe_session_id: Option<String>,
    stripe_subscription_id: Option<String>,
}

impl<'a> MembershipFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        Self {
            db,
            user_id,
            tier: TierLevel::Pro,
            status: MembershipStatus::Active,
            expires_at: Some(Utc::now() + Duration::days(30)),
            stripe_session_id: None,
            stripe_subscription_id: None,
        }
    }

    pub fn tier(mut self, tier: TierLevel) -> Self {
        self.tier = tier;
        self
    }

    pub fn status(mut self, status: MembershipStatus) -> Self {
        self.status = status;
        self
    }

    pub fn expires_at(mut self, expires_at: Option<DateTime<Utc>>) -> Self {
        self.expires_at = expires_at;
        self
    }

    pub fn stripe_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.stripe_session_id = Some(session_id.into());
        self
    }

    pub fn stripe_subscription_id(mut self, subscription_id: impl Into<String>) -> Self {
        self.stripe_subscription_id = Some(subscription_id.into());
        self
    }

    pub async fn build(self) -> Result<entity::membership::Model, DbErr> {
        let now = Utc::now();
        let started_at = match self.status {
            MembershipStatus::Pending => None,
            _ => Some(now),
        };

        entity::membership::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            tier: ActiveValue::Set(self.tier),
            status: ActiveValue::Set(self.status),
            started_at: ActiveValue::Set(started_at),
            expires_at: ActiveValue::Set(self.expires_at),
            stripe_session_id: ActiveValue::Set(self.stripe_session_id),
            stripe_subscription_id: ActiveValue::Set(self.stripe_subscription_id),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active membership of the given tier for a user.
pub async fn create_membership(
    db: &DatabaseConnection,
    user_id: i32,
    tier: TierLevel,
) -> Result<entity::membership::Model, DbErr> {
    MembershipFactory::new(db, user_id).tier(tier).build().await
}
