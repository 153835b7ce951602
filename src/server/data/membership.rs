//! Membership tier and membership repository.
//!
//! Tier rows are seeded by migration and only ever updated. Memberships move through
//! pending -> active -> cancelled/expired; the effective tier of a user is derived from
//! their active, unexpired memberships.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{MembershipStatus, TierLevel};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::model::membership::{Membership, Tier, UpdateTierParams};

pub struct MembershipRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MembershipRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets all tiers ordered from free to pro_plus.
    pub async fn get_tiers(&self) -> Result<Vec<Tier>, DbErr> {
        let mut tiers: Vec<Tier> = entity::prelude::MembershipTier::find()
            .all(self.db)
            .await?
            .into_iter()
            .map(Tier::from_entity)
            .collect();
        tiers.sort_by_key(|tier| tier.level);

        Ok(tiers)
    }

    pub async fn find_tier(&self, level: TierLevel) -> Result<Option<Tier>, DbErr> {
        let entity = entity::prelude::MembershipTier::find_by_id(level)
            .one(self.db)
            .await?;

        Ok(entity.map(Tier::from_entity))
    }

    /// Updates a tier's name, price and integration ids.
    ///
    /// # Returns
    /// - `Ok(Some(Tier))` - Updated tier
    /// - `Ok(None)` - Tier row missing
    /// - `Err(DbErr)` - Database error
    pub async fn update_tier(&self, params: UpdateTierParams) -> Result<Option<Tier>, DbErr> {
        let Some(entity) = entity::prelude::MembershipTier::find_by_id(params.level)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::membership_tier::ActiveModel = entity.into();
        active.name = ActiveValue::Set(params.name);
        active.description = ActiveValue::Set(params.description);
        active.monthly_price_cents = ActiveValue::Set(params.monthly_price_cents);
        active.stripe_price_id = ActiveValue::Set(params.stripe_price_id);
        active.discord_role_id = ActiveValue::Set(params.discord_role_id);
        let entity = active.update(self.db).await?;

        Ok(Some(Tier::from_entity(entity)))
    }

    /// Highest tier among the user's active memberships that have not expired at `now`.
    ///
    /// Memberships without an expiry never lapse. Users with none are on the free tier.
    pub async fn effective_tier(
        &self,
        user_id: i32,
        now: DateTime<Utc>,
    ) -> Result<TierLevel, DbErr> {
        let tier = self
            .find_active_for_user(user_id, now)
            .await?
            .into_iter()
            .map(|membership| membership.tier)
            .max()
            .unwrap_or(TierLevel::Free);

        Ok(tier)
    }

    /// Discord role of the user's effective tier, if that tier has one configured.
    ///
    /// Free-tier users get `None`.
    pub async fn tier_role_for_user(
        &self,
        user_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Option<u64>, DbErr> {
        let tier = self.effective_tier(user_id, now).await?;
        if tier == TierLevel::Free {
            return Ok(None);
        }

        Ok(self.find_tier(tier).await?.and_then(|tier| tier.discord_role()))
    }

    /// Active memberships of a user that have not expired at `now`.
    pub async fn find_active_for_user(
        &self,
        user_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Vec<Membership>, DbErr> {
        let memberships = entity::prelude::Membership::find()
            .filter(entity::membership::Column::UserId.eq(user_id))
            .filter(entity::membership::Column::Status.eq(MembershipStatus::Active))
            .filter(
                Condition::any()
                    .add(entity::membership::Column::ExpiresAt.is_null())
                    .add(entity::membership::Column::ExpiresAt.gt(now)),
            )
            .order_by_desc(entity::membership::Column::ExpiresAt)
            .all(self.db)
            .await?;

        Ok(memberships.into_iter().map(Membership::from_entity).collect())
    }

    /// Memberships of a user, newest first.
    pub async fn get_for_user(&self, user_id: i32) -> Result<Vec<Membership>, DbErr> {
        let memberships = entity::prelude::Membership::find()
            .filter(entity::membership::Column::UserId.eq(user_id))
            .order_by_desc(entity::membership::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(memberships.into_iter().map(Membership::from_entity).collect())
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Membership>, DbErr> {
        let entity = entity::prelude::Membership::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(Membership::from_entity))
    }

    pub async fn find_by_session(&self, session_id: &str) -> Result<Option<Membership>, DbErr> {
        let entity = entity::prelude::Membership::find()
            .filter(entity::membership::Column::StripeSessionId.eq(session_id))
            .one(self.db)
            .await?;

        Ok(entity.map(Membership::from_entity))
    }

    /// Newest membership paid for by a Stripe subscription.
    pub async fn find_by_subscription(
        &self,
        subscription_id: &str,
    ) -> Result<Option<Membership>, DbErr> {
        let entity = entity::prelude::Membership::find()
            .filter(entity::membership::Column::StripeSubscriptionId.eq(subscription_id))
            .order_by_desc(entity::membership::Column::CreatedAt)
            .order_by_desc(entity::membership::Column::Id)
            .one(self.db)
            .await?;

        Ok(entity.map(Membership::from_entity))
    }

    /// Stores a membership awaiting payment for a checkout session.
    pub async fn create_pending(
        &self,
        user_id: i32,
        tier: TierLevel,
        session_id: String,
    ) -> Result<Membership, DbErr> {
        let entity = entity::membership::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            tier: ActiveValue::Set(tier),
            status: ActiveValue::Set(MembershipStatus::Pending),
            started_at: ActiveValue::Set(None),
            expires_at: ActiveValue::Set(None),
            stripe_session_id: ActiveValue::Set(Some(session_id)),
            stripe_subscription_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Membership::from_entity(entity))
    }

    /// Stores an already active membership, used for admin grants.
    pub async fn create_active(
        &self,
        user_id: i32,
        tier: TierLevel,
        started_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<Membership, DbErr> {
        let entity = entity::membership::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            tier: ActiveValue::Set(tier),
            status: ActiveValue::Set(MembershipStatus::Active),
            started_at: ActiveValue::Set(Some(started_at)),
            expires_at: ActiveValue::Set(Some(expires_at)),
            stripe_session_id: ActiveValue::Set(None),
            stripe_subscription_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Membership::from_entity(entity))
    }

    /// Marks a membership active until `expires_at`, keeping an earlier start date.
    ///
    /// A `subscription_id` links the membership to the Stripe subscription renewing it.
    pub async fn activate(
        &self,
        id: i32,
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        subscription_id: Option<String>,
    ) -> Result<Option<Membership>, DbErr> {
        let Some(entity) = entity::prelude::Membership::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let started_at = entity.started_at.unwrap_or(now);
        let mut active: entity::membership::ActiveModel = entity.into();
        active.status = ActiveValue::Set(MembershipStatus::Active);
        active.started_at = ActiveValue::Set(Some(started_at));
        active.expires_at = ActiveValue::Set(Some(expires_at));
        if let Some(subscription_id) = subscription_id {
            active.stripe_subscription_id = ActiveValue::Set(Some(subscription_id));
        }
        let entity = active.update(self.db).await?;

        Ok(Some(Membership::from_entity(entity)))
    }

    pub async fn set_status(
        &self,
        id: i32,
        status: MembershipStatus,
    ) -> Result<Option<Membership>, DbErr> {
        let Some(entity) = entity::prelude::Membership::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::membership::ActiveModel = entity.into();
        active.status = ActiveValue::Set(status);
        let entity = active.update(self.db).await?;

        Ok(Some(Membership::from_entity(entity)))
    }

    /// Cancels every active membership of a user except `keep_id`.
    ///
    /// # Returns
    /// - `Ok(Vec<Membership>)` - The memberships that were cancelled, with their old tier
    pub async fn cancel_other_active(
        &self,
        user_id: i32,
        keep_id: i32,
    ) -> Result<Vec<Membership>, DbErr> {
        let others = entity::prelude::Membership::find()
            .filter(entity::membership::Column::UserId.eq(user_id))
            .filter(entity::membership::Column::Status.eq(MembershipStatus::Active))
            .filter(entity::membership::Column::Id.ne(keep_id))
            .all(self.db)
            .await?;

        if others.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = others.iter().map(|m| m.id).collect();
        entity::prelude::Membership::update_many()
            .set(entity::membership::ActiveModel {
                status: ActiveValue::Set(MembershipStatus::Cancelled),
                ..Default::default()
            })
            .filter(entity::membership::Column::Id.is_in(ids))
            .exec(self.db)
            .await?;

        Ok(others
            .into_iter()
            .map(|m| Membership {
                status: MembershipStatus::Cancelled,
                ..Membership::from_entity(m)
            })
            .collect())
    }

    /// Marks active memberships whose expiry is before `now` as expired.
    ///
    /// # Returns
    /// - `Ok(Vec<Membership>)` - The memberships that were expired
    pub async fn expire_due(&self, now: DateTime<Utc>) -> Result<Vec<Membership>, DbErr> {
        let due = entity::prelude::Membership::find()
            .filter(entity::membership::Column::Status.eq(MembershipStatus::Active))
            .filter(entity::membership::Column::ExpiresAt.lt(now))
            .all(self.db)
            .await?;

        if due.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = due.iter().map(|m| m.id).collect();
        entity::prelude::Membership::update_many()
            .set(entity::membership::ActiveModel {
                status: ActiveValue::Set(MembershipStatus::Expired),
                ..Default::default()
            })
            .filter(entity::membership::Column::Id.is_in(ids))
            .exec(self.db)
            .await?;

        Ok(due
            .into_iter()
            .map(|m| Membership {
                status: MembershipStatus::Expired,
                ..Membership::from_entity(m)
            })
            .collect())
    }
}
