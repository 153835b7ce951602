//! Membership tiers, Stripe subscriptions and Discord role sync.
//!
//! A membership moves `pending -> active` when its checkout completes, `active ->
//! cancelled` when an admin cancels it or a newer membership replaces it, and `active ->
//! expired` once `expires_at` passes. Paid invoices of the Stripe subscription behind a
//! membership push `expires_at` forward, reactivating it if it had lapsed. Each transition into or out of `active` syncs the
//! tier's Discord role. Role sync is best effort: failures are logged and the membership
//! change stands.

use chrono::{DateTime, Duration, Utc};
use entity::sea_orm_active_enums::{MembershipStatus, TierLevel};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{membership::MembershipRepository, user::UserRepository},
    error::AppError,
    integration::{stripe::SubscriptionCheckout, Integrations},
    model::{
        membership::{GrantMembershipParams, Membership, Tier, UpdateTierParams},
        user::User,
    },
    util::parse::parse_snowflake,
};

/// Length of one paid membership period.
pub const MEMBERSHIP_PERIOD_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy)]
enum RoleChange {
    Add,
    Remove,
}

pub struct MembershipService<'a> {
    pub db: &'a DatabaseConnection,
    pub integrations: &'a Integrations,
    pub app_url: &'a str,
}

impl<'a> MembershipService<'a> {
    pub fn new(db: &'a DatabaseConnection, integrations: &'a Integrations, app_url: &'a str) -> Self {
        Self {
            db,
            integrations,
            app_url,
        }
    }

    pub async fn get_tiers(&self) -> Result<Vec<Tier>, AppError> {
        Ok(MembershipRepository::new(self.db).get_tiers().await?)
    }

    /// Updates a tier's name, price, Stripe price and Discord role.
    pub async fn update_tier(&self, params: UpdateTierParams) -> Result<Tier, AppError> {
        if params.name.trim().is_empty() {
            return Err(AppError::BadRequest("Tier name is required".to_string()));
        }
        if params.monthly_price_cents < 0 {
            return Err(AppError::BadRequest(
                "Monthly price cannot be negative".to_string(),
            ));
        }
        if let Some(role) = params.discord_role_id.as_deref() {
            if role.trim().parse::<u64>().is_err() {
                return Err(AppError::BadRequest(
                    "Discord role id must be numeric".to_string(),
                ));
            }
        }

        MembershipRepository::new(self.db)
            .update_tier(params)
            .await?
            .ok_or_else(|| AppError::NotFound("Tier not found".to_string()))
    }

    /// Starts a Stripe subscription checkout for `tier` and records a pending membership.
    ///
    /// # Returns
    /// - `Ok(String)` - Stripe-hosted checkout URL
    /// - `Err(AppError::BadRequest)` - Free tier, or the tier has no Stripe price
    /// - `Err(AppError::InternalError)` - Payments are not configured
    /// - `Err(AppError::IntegrationErr)` - Stripe rejected the session
    pub async fn start_checkout(&self, user: &User, tier: TierLevel) -> Result<String, AppError> {
        if tier == TierLevel::Free {
            return Err(AppError::BadRequest(
                "The free tier does not require a checkout".to_string(),
            ));
        }

        let repo = MembershipRepository::new(self.db);
        let tier = repo
            .find_tier(tier)
            .await?
            .ok_or_else(|| AppError::NotFound("Tier not found".to_string()))?;

        let Some(price_id) = tier.stripe_price_id.clone() else {
            return Err(AppError::BadRequest(format!(
                "The {} tier is not available for purchase",
                tier.name
            )));
        };

        let Some(stripe) = self.integrations.stripe.as_ref() else {
            return Err(AppError::InternalError(
                "Membership checkout requested but Stripe is not configured".to_string(),
            ));
        };

        let session = stripe
            .create_subscription_session(SubscriptionCheckout {
                price_id,
                customer_email: user.email.clone(),
                success_url: format!("{}/membership?checkout=success", self.app_url),
                cancel_url: format!("{}/membership?checkout=cancelled", self.app_url),
                metadata: vec![
                    ("kind", "membership".to_string()),
                    ("user_id", user.id.to_string()),
                ],
            })
            .await?;

        let membership = repo.create_pending(user.id, tier.level, session.id).await?;
        tracing::info!(
            "Started {:?} membership checkout {} for user {}",
            membership.tier,
            membership.id,
            user.id
        );

        Ok(session.url)
    }

    /// Activates the pending membership of a completed checkout session.
    ///
    /// Renewals of the same tier extend from the later of now and the current expiry.
    /// Other active memberships of the user are cancelled. Repeated deliveries are no-ops.
    ///
    /// # Arguments
    /// - `session_id` - Completed checkout session
    /// - `subscription_id` - Stripe subscription created by the session, renewed by invoices
    /// - `now` - Activation time
    ///
    /// # Returns
    /// - `Ok(Some(Membership))` - Active membership for the session
    /// - `Ok(None)` - No membership belongs to the session
    pub async fn complete_checkout(
        &self,
        session_id: &str,
        subscription_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Option<Membership>, AppError> {
        let repo = MembershipRepository::new(self.db);

        let Some(pending) = repo.find_by_session(session_id).await? else {
            tracing::warn!("No membership found for checkout session {}", session_id);
            return Ok(None);
        };

        if pending.status != MembershipStatus::Pending {
            tracing::debug!(
                "Membership {} already {:?}, ignoring checkout completion",
                pending.id,
                pending.status
            );
            return Ok(Some(pending));
        }

        let renew_from = repo
            .find_active_for_user(pending.user_id, now)
            .await?
            .into_iter()
            .filter(|m| m.tier == pending.tier)
            .filter_map(|m| m.expires_at)
            .fold(now, |latest, expiry| latest.max(expiry));
        let expires_at = renew_from + Duration::days(MEMBERSHIP_PERIOD_DAYS);

        let Some(activated) = repo
            .activate(
                pending.id,
                now,
                expires_at,
                subscription_id.map(str::to_string),
            )
            .await?
        else {
            return Ok(None);
        };
        tracing::info!(
            "Activated {:?} membership {} for user {} until {}",
            activated.tier,
            activated.id,
            activated.user_id,
            expires_at
        );

        self.replace_active(&activated).await?;

        Ok(Some(activated))
    }

    /// Extends the membership paid for by a renewed Stripe subscription.
    ///
    /// The new expiry is the end of the paid billing period, or one membership period past
    /// the later of now and the current expiry when the invoice has none. An expiry is
    /// never moved backwards, so redelivered invoices change nothing. Lapsed memberships
    /// are reactivated and get their role back.
    ///
    /// # Returns
    /// - `Ok(Some(Membership))` - Renewed membership
    /// - `Ok(None)` - No renewable membership belongs to the subscription
    pub async fn renew_subscription(
        &self,
        subscription_id: &str,
        paid_through: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<Option<Membership>, AppError> {
        let repo = MembershipRepository::new(self.db);

        let Some(membership) = repo.find_by_subscription(subscription_id).await? else {
            tracing::warn!("No membership found for subscription {}", subscription_id);
            return Ok(None);
        };

        if !matches!(
            membership.status,
            MembershipStatus::Active | MembershipStatus::Expired
        ) {
            tracing::warn!(
                "Membership {} is {:?}, ignoring renewal of subscription {}",
                membership.id,
                membership.status,
                subscription_id
            );
            return Ok(None);
        }

        let current = membership.expires_at.unwrap_or(now);
        let expires_at = paid_through
            .unwrap_or_else(|| current.max(now) + Duration::days(MEMBERSHIP_PERIOD_DAYS))
            .max(current);

        let Some(renewed) = repo
            .activate(membership.id, now, expires_at, None)
            .await?
        else {
            return Ok(None);
        };
        tracing::info!(
            "Renewed {:?} membership {} for user {} until {}",
            renewed.tier,
            renewed.id,
            renewed.user_id,
            expires_at
        );

        if membership.status == MembershipStatus::Expired {
            self.replace_active(&renewed).await?;
        }

        Ok(Some(renewed))
    }

    /// Cancels the pending membership of an abandoned checkout session.
    pub async fn expire_checkout(&self, session_id: &str) -> Result<(), AppError> {
        let repo = MembershipRepository::new(self.db);

        if let Some(pending) = repo.find_by_session(session_id).await? {
            if pending.status == MembershipStatus::Pending {
                repo.set_status(pending.id, MembershipStatus::Cancelled)
                    .await?;
                tracing::info!("Cancelled pending membership {}", pending.id);
            }
        }

        Ok(())
    }

    /// Grants a membership without payment.
    ///
    /// # Returns
    /// - `Ok(Membership)` - New active membership
    /// - `Err(AppError::BadRequest)` - Free tier or non-positive length
    /// - `Err(AppError::NotFound)` - Unknown user
    pub async fn grant(&self, params: GrantMembershipParams) -> Result<Membership, AppError> {
        if params.tier == TierLevel::Free {
            return Err(AppError::BadRequest(
                "The free tier cannot be granted".to_string(),
            ));
        }
        if params.days <= 0 {
            return Err(AppError::BadRequest(
                "Membership length must be at least one day".to_string(),
            ));
        }

        if UserRepository::new(self.db)
            .find_by_id(params.user_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let now = Utc::now();
        let membership = MembershipRepository::new(self.db)
            .create_active(
                params.user_id,
                params.tier,
                now,
                now + Duration::days(params.days),
            )
            .await?;
        tracing::info!(
            "Granted {:?} membership {} to user {} for {} days",
            membership.tier,
            membership.id,
            membership.user_id,
            params.days
        );

        self.replace_active(&membership).await?;

        Ok(membership)
    }

    /// Cancels a membership and removes its Discord role.
    pub async fn cancel(&self, membership_id: i32) -> Result<Membership, AppError> {
        let repo = MembershipRepository::new(self.db);

        let existing = repo
            .find_by_id(membership_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Membership not found".to_string()))?;

        if matches!(
            existing.status,
            MembershipStatus::Cancelled | MembershipStatus::Expired
        ) {
            return Ok(existing);
        }

        let cancelled = repo
            .set_status(membership_id, MembershipStatus::Cancelled)
            .await?
            .ok_or_else(|| AppError::NotFound("Membership not found".to_string()))?;

        if existing.status == MembershipStatus::Active {
            self.sync_role(cancelled.user_id, cancelled.tier, RoleChange::Remove)
                .await;
        }

        Ok(cancelled)
    }

    /// Marks memberships past their expiry as expired and removes their roles.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of memberships expired
    pub async fn expire_due(&self, now: DateTime<Utc>) -> Result<usize, AppError> {
        let expired = MembershipRepository::new(self.db).expire_due(now).await?;

        for membership in &expired {
            self.sync_role(membership.user_id, membership.tier, RoleChange::Remove)
                .await;
        }

        Ok(expired.len())
    }

    /// Cancels the user's other active memberships and moves roles to `current`'s tier.
    async fn replace_active(&self, current: &Membership) -> Result<(), AppError> {
        let replaced = MembershipRepository::new(self.db)
            .cancel_other_active(current.user_id, current.id)
            .await?;

        for old in replaced.iter().filter(|old| old.tier != current.tier) {
            self.sync_role(old.user_id, old.tier, RoleChange::Remove)
                .await;
        }

        self.sync_role(current.user_id, current.tier, RoleChange::Add)
            .await;

        Ok(())
    }

    async fn sync_role(&self, user_id: i32, tier: TierLevel, change: RoleChange) {
        let Some(discord) = self.integrations.discord.as_ref() else {
            tracing::debug!("Discord disabled, skipping role sync for user {}", user_id);
            return;
        };

        let (member_id, role_id) = match self.role_target(user_id, tier).await {
            Ok(Some(target)) => target,
            Ok(None) => {
                tracing::debug!("No Discord role configured for {:?}", tier);
                return;
            }
            Err(e) => {
                tracing::warn!("Failed to resolve Discord role for user {}: {}", user_id, e);
                return;
            }
        };

        let result = match change {
            RoleChange::Add => discord.add_role(member_id, role_id).await,
            RoleChange::Remove => discord.remove_role(member_id, role_id).await,
        };

        if let Err(e) = result {
            tracing::warn!(
                "Failed to {:?} role {} for user {}: {}",
                change,
                role_id,
                user_id,
                e
            );
        }
    }

    async fn role_target(
        &self,
        user_id: i32,
        tier: TierLevel,
    ) -> Result<Option<(u64, u64)>, AppError> {
        let Some(role_id) = MembershipRepository::new(self.db)
            .find_tier(tier)
            .await?
            .and_then(|tier| tier.discord_role())
        else {
            return Ok(None);
        };

        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Ok(None);
        };

        Ok(Some((parse_snowflake(&user.discord_id)?, role_id)))
    }
}
