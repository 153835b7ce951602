//! Membership tiers and memberships.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{MembershipStatus, TierLevel};

use crate::model::membership::{MembershipDto, MembershipStatusDto, TierDto, TierLevelDto};

impl From<TierLevel> for TierLevelDto {
    fn from(value: TierLevel) -> Self {
        match value {
            TierLevel::Free => TierLevelDto::Free,
            TierLevel::Pro => TierLevelDto::Pro,
            TierLevel::ProPlus => TierLevelDto::ProPlus,
        }
    }
}

impl From<TierLevelDto> for TierLevel {
    fn from(value: TierLevelDto) -> Self {
        match value {
            TierLevelDto::Free => TierLevel::Free,
            TierLevelDto::Pro => TierLevel::Pro,
            TierLevelDto::ProPlus => TierLevel::ProPlus,
        }
    }
}

impl From<MembershipStatus> for MembershipStatusDto {
    fn from(value: MembershipStatus) -> Self {
        match value {
            MembershipStatus::Pending => MembershipStatusDto::Pending,
            MembershipStatus::Active => MembershipStatusDto::Active,
            MembershipStatus::Cancelled => MembershipStatusDto::Cancelled,
            MembershipStatus::Expired => MembershipStatusDto::Expired,
        }
    }
}

/// Parses a tier from its path form (`free`, `pro`, `pro_plus`).
pub fn parse_tier_level(value: &str) -> Option<TierLevel> {
    match value {
        "free" => Some(TierLevel::Free),
        "pro" => Some(TierLevel::Pro),
        "pro_plus" => Some(TierLevel::ProPlus),
        _ => None,
    }
}

/// Pricing and integration settings of one tier.
#[derive(Debug, Clone, PartialEq)]
pub struct Tier {
    pub level: TierLevel,
    pub name: String,
    pub description: Option<String>,
    pub monthly_price_cents: i64,
    pub stripe_price_id: Option<String>,
    pub discord_role_id: Option<String>,
}

impl Tier {
    pub fn from_entity(entity: entity::membership_tier::Model) -> Self {
        Self {
            level: entity.level,
            name: entity.name,
            description: entity.description,
            monthly_price_cents: entity.monthly_price_cents,
            stripe_price_id: entity.stripe_price_id,
            discord_role_id: entity.discord_role_id,
        }
    }

    pub fn into_dto(self) -> TierDto {
        TierDto {
            level: self.level.into(),
            name: self.name,
            description: self.description,
            monthly_price_cents: self.monthly_price_cents,
            stripe_price_id: self.stripe_price_id,
            discord_role_id: self.discord_role_id,
        }
    }

    /// Discord role as a snowflake, ignoring unparsable values.
    pub fn discord_role(&self) -> Option<u64> {
        self.discord_role_id.as_deref().and_then(|id| id.parse().ok())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Membership {
    pub id: i32,
    pub user_id: i32,
    pub tier: TierLevel,
    pub status: MembershipStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub stripe_session_id: Option<String>,
    pub stripe_subscription_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Membership {
    pub fn from_entity(entity: entity::membership::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            tier: entity.tier,
            status: entity.status,
            started_at: entity.started_at,
            expires_at: entity.expires_at,
            stripe_session_id: entity.stripe_session_id,
            stripe_subscription_id: entity.stripe_subscription_id,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> MembershipDto {
        MembershipDto {
            id: self.id,
            user_id: self.user_id,
            tier: self.tier.into(),
            status: self.status.into(),
            started_at: self.started_at,
            expires_at: self.expires_at,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateTierParams {
    pub level: TierLevel,
    pub name: String,
    pub description: Option<String>,
    pub monthly_price_cents: i64,
    pub stripe_price_id: Option<String>,
    pub discord_role_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GrantMembershipParams {
    pub user_id: i32,
    pub tier: TierLevel,
    pub days: i64,
}
