use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Membership level, ordered `free < pro < pro_plus`.
#[derive(Serialize, Deserialize, ToSchema, PartialEq, Eq, Clone, Copy, Debug)]
#[serde(rename_all = "snake_case")]
pub enum TierLevelDto {
    Free,
    Pro,
    ProPlus,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Eq, Clone, Copy, Debug)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatusDto {
    Pending,
    Active,
    Cancelled,
    Expired,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct TierDto {
    pub level: TierLevelDto,
    pub name: String,
    pub description: Option<String>,
    pub monthly_price_cents: i64,
    pub stripe_price_id: Option<String>,
    pub discord_role_id: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct UpdateTierDto {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub monthly_price_cents: i64,
    pub stripe_price_id: Option<String>,
    pub discord_role_id: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct MembershipDto {
    pub id: i32,
    pub user_id: i32,
    pub tier: TierLevelDto,
    pub status: MembershipStatusDto,
    pub started_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct MembershipCheckoutDto {
    pub tier: TierLevelDto,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct CheckoutRedirectDto {
    pub checkout_url: String,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct GrantMembershipDto {
    pub user_id: i32,
    pub tier: TierLevelDto,
    /// Length of the membership in days.
    pub days: i64,
}
