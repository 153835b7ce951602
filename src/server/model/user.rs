//! User domain models and parameters.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::TierLevel;

use crate::model::user::{PaginatedUsersDto, UserDto};

/// Application user identified by their Discord account.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub discord_id: String,
    pub name: String,
    pub email: Option<String>,
    pub admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            discord_id: entity.discord_id,
            name: entity.name,
            email: entity.email,
            admin: entity.admin,
            created_at: entity.created_at,
        }
    }

    /// Converts to a DTO, optionally carrying the user's effective tier.
    pub fn into_dto(self, tier: Option<TierLevel>) -> UserDto {
        UserDto {
            id: self.id,
            discord_id: self.discord_id,
            name: self.name,
            email: self.email,
            admin: self.admin,
            tier: tier.map(Into::into),
        }
    }

    /// Discord snowflake as a number, `None` if the stored value is not numeric.
    pub fn discord_snowflake(&self) -> Option<u64> {
        self.discord_id.parse().ok()
    }
}

/// Parameters for upserting a user during login.
///
/// `is_admin` of `None` preserves the existing admin flag.
#[derive(Debug, Clone)]
pub struct UpsertUserParam {
    pub discord_id: String,
    pub name: String,
    pub email: Option<String>,
    pub is_admin: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedUsers {
    pub users: Vec<User>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedUsers {
    pub fn into_dto(self) -> PaginatedUsersDto {
        PaginatedUsersDto {
            users: self.users.into_iter().map(|u| u.into_dto(None)).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Requester of a public endpoint: anonymous or logged in, with their effective tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewer {
    pub user_id: Option<i32>,
    pub admin: bool,
    pub tier: TierLevel,
}

impl Viewer {
    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            admin: false,
            tier: TierLevel::Free,
        }
    }

    /// Whether content gated at `min_tier` is readable by this viewer.
    pub fn can_access(&self, min_tier: TierLevel) -> bool {
        self.admin || self.tier >= min_tier
    }
}
