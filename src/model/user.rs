use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::membership::TierLevelDto;

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct UserDto {
    pub id: i32,
    pub discord_id: String,
    pub name: String,
    pub email: Option<String>,
    pub admin: bool,
    /// Effective tier, present on the current-user endpoint.
    pub tier: Option<TierLevelDto>,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct PaginatedUsersDto {
    pub users: Vec<UserDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct SetAdminDto {
    pub admin: bool,
}
