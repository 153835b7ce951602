use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::membership::TierLevelDto;

/// Lifecycle of programs, posts and videos.
#[derive(Serialize, Deserialize, ToSchema, PartialEq, Eq, Clone, Copy, Debug)]
#[serde(rename_all = "snake_case")]
pub enum PublishStatusDto {
    Draft,
    Published,
    Archived,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct ProgramDto {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub cover_image_url: Option<String>,
    pub min_tier: TierLevelDto,
    pub status: PublishStatusDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing entry. `locked` is set when the viewer's tier is below `min_tier`.
#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct ProgramSummaryDto {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub cover_image_url: Option<String>,
    pub min_tier: TierLevelDto,
    pub locked: bool,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct PaginatedProgramsDto {
    pub programs: Vec<ProgramSummaryDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct ProgramFormDto {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub cover_image_url: Option<String>,
    pub min_tier: TierLevelDto,
    pub status: PublishStatusDto,
}
