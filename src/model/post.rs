use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{membership::TierLevelDto, program::PublishStatusDto};

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Eq, Clone, Copy, Debug)]
#[serde(rename_all = "snake_case")]
pub enum PostKindDto {
    Blog,
    Poetry,
    Story,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct PostDto {
    pub id: i32,
    pub kind: PostKindDto,
    pub title: String,
    pub slug: String,
    pub body_markdown: String,
    pub body_html: String,
    pub excerpt: Option<String>,
    pub min_tier: TierLevelDto,
    pub status: PublishStatusDto,
    pub author_id: Option<i32>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct PostSummaryDto {
    pub id: i32,
    pub kind: PostKindDto,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub min_tier: TierLevelDto,
    pub published_at: Option<DateTime<Utc>>,
    pub locked: bool,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct PaginatedPostsDto {
    pub posts: Vec<PostSummaryDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct PostFormDto {
    pub kind: PostKindDto,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub body_markdown: String,
    pub excerpt: Option<String>,
    pub min_tier: TierLevelDto,
    pub status: PublishStatusDto,
}
