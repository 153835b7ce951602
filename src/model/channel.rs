use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{membership::TierLevelDto, program::PublishStatusDto};

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct ChannelDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub min_tier: TierLevelDto,
    pub discord_channel_id: Option<String>,
    pub locked: bool,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct ChannelFormDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    pub description: Option<String>,
    pub min_tier: TierLevelDto,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct VideoDto {
    pub id: i32,
    pub channel_id: i32,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub status: PublishStatusDto,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct VideoFormDto {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    pub description: Option<String>,
    pub status: PublishStatusDto,
}
