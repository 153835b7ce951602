//! Community video channels and their videos.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{PublishStatus, TierLevel};

use crate::{
    model::channel::{ChannelDto, ChannelFormDto, VideoDto, VideoFormDto},
    server::model::user::Viewer,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub min_tier: TierLevel,
    pub discord_channel_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Channel {
    pub fn from_entity(entity: entity::channel::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
            description: entity.description,
            min_tier: entity.min_tier,
            discord_channel_id: entity.discord_channel_id,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self, viewer: &Viewer) -> ChannelDto {
        ChannelDto {
            locked: !viewer.can_access(self.min_tier),
            id: self.id,
            name: self.name,
            slug: self.slug,
            description: self.description,
            min_tier: self.min_tier.into(),
            discord_channel_id: self.discord_channel_id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChannelParams {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub min_tier: TierLevel,
}

impl ChannelParams {
    pub fn from_dto(dto: ChannelFormDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            slug: dto.slug.trim().to_string(),
            description: dto.description.filter(|d| !d.trim().is_empty()),
            min_tier: dto.min_tier.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    pub id: i32,
    pub channel_id: i32,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub status: PublishStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Video {
    pub fn from_entity(entity: entity::video::Model) -> Self {
        Self {
            id: entity.id,
            channel_id: entity.channel_id,
            title: entity.title,
            url: entity.url,
            description: entity.description,
            status: entity.status,
            published_at: entity.published_at,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> VideoDto {
        VideoDto {
            id: self.id,
            channel_id: self.channel_id,
            title: self.title,
            url: self.url,
            description: self.description,
            status: self.status.into(),
            published_at: self.published_at,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VideoParams {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub status: PublishStatus,
}

impl VideoParams {
    pub fn from_dto(dto: VideoFormDto) -> Self {
        Self {
            title: dto.title.trim().to_string(),
            url: dto.url.trim().to_string(),
            description: dto.description.filter(|d| !d.trim().is_empty()),
            status: dto.status.into(),
        }
    }
}
