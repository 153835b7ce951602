//! Channel and video factories.

use crate::factory::helpers::next_id;
use chrono::Utc;
use entity::sea_orm_active_enums::{PublishStatus, TierLevel};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a channel with the given minimum tier.
pub async fn create_channel(
    db: &DatabaseConnection,
    min_tier: TierLevel,
) -> Result<entity::channel::Model, DbErr> {
    let id = next_id();
    entity::channel::ActiveModel {
        name: ActiveValue::Set(format!("Channel {}", id)),
        slug: ActiveValue::Set(format!("channel-{}", id)),
        description: ActiveValue::Set(None),
        min_tier: ActiveValue::Set(min_tier),
        discord_channel_id: ActiveValue::Set(None),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Creates a video in a channel with the given status.
pub async fn create_video(
    db: &DatabaseConnection,
    channel_id: i32,
    status: PublishStatus,
) -> Result<entity::video::Model, DbErr> {
    let id = next_id();
    let now = Utc::now();
    entity::video::ActiveModel {
        channel_id: ActiveValue::Set(channel_id),
        title: ActiveValue::Set(format!("Video {}", id)),
        url: ActiveValue::Set(format!("https://videos.example.com/{}", id)),
        description: ActiveValue::Set(None),
        published_at: ActiveValue::Set(match status {
            PublishStatus::Published => Some(now),
            _ => None,
        }),
        status: ActiveValue::Set(status),
        created_at: ActiveValue::Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}
