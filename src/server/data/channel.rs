//! Channel and video repository.

use chrono::Utc;
use entity::sea_orm_active_enums::PublishStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::channel::{Channel, ChannelParams, Video, VideoParams};

pub struct ChannelRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ChannelRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: ChannelParams) -> Result<Channel, DbErr> {
        let entity = entity::channel::ActiveModel {
            name: ActiveValue::Set(params.name),
            slug: ActiveValue::Set(params.slug),
            description: ActiveValue::Set(params.description),
            min_tier: ActiveValue::Set(params.min_tier),
            discord_channel_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Channel::from_entity(entity))
    }

    pub async fn update(&self, id: i32, params: ChannelParams) -> Result<Option<Channel>, DbErr> {
        let Some(entity) = entity::prelude::Channel::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::channel::ActiveModel = entity.into();
        active.name = ActiveValue::Set(params.name);
        active.slug = ActiveValue::Set(params.slug);
        active.description = ActiveValue::Set(params.description);
        active.min_tier = ActiveValue::Set(params.min_tier);
        let entity = active.update(self.db).await?;

        Ok(Some(Channel::from_entity(entity)))
    }

    /// Records the Discord text channel created for a channel.
    pub async fn set_discord_channel(&self, id: i32, discord_channel_id: u64) -> Result<(), DbErr> {
        entity::prelude::Channel::update_many()
            .set(entity::channel::ActiveModel {
                discord_channel_id: ActiveValue::Set(Some(discord_channel_id.to_string())),
                ..Default::default()
            })
            .filter(entity::channel::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes a channel and its videos.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        entity::prelude::Video::delete_many()
            .filter(entity::video::Column::ChannelId.eq(id))
            .exec(self.db)
            .await?;
        let result = entity::prelude::Channel::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Channel>, DbErr> {
        let entity = entity::prelude::Channel::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Channel::from_entity))
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Channel>, DbErr> {
        let entity = entity::prelude::Channel::find()
            .filter(entity::channel::Column::Slug.eq(slug))
            .one(self.db)
            .await?;

        Ok(entity.map(Channel::from_entity))
    }

    pub async fn slug_taken(&self, slug: &str, except_id: Option<i32>) -> Result<bool, DbErr> {
        let mut query =
            entity::prelude::Channel::find().filter(entity::channel::Column::Slug.eq(slug));
        if let Some(id) = except_id {
            query = query.filter(entity::channel::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Gets every channel ordered by name.
    pub async fn get_all(&self) -> Result<Vec<Channel>, DbErr> {
        let channels = entity::prelude::Channel::find()
            .order_by_asc(entity::channel::Column::Name)
            .all(self.db)
            .await?;

        Ok(channels.into_iter().map(Channel::from_entity).collect())
    }

    pub async fn create_video(&self, channel_id: i32, params: VideoParams) -> Result<Video, DbErr> {
        let now = Utc::now();
        let published_at = (params.status == PublishStatus::Published).then_some(now);

        let entity = entity::video::ActiveModel {
            channel_id: ActiveValue::Set(channel_id),
            title: ActiveValue::Set(params.title),
            url: ActiveValue::Set(params.url),
            description: ActiveValue::Set(params.description),
            status: ActiveValue::Set(params.status),
            published_at: ActiveValue::Set(published_at),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Video::from_entity(entity))
    }

    pub async fn update_video(&self, id: i32, params: VideoParams) -> Result<Option<Video>, DbErr> {
        let Some(entity) = entity::prelude::Video::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let published_at = match entity.published_at {
            Some(at) => Some(at),
            None => (params.status == PublishStatus::Published).then(Utc::now),
        };

        let mut active: entity::video::ActiveModel = entity.into();
        active.title = ActiveValue::Set(params.title);
        active.url = ActiveValue::Set(params.url);
        active.description = ActiveValue::Set(params.description);
        active.status = ActiveValue::Set(params.status);
        active.published_at = ActiveValue::Set(published_at);
        let entity = active.update(self.db).await?;

        Ok(Some(Video::from_entity(entity)))
    }

    pub async fn delete_video(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Video::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    /// Videos of a channel, newest first.
    ///
    /// # Arguments
    /// - `channel_id` - Channel to list
    /// - `published_only` - Restrict to published videos
    pub async fn get_videos(
        &self,
        channel_id: i32,
        published_only: bool,
    ) -> Result<Vec<Video>, DbErr> {
        let mut query =
            entity::prelude::Video::find().filter(entity::video::Column::ChannelId.eq(channel_id));
        if published_only {
            query = query.filter(entity::video::Column::Status.eq(PublishStatus::Published));
        }

        let videos = query
            .order_by_desc(entity::video::Column::CreatedAt)
            .order_by_desc(entity::video::Column::Id)
            .all(self.db)
            .await?;

        Ok(videos.into_iter().map(Video::from_entity).collect())
    }
}
