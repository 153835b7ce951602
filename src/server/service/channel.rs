//! Community video channels and their videos.

use entity::sea_orm_active_enums::PublishStatus;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::channel::ChannelRepository,
    error::AppError,
    integration::Integrations,
    model::{
        channel::{Channel, ChannelParams, Video, VideoParams},
        user::Viewer,
    },
    util::validate::{require_http_url, require_non_blank, require_slug},
};

pub struct ChannelService<'a> {
    pub db: &'a DatabaseConnection,
    pub integrations: &'a Integrations,
}

impl<'a> ChannelService<'a> {
    pub fn new(db: &'a DatabaseConnection, integrations: &'a Integrations) -> Self {
        Self { db, integrations }
    }

    /// Creates a channel and, when the bot is configured, a matching Discord text channel.
    ///
    /// The Discord channel is best effort. Its id is stored only when creation succeeds.
    pub async fn create(&self, params: ChannelParams) -> Result<Channel, AppError> {
        self.validate(&params, None).await?;

        let repo = ChannelRepository::new(self.db);
        let mut channel = repo.create(params).await?;
        tracing::info!("Created channel {} ({})", channel.id, channel.slug);

        if let Some(discord_channel_id) = self.create_discord_channel(&channel).await {
            match repo.set_discord_channel(channel.id, discord_channel_id).await {
                Ok(()) => channel.discord_channel_id = Some(discord_channel_id.to_string()),
                Err(e) => tracing::warn!(
                    "Failed to store Discord channel for channel {}: {}",
                    channel.id,
                    e
                ),
            }
        }

        Ok(channel)
    }

    pub async fn update(&self, id: i32, params: ChannelParams) -> Result<Channel, AppError> {
        self.validate(&params, Some(id)).await?;

        ChannelRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Channel not found".to_string()))
    }

    /// Deletes a channel together with its videos.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !ChannelRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound("Channel not found".to_string()));
        }
        Ok(())
    }

    pub async fn get_all(&self) -> Result<Vec<Channel>, AppError> {
        Ok(ChannelRepository::new(self.db).get_all().await?)
    }

    /// Published videos of a channel the viewer's tier allows.
    pub async fn get_published_videos(
        &self,
        slug: &str,
        viewer: &Viewer,
    ) -> Result<(Channel, Vec<Video>), AppError> {
        let repo = ChannelRepository::new(self.db);

        let channel = repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound("Channel not found".to_string()))?;

        if !viewer.can_access(channel.min_tier) {
            return Err(AppError::Forbidden(
                "Upgrade your membership to watch this channel".to_string(),
            ));
        }

        let videos = repo.get_videos(channel.id, true).await?;
        Ok((channel, videos))
    }

    /// Every video of a channel, for the admin panel.
    pub async fn get_videos(&self, channel_id: i32) -> Result<Vec<Video>, AppError> {
        let repo = ChannelRepository::new(self.db);

        if repo.find_by_id(channel_id).await?.is_none() {
            return Err(AppError::NotFound("Channel not found".to_string()));
        }

        Ok(repo.get_videos(channel_id, false).await?)
    }

    pub async fn create_video(&self, channel_id: i32, params: VideoParams) -> Result<Video, AppError> {
        validate_video(&params)?;

        let repo = ChannelRepository::new(self.db);
        if repo.find_by_id(channel_id).await?.is_none() {
            return Err(AppError::NotFound("Channel not found".to_string()));
        }

        let video = repo.create_video(channel_id, params).await?;
        if video.status == PublishStatus::Published {
            tracing::info!("Published video {} in channel {}", video.id, channel_id);
        }

        Ok(video)
    }

    pub async fn update_video(&self, id: i32, params: VideoParams) -> Result<Video, AppError> {
        validate_video(&params)?;

        ChannelRepository::new(self.db)
            .update_video(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))
    }

    pub async fn delete_video(&self, id: i32) -> Result<(), AppError> {
        if !ChannelRepository::new(self.db).delete_video(id).await? {
            return Err(AppError::NotFound("Video not found".to_string()));
        }
        Ok(())
    }

    async fn create_discord_channel(&self, channel: &Channel) -> Option<u64> {
        let Some(discord) = self.integrations.discord.as_ref() else {
            tracing::debug!("Discord disabled, not creating a text channel for {}", channel.slug);
            return None;
        };

        match discord
            .create_text_channel(&channel.slug, channel.description.as_deref())
            .await
        {
            Ok(created) => created,
            Err(e) => {
                tracing::warn!(
                    "Failed to create Discord channel for channel {}: {}",
                    channel.id,
                    e
                );
                None
            }
        }
    }

    async fn validate(&self, params: &ChannelParams, except_id: Option<i32>) -> Result<(), AppError> {
        require_non_blank("name", &params.name)?;
        require_slug(&params.slug)?;

        if ChannelRepository::new(self.db)
            .slug_taken(&params.slug, except_id)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "A channel with slug '{}' already exists",
                params.slug
            )));
        }

        Ok(())
    }
}

fn validate_video(params: &VideoParams) -> Result<(), AppError> {
    require_non_blank("title", &params.title)?;
    require_http_url("url", &params.url)
}
