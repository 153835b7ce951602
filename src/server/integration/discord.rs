//! Discord operations performed through the bot's HTTP handle.

use std::sync::Arc;

use serenity::{
    all::{ChannelType, GuildId, RoleId, UserId},
    builder::{CreateChannel, CreateMessage},
    http::Http,
};

use crate::server::error::integration::IntegrationError;

#[derive(Clone)]
pub struct DiscordClient {
    http: Arc<Http>,
    guild_id: Option<GuildId>,
}

impl DiscordClient {
    pub fn new(http: Arc<Http>, guild_id: Option<u64>) -> Self {
        Self {
            http,
            guild_id: guild_id.map(GuildId::new),
        }
    }

    /// Grants a guild role to a member. No-op when no guild is configured.
    pub async fn add_role(&self, user_id: u64, role_id: u64) -> Result<(), IntegrationError> {
        let Some(guild_id) = self.guild_id else {
            tracing::debug!("No Discord guild configured, skipping role assignment");
            return Ok(());
        };

        self.http
            .add_member_role(
                guild_id,
                UserId::new(user_id),
                RoleId::new(role_id),
                Some("Membership activated"),
            )
            .await?;
        Ok(())
    }

    /// Removes a guild role from a member. No-op when no guild is configured.
    pub async fn remove_role(&self, user_id: u64, role_id: u64) -> Result<(), IntegrationError> {
        let Some(guild_id) = self.guild_id else {
            tracing::debug!("No Discord guild configured, skipping role removal");
            return Ok(());
        };

        self.http
            .remove_member_role(
                guild_id,
                UserId::new(user_id),
                RoleId::new(role_id),
                Some("Membership ended"),
            )
            .await?;
        Ok(())
    }

    /// Creates a text channel in the configured guild.
    ///
    /// # Returns
    /// - `Ok(Some(channel_id))` - Channel created
    /// - `Ok(None)` - No guild configured
    /// - `Err(IntegrationError::Discord(_))` - Discord rejected the request
    pub async fn create_text_channel(
        &self,
        name: &str,
        topic: Option<&str>,
    ) -> Result<Option<u64>, IntegrationError> {
        let Some(guild_id) = self.guild_id else {
            return Ok(None);
        };

        let mut builder = CreateChannel::new(name).kind(ChannelType::Text);
        if let Some(topic) = topic {
            builder = builder.topic(topic);
        }

        let channel = guild_id.create_channel(self.http.as_ref(), builder).await?;
        Ok(Some(channel.id.get()))
    }

    /// Sends a direct message to a user.
    pub async fn send_dm(&self, user_id: u64, content: &str) -> Result<(), IntegrationError> {
        UserId::new(user_id)
            .direct_message(self.http.as_ref(), CreateMessage::new().content(content))
            .await?;
        Ok(())
    }
}
