use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::{
    all::{Client, GatewayIntents},
    http::Http,
};

use crate::server::{bot::handler::Handler, config::DiscordBotConfig, error::AppError};

/// Builds the Discord bot client without connecting it.
///
/// The returned `Http` handle is usable immediately for REST calls, before the gateway
/// connection is up.
///
/// # Arguments
/// - `config` - Bot token and guild
/// - `db` - Database connection for event handlers
///
/// # Returns
/// - `Ok((Client, Arc<Http>))` - Client to pass to [`start_bot`] and its HTTP handle
/// - `Err(AppError::DiscordErr)` - Client construction failed
pub async fn init_bot(
    config: &DiscordBotConfig,
    db: DatabaseConnection,
) -> Result<(Client, Arc<Http>), AppError> {
    // GUILD_MEMBERS is privileged and must be enabled in the Developer Portal
    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MEMBERS;

    let client = Client::builder(&config.token, intents)
        .event_handler(Handler::new(db, config.guild_id))
        .await?;
    let http = client.http.clone();

    Ok((client, http))
}

/// Runs the gateway connection until it shuts down.
///
/// Call from a spawned task; this does not return while the bot is connected.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot");

    client.start().await?;

    Ok(())
}
