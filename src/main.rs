mod model;
mod server;

use tracing_subscriber::EnvFilter;

use crate::server::{
    bot, config::Config, error::AppError, integration::Integrations, router,
    scheduler::maintenance, service::admin_code::AdminCodeService, startup, state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("memberhub=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db, &config).await?;
    let http_client = startup::setup_reqwest_client()?;
    let oauth_client = startup::setup_oauth_client(&config)?;

    let admin_code_service = AdminCodeService::new();

    // Bot is optional; without it role sync and channel notifications are skipped
    let discord_http = match &config.discord_bot {
        Some(bot_config) => {
            let (bot_client, discord_http) = bot::start::init_bot(bot_config, db.clone()).await?;

            tokio::spawn(async move {
                if let Err(e) = bot::start::start_bot(bot_client).await {
                    tracing::error!("Discord bot error: {}", e);
                }
            });

            Some(discord_http)
        }
        None => {
            tracing::info!("DISCORD_BOT_TOKEN not set, Discord bot disabled");
            None
        }
    };

    let integrations = Integrations::from_config(&config, &http_client, discord_http)?;
    tracing::info!("Enabled integrations: {:?}", integrations.enabled());

    startup::check_for_admin(&db, &config, &admin_code_service).await?;

    let _scheduler =
        maintenance::start_scheduler(db.clone(), integrations.clone(), config.app_url.clone())
            .await?;

    let state = AppState::new(
        db,
        http_client,
        oauth_client,
        config.discord_api_url.clone(),
        admin_code_service,
        integrations,
        config.app_url.clone(),
        config.coach_call_minutes,
    );
    let app = router::app(state, session, &config.cors_origins);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
