//! Clients for hosted services.
//!
//! Every client is optional: an integration whose credentials are absent from the
//! configuration is `None` in [`Integrations`], and best-effort callers skip it with a
//! debug log. All HTTP clients share the application's `reqwest::Client` and take their
//! base URL from configuration.

pub mod blob;
pub mod calendar;
pub mod discord;
pub mod email;
pub mod qr;
pub mod stripe;

use std::sync::Arc;

use serenity::http::Http;

use crate::server::{
    config::Config,
    error::{integration::IntegrationError, AppError},
};

use self::{
    blob::BlobClient, calendar::CalendarClient, discord::DiscordClient, email::EmailClient,
    stripe::StripeClient,
};

/// Set of configured hosted-service clients.
#[derive(Clone, Default)]
pub struct Integrations {
    pub stripe: Option<StripeClient>,
    pub calendar: Option<CalendarClient>,
    pub email: Option<EmailClient>,
    pub blob: Option<BlobClient>,
    pub discord: Option<DiscordClient>,
}

impl Integrations {
    /// Builds clients for every integration present in the configuration.
    ///
    /// # Arguments
    /// - `config` - Application configuration
    /// - `http_client` - Shared HTTP client used by all REST integrations
    /// - `discord_http` - Bot HTTP handle, `None` when the bot is disabled
    ///
    /// # Returns
    /// - `Ok(Integrations)` - Configured clients
    /// - `Err(AppError::ConfigErr(_))` - An integration URL could not be parsed
    pub fn from_config(
        config: &Config,
        http_client: &reqwest::Client,
        discord_http: Option<Arc<Http>>,
    ) -> Result<Self, AppError> {
        let calendar = match &config.calendar {
            Some(calendar) => Some(CalendarClient::new(http_client.clone(), calendar)?),
            None => None,
        };

        let guild_id = config.discord_bot.as_ref().and_then(|bot| bot.guild_id);

        Ok(Self {
            stripe: config
                .stripe
                .as_ref()
                .map(|stripe| StripeClient::new(http_client.clone(), stripe)),
            calendar,
            email: config
                .email
                .as_ref()
                .map(|email| EmailClient::new(http_client.clone(), email)),
            blob: config
                .blob
                .as_ref()
                .map(|blob| BlobClient::new(http_client.clone(), blob)),
            discord: discord_http.map(|http| DiscordClient::new(http, guild_id)),
        })
    }

    /// Names of the enabled integrations, for the startup log line.
    pub fn enabled(&self) -> Vec<&'static str> {
        let mut enabled = Vec::new();
        if self.stripe.is_some() {
            enabled.push("stripe");
        }
        if self.calendar.is_some() {
            enabled.push("calendar");
        }
        if self.email.is_some() {
            enabled.push("email");
        }
        if self.blob.is_some() {
            enabled.push("blob");
        }
        if self.discord.is_some() {
            enabled.push("discord");
        }
        enabled
    }
}

/// Passes successful responses through and converts the rest into `IntegrationError::Status`.
pub(crate) async fn ensure_success(
    service: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, IntegrationError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(IntegrationError::Status {
        service,
        status: status.as_u16(),
        body,
    })
}
