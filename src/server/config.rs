//! Environment-based application configuration.
//!
//! Required variables fail startup when missing. Each hosted-service integration is an
//! optional sub-config that is only present when all of its credentials are set.

use std::net::SocketAddr;

use crate::server::error::{config::ConfigError, AppError};

const DISCORD_AUTH_URL: &str = "https://discord.com/oauth2/authorize";
const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";
const DISCORD_API_URL: &str = "https://discord.com/api";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_STRIPE_API_URL: &str = "https://api.stripe.com";
const DEFAULT_CALENDAR_API_URL: &str = "https://www.googleapis.com/calendar/v3";
const DEFAULT_GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";
const DEFAULT_BLOB_API_URL: &str = "https://blob.vercel-storage.com";
const DEFAULT_COACH_CALL_MINUTES: i64 = 30;

pub struct Config {
    pub database_url: String,
    pub app_url: String,
    pub bind_addr: SocketAddr,
    pub cors_origins: Vec<String>,

    pub discord_client_id: String,
    pub discord_client_secret: String,
    pub discord_redirect_url: String,

    pub discord_auth_url: String,
    pub discord_token_url: String,
    pub discord_api_url: String,

    pub discord_bot: Option<DiscordBotConfig>,
    pub stripe: Option<StripeConfig>,
    pub calendar: Option<CalendarConfig>,
    pub email: Option<EmailConfig>,
    pub blob: Option<BlobConfig>,

    /// Length of a coach call slot in minutes.
    pub coach_call_minutes: i64,
}

#[derive(Clone, Debug)]
pub struct DiscordBotConfig {
    pub token: String,
    /// Guild where member roles and community channels live.
    pub guild_id: Option<u64>,
}

#[derive(Clone, Debug)]
pub struct StripeConfig {
    pub secret_key: String,
    /// Signing secret for webhook verification. Webhooks are rejected when unset.
    pub webhook_secret: Option<String>,
    pub api_url: String,
}

#[derive(Clone, Debug)]
pub struct CalendarConfig {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub calendar_id: String,
    pub api_url: String,
    pub token_url: String,
}

#[derive(Clone, Debug)]
pub struct EmailConfig {
    pub api_key: String,
    pub from: String,
    pub api_url: String,
}

#[derive(Clone, Debug)]
pub struct BlobConfig {
    pub token: String,
    pub api_url: String,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and optional ones parsed
    /// - `Err(AppError::ConfigErr(_))` - A required variable is missing or a value is invalid
    pub fn from_env() -> Result<Self, AppError> {
        let bind_addr = optional("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                name: "BIND_ADDR".to_string(),
                reason: e.to_string(),
            })?;

        let cors_origins = optional("CORS_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let coach_call_minutes = match optional("COACH_CALL_MINUTES") {
            Some(value) => parse_positive("COACH_CALL_MINUTES", &value)?,
            None => DEFAULT_COACH_CALL_MINUTES,
        };

        let discord_bot = match optional("DISCORD_BOT_TOKEN") {
            Some(token) => {
                let guild_id = match optional("DISCORD_GUILD_ID") {
                    Some(value) => Some(value.parse::<u64>().map_err(|e| {
                        ConfigError::InvalidEnvVar {
                            name: "DISCORD_GUILD_ID".to_string(),
                            reason: e.to_string(),
                        }
                    })?),
                    None => None,
                };
                Some(DiscordBotConfig { token, guild_id })
            }
            None => None,
        };

        let stripe = optional("STRIPE_SECRET_KEY").map(|secret_key| StripeConfig {
            secret_key,
            webhook_secret: optional("STRIPE_WEBHOOK_SECRET"),
            api_url: optional("STRIPE_API_URL")
                .unwrap_or_else(|| DEFAULT_STRIPE_API_URL.to_string()),
        });

        let calendar = match (
            optional("GOOGLE_CLIENT_ID"),
            optional("GOOGLE_CLIENT_SECRET"),
            optional("GOOGLE_REFRESH_TOKEN"),
            optional("GOOGLE_CALENDAR_ID"),
        ) {
            (Some(client_id), Some(client_secret), Some(refresh_token), Some(calendar_id)) => {
                Some(CalendarConfig {
                    client_id,
                    client_secret,
                    refresh_token,
                    calendar_id,
                    api_url: optional("GOOGLE_CALENDAR_API_URL")
                        .unwrap_or_else(|| DEFAULT_CALENDAR_API_URL.to_string()),
                    token_url: optional("GOOGLE_TOKEN_URL")
                        .unwrap_or_else(|| DEFAULT_GOOGLE_TOKEN_URL.to_string()),
                })
            }
            _ => None,
        };

        let email = match (optional("RESEND_API_KEY"), optional("EMAIL_FROM")) {
            (Some(api_key), Some(from)) => Some(EmailConfig {
                api_key,
                from,
                api_url: optional("RESEND_API_URL")
                    .unwrap_or_else(|| DEFAULT_RESEND_API_URL.to_string()),
            }),
            _ => None,
        };

        let blob = optional("BLOB_READ_WRITE_TOKEN").map(|token| BlobConfig {
            token,
            api_url: optional("BLOB_API_URL").unwrap_or_else(|| DEFAULT_BLOB_API_URL.to_string()),
        });

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            app_url: required("APP_URL")?.trim_end_matches('/').to_string(),
            bind_addr,
            cors_origins,
            discord_client_id: required("DISCORD_CLIENT_ID")?,
            discord_client_secret: required("DISCORD_CLIENT_SECRET")?,
            discord_redirect_url: required("DISCORD_REDIRECT_URL")?,
            discord_auth_url: DISCORD_AUTH_URL.to_string(),
            discord_token_url: DISCORD_TOKEN_URL.to_string(),
            discord_api_url: DISCORD_API_URL.to_string(),
            discord_bot,
            stripe,
            calendar,
            email,
            blob,
            coach_call_minutes,
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    optional(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

/// Reads a variable, treating empty values as unset.
fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_positive(name: &str, value: &str) -> Result<i64, ConfigError> {
    match value.parse::<i64>() {
        Ok(parsed) if parsed > 0 => Ok(parsed),
        Ok(_) => Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: "must be greater than zero".to_string(),
        }),
        Err(e) => Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: e.to_string(),
        }),
    }
}
