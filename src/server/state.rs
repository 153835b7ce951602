//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and then cloned for each request handler
//! through Axum's state extraction. It includes:
//! - Database connection pool for data persistence
//! - HTTP client for external API requests
//! - OAuth2 client for Discord authentication
//! - Admin code service for bootstrapping the first admin
//! - Hosted-service integrations (payments, calendar, email, blob storage, Discord bot)
//! - Application URL and coach call slot length

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;

use super::{integration::Integrations, service::admin_code::AdminCodeService};

/// Type alias for the OAuth2 client configured for Discord authentication.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone: the connection pool, `reqwest::Client` and the
/// integration clients share their internals through `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DatabaseConnection,

    /// HTTP client for external API requests, configured without redirects.
    pub http_client: reqwest::Client,

    /// OAuth2 client for the Discord login flow.
    pub oauth_client: OAuth2Client,

    /// Discord REST base URL used to fetch the logged in user.
    pub discord_api_url: String,

    /// One-time admin bootstrap codes.
    pub admin_code_service: AdminCodeService,

    /// Hosted-service clients. Absent integrations are `None`.
    pub integrations: Integrations,

    /// Application base URL for OAuth redirects, checkout return URLs and ticket links.
    pub app_url: String,

    /// Length of a coach call slot in minutes.
    pub coach_call_minutes: i64,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        oauth_client: OAuth2Client,
        discord_api_url: String,
        admin_code_service: AdminCodeService,
        integrations: Integrations,
        app_url: String,
        coach_call_minutes: i64,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
            discord_api_url,
            admin_code_service,
            integrations,
            app_url,
            coach_call_minutes,
        }
    }
}
