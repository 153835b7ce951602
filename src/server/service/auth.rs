//! Discord OAuth2 login.

use oauth2::{AuthorizationCode, CsrfToken, Scope, TokenResponse};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use url::Url;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{UpsertUserParam, User},
    state::OAuth2Client,
};

/// Fields of Discord's `GET /users/@me` response used to build a user.
#[derive(Debug, Deserialize)]
struct DiscordProfile {
    id: String,
    username: String,
    global_name: Option<String>,
    email: Option<String>,
}

impl DiscordProfile {
    fn display_name(&self) -> String {
        self.global_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| self.username.clone())
    }
}

/// Orchestrates the Discord OAuth2 flow and the local user record.
pub struct AuthService<'a> {
    pub db: &'a DatabaseConnection,
    pub http_client: &'a reqwest::Client,
    pub oauth_client: &'a OAuth2Client,
    /// Discord REST base URL, e.g. `https://discord.com/api`.
    pub discord_api_url: &'a str,
}

impl<'a> AuthService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        http_client: &'a reqwest::Client,
        oauth_client: &'a OAuth2Client,
        discord_api_url: &'a str,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
            discord_api_url,
        }
    }

    /// Builds the Discord consent URL requesting the `identify` and `email` scopes.
    ///
    /// # Returns
    /// - `(Url, CsrfToken)` - Redirect target and the state token to keep in the session
    pub fn login_url(&self) -> (Url, CsrfToken) {
        self.oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("identify".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .url()
    }

    /// Completes login: exchanges the code, fetches the profile and upserts the user.
    ///
    /// # Arguments
    /// - `authorization_code` - `code` query parameter from the callback
    /// - `set_admin` - Grant admin, only when a bootstrap code was validated at login
    ///
    /// # Returns
    /// - `Ok(User)` - The logged in user
    /// - `Err(AppError::AuthErr(TokenExchange))` - Discord rejected the code
    /// - `Err(AppError::ReqwestErr)` - Profile request failed
    pub async fn callback(
        &self,
        authorization_code: String,
        set_admin: bool,
    ) -> Result<User, AppError> {
        let token = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(authorization_code))
            .request_async(self.http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        let profile = self
            .fetch_profile(token.access_token().secret())
            .await?;

        let user = UserRepository::new(self.db)
            .upsert(UpsertUserParam {
                name: profile.display_name(),
                discord_id: profile.id,
                email: profile.email,
                is_admin: set_admin.then_some(true),
            })
            .await?;

        if set_admin {
            tracing::info!("User {} ({}) has been set as admin", user.name, user.id);
        }

        Ok(user)
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<DiscordProfile, AppError> {
        let profile = self
            .http_client
            .get(format!(
                "{}/users/@me",
                self.discord_api_url.trim_end_matches('/')
            ))
            .bearer_auth(access_token)
            .send()
            .await?
            .error_for_status()?
            .json::<DiscordProfile>()
            .await?;

        Ok(profile)
    }
}
