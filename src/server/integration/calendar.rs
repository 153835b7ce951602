//! Google Calendar client: free/busy lookups and event management for coach calls.
//!
//! Authenticates with a long-lived refresh token exchanged through `oauth2`. Access
//! tokens are cached until shortly before they expire.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::{DateTime, Utc};
use oauth2::{
    basic::BasicClient, ClientId, ClientSecret, EndpointNotSet, EndpointSet, RefreshToken,
    TokenResponse, TokenUrl,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::server::{
    config::CalendarConfig,
    error::{config::ConfigError, integration::IntegrationError, AppError},
    integration::ensure_success,
};

const SERVICE: &str = "calendar";

/// Tokens are refreshed this long before Google's reported expiry.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

type GoogleOAuthClient =
    BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

#[derive(Clone)]
struct CachedToken {
    secret: String,
    expires_at: Instant,
}

#[derive(Clone)]
pub struct CalendarClient {
    http: reqwest::Client,
    oauth: GoogleOAuthClient,
    refresh_token: RefreshToken,
    calendar_id: String,
    api_url: String,
    token: Arc<RwLock<Option<CachedToken>>>,
}

/// Event to create on the coach calendar.
pub struct NewCalendarEvent {
    pub summary: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub attendee_email: Option<String>,
    /// Idempotency key for the Meet conference request.
    pub request_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatedCalendarEvent {
    pub id: String,
    pub meeting_url: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FreeBusyRequest<'a> {
    time_min: DateTime<Utc>,
    time_max: DateTime<Utc>,
    items: Vec<FreeBusyItem<'a>>,
}

#[derive(Serialize)]
struct FreeBusyItem<'a> {
    id: &'a str,
}

#[derive(Deserialize)]
struct FreeBusyResponse {
    #[serde(default)]
    calendars: std::collections::HashMap<String, FreeBusyCalendar>,
}

#[derive(Deserialize)]
struct FreeBusyCalendar {
    #[serde(default)]
    busy: Vec<serde_json::Value>,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventResponse {
    id: String,
    hangout_link: Option<String>,
    html_link: Option<String>,
}

impl CalendarClient {
    /// Builds a client from configuration.
    ///
    /// # Returns
    /// - `Ok(CalendarClient)` - Client ready to request tokens lazily
    /// - `Err(AppError::ConfigErr(_))` - `GOOGLE_TOKEN_URL` is not a valid URL
    pub fn new(http: reqwest::Client, config: &CalendarConfig) -> Result<Self, AppError> {
        let token_url =
            TokenUrl::new(config.token_url.clone()).map_err(|e| ConfigError::InvalidEnvVar {
                name: "GOOGLE_TOKEN_URL".to_string(),
                reason: e.to_string(),
            })?;

        let oauth = BasicClient::new(ClientId::new(config.client_id.clone()))
            .set_client_secret(ClientSecret::new(config.client_secret.clone()))
            .set_token_uri(token_url);

        Ok(Self {
            http,
            oauth,
            refresh_token: RefreshToken::new(config.refresh_token.clone()),
            calendar_id: config.calendar_id.clone(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Returns whether the coach calendar has no busy blocks in `[start, end)`.
    pub async fn is_free(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<bool, IntegrationError> {
        let token = self.access_token().await?;

        let response = self
            .http
            .post(format!("{}/freeBusy", self.api_url))
            .bearer_auth(token)
            .json(&FreeBusyRequest {
                time_min: start,
                time_max: end,
                items: vec![FreeBusyItem {
                    id: &self.calendar_id,
                }],
            })
            .send()
            .await
            .map_err(IntegrationError::http(SERVICE))?;

        let body = ensure_success(SERVICE, response)
            .await?
            .json::<FreeBusyResponse>()
            .await
            .map_err(IntegrationError::http(SERVICE))?;

        let Some(calendar) = body.calendars.get(&self.calendar_id) else {
            return Err(IntegrationError::InvalidResponse {
                service: SERVICE,
                reason: format!("no free/busy data for calendar {}", self.calendar_id),
            });
        };

        if !calendar.errors.is_empty() {
            return Err(IntegrationError::InvalidResponse {
                service: SERVICE,
                reason: format!("free/busy errors: {:?}", calendar.errors),
            });
        }

        Ok(calendar.busy.is_empty())
    }

    /// Creates an event with a Meet conference on the coach calendar.
    pub async fn create_event(
        &self,
        event: NewCalendarEvent,
    ) -> Result<CreatedCalendarEvent, IntegrationError> {
        let token = self.access_token().await?;

        let attendees: Vec<serde_json::Value> = event
            .attendee_email
            .iter()
            .map(|email| serde_json::json!({ "email": email }))
            .collect();

        let body = serde_json::json!({
            "summary": event.summary,
            "description": event.description,
            "start": { "dateTime": event.start.to_rfc3339() },
            "end": { "dateTime": event.end.to_rfc3339() },
            "attendees": attendees,
            "conferenceData": {
                "createRequest": {
                    "requestId": event.request_id,
                    "conferenceSolutionKey": { "type": "hangoutsMeet" }
                }
            }
        });

        let response = self
            .http
            .post(format!("{}/events", self.calendar_url()))
            .query(&[("conferenceDataVersion", "1")])
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(IntegrationError::http(SERVICE))?;

        let created = ensure_success(SERVICE, response)
            .await?
            .json::<EventResponse>()
            .await
            .map_err(IntegrationError::http(SERVICE))?;

        Ok(CreatedCalendarEvent {
            id: created.id,
            meeting_url: created.hangout_link.or(created.html_link),
        })
    }

    /// Deletes an event from the coach calendar. Already-deleted events count as success.
    pub async fn delete_event(&self, event_id: &str) -> Result<(), IntegrationError> {
        let token = self.access_token().await?;

        let response = self
            .http
            .delete(format!("{}/events/{}", self.calendar_url(), encode(event_id)))
            .bearer_auth(token)
            .send()
            .await
            .map_err(IntegrationError::http(SERVICE))?;

        if response.status() == reqwest::StatusCode::GONE
            || response.status() == reqwest::StatusCode::NOT_FOUND
        {
            return Ok(());
        }

        ensure_success(SERVICE, response).await?;
        Ok(())
    }

    fn calendar_url(&self) -> String {
        format!("{}/calendars/{}", self.api_url, encode(&self.calendar_id))
    }

    async fn access_token(&self) -> Result<String, IntegrationError> {
        if let Some(cached) = self.token.read().await.as_ref() {
            if cached.expires_at > Instant::now() + TOKEN_REFRESH_MARGIN {
                return Ok(cached.secret.clone());
            }
        }

        let response = self
            .oauth
            .exchange_refresh_token(&self.refresh_token)
            .request_async(&self.http)
            .await
            .map_err(|e| IntegrationError::Token(e.to_string()))?;

        let secret = response.access_token().secret().clone();
        let lifetime = response.expires_in().unwrap_or(Duration::from_secs(3600));

        *self.token.write().await = Some(CachedToken {
            secret: secret.clone(),
            expires_at: Instant::now() + lifetime,
        });

        Ok(secret)
    }
}

fn encode(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes()).collect()
}
