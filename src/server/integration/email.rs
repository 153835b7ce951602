//! Transactional email through the Resend API.

use serde::Serialize;

use crate::server::{
    config::EmailConfig, error::integration::IntegrationError, integration::ensure_success,
};

const SERVICE: &str = "email";

#[derive(Clone)]
pub struct EmailClient {
    http: reqwest::Client,
    api_key: String,
    from: String,
    api_url: String,
}

pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

impl EmailClient {
    pub fn new(http: reqwest::Client, config: &EmailConfig) -> Self {
        Self {
            http,
            api_key: config.api_key.clone(),
            from: config.from.clone(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn send(&self, message: EmailMessage) -> Result<(), IntegrationError> {
        let response = self
            .http
            .post(format!("{}/emails", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&SendEmailRequest {
                from: &self.from,
                to: [&message.to],
                subject: &message.subject,
                html: &message.html,
            })
            .send()
            .await
            .map_err(IntegrationError::http(SERVICE))?;

        ensure_success(SERVICE, response).await?;
        Ok(())
    }
}
