//! Vercel Blob storage uploads.

use serde::Deserialize;

use crate::server::{
    config::BlobConfig, error::integration::IntegrationError, integration::ensure_success,
};

const SERVICE: &str = "blob";
const API_VERSION: &str = "7";

#[derive(Clone)]
pub struct BlobClient {
    http: reqwest::Client,
    token: String,
    api_url: String,
}

#[derive(Deserialize)]
struct PutBlobResponse {
    url: String,
}

impl BlobClient {
    pub fn new(http: reqwest::Client, config: &BlobConfig) -> Self {
        Self {
            http,
            token: config.token.clone(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Uploads `body` at `pathname` and returns the public URL.
    pub async fn put(
        &self,
        pathname: &str,
        body: impl Into<reqwest::Body>,
        content_type: &str,
    ) -> Result<String, IntegrationError> {
        let response = self
            .http
            .put(format!("{}/{}", self.api_url, pathname.trim_start_matches('/')))
            .bearer_auth(&self.token)
            .header("x-api-version", API_VERSION)
            .header("x-content-type", content_type)
            .header("x-add-random-suffix", "0")
            .body(body)
            .send()
            .await
            .map_err(IntegrationError::http(SERVICE))?;

        let uploaded = ensure_success(SERVICE, response)
            .await?
            .json::<PutBlobResponse>()
            .await
            .map_err(IntegrationError::http(SERVICE))?;

        Ok(uploaded.url)
    }
}
