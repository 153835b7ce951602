//! Admin file uploads to blob storage.

use crate::server::{error::AppError, integration::Integrations};

const UPLOAD_PREFIX: &str = "uploads";

pub struct UploadService<'a> {
    pub integrations: &'a Integrations,
}

impl<'a> UploadService<'a> {
    pub fn new(integrations: &'a Integrations) -> Self {
        Self { integrations }
    }

    /// Stores `body` under `uploads/{filename}` and returns the public URL.
    ///
    /// # Returns
    /// - `Ok(String)` - Public URL of the stored file
    /// - `Err(AppError::BadRequest)` - Empty body or unusable file name
    /// - `Err(AppError::InternalError)` - Blob storage is not configured
    /// - `Err(AppError::IntegrationErr)` - Blob storage rejected the upload
    pub async fn upload(
        &self,
        filename: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError> {
        if body.is_empty() {
            return Err(AppError::BadRequest("Upload body is empty".to_string()));
        }

        let filename = sanitize_filename(filename)
            .ok_or_else(|| AppError::BadRequest("A file name is required".to_string()))?;

        let Some(blob) = self.integrations.blob.as_ref() else {
            return Err(AppError::InternalError(
                "Upload requested but blob storage is not configured".to_string(),
            ));
        };

        let size = body.len();
        let url = blob
            .put(&format!("{}/{}", UPLOAD_PREFIX, filename), body, content_type)
            .await?;
        tracing::info!("Uploaded {} ({} bytes)", filename, size);

        Ok(url)
    }
}

/// Keeps the last path segment of `filename`, replacing characters outside
/// `[A-Za-z0-9._-]` with `-`.
fn sanitize_filename(filename: &str) -> Option<String> {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        None
    } else {
        Some(cleaned)
    }
}
