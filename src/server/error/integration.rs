use thiserror::Error;

/// Errors raised by clients of hosted services.
#[derive(Error, Debug)]
pub enum IntegrationError {
    /// Transport failure or undecodable response body.
    #[error("{service} request failed: {source}")]
    Http {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Service answered with a non-success status.
    #[error("{service} returned {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// Google OAuth refresh-token exchange failed.
    #[error("Failed to obtain calendar access token: {0}")]
    Token(String),

    /// QR code could not be encoded.
    #[error("Failed to render QR code: {0}")]
    Qr(#[from] qrcode::types::QrError),

    /// Discord API error.
    #[error("Discord request failed: {0}")]
    Discord(#[from] Box<serenity::Error>),

    /// Payload received from a service is missing required data.
    #[error("{service} response invalid: {reason}")]
    InvalidResponse {
        service: &'static str,
        reason: String,
    },
}

impl From<serenity::Error> for IntegrationError {
    fn from(err: serenity::Error) -> Self {
        IntegrationError::Discord(Box::new(err))
    }
}

impl IntegrationError {
    /// Wraps a reqwest error with the service it came from.
    pub fn http(service: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| IntegrationError::Http { service, source }
    }
}
