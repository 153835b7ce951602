//! One-time admin bootstrap codes.
//!
//! When the application starts without any admin, a random code is generated and logged
//! as part of a login URL. Logging in through that URL within the TTL grants admin to the
//! user who completes the OAuth flow. The code is kept in memory only, is consumed on
//! first successful use and is discarded once expired.

use rand::Rng;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

const ADMIN_CODE_TTL: Duration = Duration::from_secs(60);
const ADMIN_CODE_LENGTH: usize = 32;
const ADMIN_CODE_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

struct IssuedCode {
    value: String,
    expires_at: Instant,
}

/// Shared holder of the current admin bootstrap code.
#[derive(Clone)]
pub struct AdminCodeService {
    current: Arc<RwLock<Option<IssuedCode>>>,
    ttl: Duration,
}

impl AdminCodeService {
    pub fn new() -> Self {
        Self::with_ttl(ADMIN_CODE_TTL)
    }

    /// Creates a service whose codes live for `ttl`.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            ttl,
        }
    }

    /// Generates a fresh code, replacing any previous one.
    ///
    /// # Returns
    /// - `String` - 32 alphanumeric characters
    pub async fn generate(&self) -> String {
        let mut rng = rand::rng();
        let value: String = (0..ADMIN_CODE_LENGTH)
            .map(|_| ADMIN_CODE_CHARSET[rng.random_range(0..ADMIN_CODE_CHARSET.len())] as char)
            .collect();

        *self.current.write().await = Some(IssuedCode {
            value: value.clone(),
            expires_at: Instant::now() + self.ttl,
        });

        value
    }

    /// Checks `input` against the current code and consumes it on match.
    ///
    /// An expired code is dropped and never matches. A wrong guess leaves a valid code
    /// in place.
    pub async fn validate_and_consume(&self, input: &str) -> bool {
        let mut current = self.current.write().await;

        let Some(code) = current.as_ref() else {
            return false;
        };

        if Instant::now() >= code.expires_at {
            *current = None;
            return false;
        }

        if code.value != input {
            return false;
        }

        *current = None;
        true
    }
}

impl Default for AdminCodeService {
    fn default() -> Self {
        Self::new()
    }
}
