use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use entity::sea_orm_active_enums::TierLevel;
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No user ID is stored in the session.
    #[error("User not found in session")]
    UserNotInSession,

    /// Session references a user that no longer exists.
    #[error("User {0} from session not found in database")]
    UserNotInDatabase(i32),

    /// User is authenticated but lacks the required role.
    ///
    /// # Fields
    /// - ID of the user
    /// - Description of the denied action, logged only
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),

    /// User's effective tier is below the tier required by the resource.
    #[error("User {user_id} has tier {actual:?}, {required:?} required")]
    InsufficientTier {
        user_id: i32,
        required: TierLevel,
        actual: TierLevel,
    },

    /// CSRF state validation failed during OAuth callback.
    ///
    /// The CSRF state token in the OAuth callback URL does not match the token stored
    /// in the session, indicating a potential CSRF attack or an invalid callback request.
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,

    /// Exchanging the OAuth authorization code with Discord failed.
    #[error("Failed to exchange OAuth code: {0}")]
    TokenExchange(String),
}

/// Converts authentication errors into HTTP responses.
///
/// - `UserNotInSession` / `UserNotInDatabase` -> 401 Unauthorized
/// - `AccessDenied` / `InsufficientTier` -> 403 Forbidden
/// - `CsrfValidationFailed` -> 400 Bad Request
/// - `TokenExchange` -> 500 Internal Server Error
///
/// Details are logged at debug level while client-facing messages stay generic.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) => (
                StatusCode::UNAUTHORIZED,
                "You must be logged in to do that.".to_string(),
            ),
            Self::AccessDenied(_, _) => (
                StatusCode::FORBIDDEN,
                "You don't have permission to do that.".to_string(),
            ),
            Self::InsufficientTier { required, .. } => (
                StatusCode::FORBIDDEN,
                format!("This requires the {} tier or higher.", tier_name(required)),
            ),
            Self::CsrfValidationFailed => (
                StatusCode::BAD_REQUEST,
                "There was an issue logging you in, please try again.".to_string(),
            ),
            Self::TokenExchange(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(ErrorDto { error: message })).into_response()
    }
}

fn tier_name(tier: TierLevel) -> &'static str {
    match tier {
        TierLevel::Free => "free",
        TierLevel::Pro => "pro",
        TierLevel::ProPlus => "pro+",
    }
}
