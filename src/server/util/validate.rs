//! Form validation shared by admin CRUD services.
//!
//! Every check fails with `AppError::BadRequest` naming the offending field.

use url::Url;

use crate::server::error::AppError;

pub fn require_non_blank(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{} is required", field)));
    }
    Ok(())
}

/// Slugs are non-empty and limited to lower-case ASCII letters, digits and `-`.
pub fn require_slug(value: &str) -> Result<(), AppError> {
    require_non_blank("Slug", value)?;

    let valid = value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid {
        return Err(AppError::BadRequest(format!(
            "Slug '{}' may only contain a-z, 0-9 and '-'",
            value
        )));
    }
    Ok(())
}

/// Accepts absolute `http` or `https` URLs.
pub fn require_http_url(field: &str, value: &str) -> Result<(), AppError> {
    require_non_blank(field, value)?;

    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => Ok(()),
        _ => Err(AppError::BadRequest(format!(
            "{} must be an http(s) URL",
            field
        ))),
    }
}
