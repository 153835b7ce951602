use crate::server::error::{internal::InternalError, AppError};

/// Parses a Discord snowflake stored as a string.
///
/// # Arguments
/// - `value` - The stored id, e.g. a user's Discord id or a tier's role id
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed snowflake
/// - `Err(AppError::InternalErr(InvalidSnowflake))` - The stored value is not numeric
pub fn parse_snowflake(value: &str) -> Result<u64, AppError> {
    let result = value
        .trim()
        .parse::<u64>()
        .map_err(|e| InternalError::InvalidSnowflake {
            value: value.to_string(),
            source: e,
        })?;

    Ok(result)
}
