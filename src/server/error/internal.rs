use std::num::ParseIntError;
use thiserror::Error;

/// Stored data that should have been validated on the way in but wasn't.
///
/// Always a 500; the client only sees a generic message.
#[derive(Error, Debug)]
pub enum InternalError {
    /// A Discord id stored on a user or tier is not a numeric snowflake.
    #[error("Stored Discord id '{value}' is not a snowflake: {source}")]
    InvalidSnowflake {
        value: String,
        #[source]
        source: ParseIntError,
    },
}
