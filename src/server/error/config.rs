use thiserror::Error;

/// Startup configuration problems. These abort the process before the server binds.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Set, but not a valid URL, number or socket address.
    #[error("Invalid value for environment variable {name}: {reason}")]
    InvalidEnvVar { name: String, reason: String },
}
