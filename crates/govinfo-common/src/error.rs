//! Error types shared across the GovInfo workspace

use thiserror::Error;

/// Result type alias for shared helpers
pub type Result<T> = std::result::Result<T, GovInfoError>;

/// Errors raised by configuration loading, date parsing and identifier validation
#[derive(Error, Debug)]
pub enum GovInfoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidEnv { key: String, value: String },

    #[error("Unable to parse date string: '{0}'")]
    InvalidDate(String),

    #[error("Invalid collection code: '{0}'")]
    InvalidCollection(String),

    #[error("Invalid package identifier: '{0}'")]
    InvalidPackageId(String),
}

impl GovInfoError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid environment value error
    pub fn invalid_env(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidEnv {
            key: key.into(),
            value: value.into(),
        }
    }
}
