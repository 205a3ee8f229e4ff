//! Error types for GovInfo API calls
//!
//! Callers are expected to special-case rate limiting and missing documents,
//! so those get their own variants instead of hiding inside a generic status
//! error. Nothing here is retried automatically.

use govinfo_common::GovInfoError;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors returned by [`GovInfoClient`](crate::GovInfoClient) and the cursor walker
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request did not complete within the configured timeout
    #[error("Request to {endpoint} timed out")]
    Timeout { endpoint: String },

    /// Connection failure, DNS failure, TLS failure or similar
    #[error("Network request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// HTTP 404
    #[error("Not found: {endpoint}")]
    NotFound { endpoint: String },

    /// HTTP 429. `retry_after` carries the `Retry-After` header in seconds when sent.
    #[error("Rate limit exceeded calling {endpoint}")]
    RateLimited {
        endpoint: String,
        retry_after: Option<u64>,
    },

    /// Any other non-2xx status
    #[error("GovInfo returned HTTP {status} for {endpoint}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// The response body does not match the expected record shape
    #[error("Unexpected response shape from {endpoint}: {source}")]
    Validation {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request could not be built from the caller's arguments
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Client configuration is missing or malformed
    #[error(transparent)]
    Config(#[from] GovInfoError),
}

impl ClientError {
    /// HTTP status code for the status-carrying variants
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::RateLimited { .. } => Some(429),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    pub(crate) fn from_reqwest(endpoint: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                endpoint: endpoint.to_string(),
            }
        } else {
            Self::Transport {
                endpoint: endpoint.to_string(),
                // Query strings carry the API key
                source: source.without_url(),
            }
        }
    }

    pub(crate) fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }
}
