//! Client configuration

use govinfo_common::config::{optional_env, parse_env, require_env};
use govinfo_common::{GovInfoError, Result};
use std::fmt;
use std::time::Duration;

// ============================================================================
// Client Configuration Constants
// ============================================================================

/// Default timeout for API requests in seconds.
/// Can be overridden via GOVINFO_API_TIMEOUT_SECS environment variable.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://api.govinfo.gov";

pub const API_KEY_ENV: &str = "GOVINFO_API_KEY";
pub const BASE_URL_ENV: &str = "GOVINFO_BASE_URL";
pub const TIMEOUT_ENV: &str = "GOVINFO_API_TIMEOUT_SECS";

/// Settings for [`GovInfoClient`](crate::GovInfoClient)
#[derive(Clone)]
pub struct ClientConfig {
    /// api.data.gov key, sent as the `api_key` query parameter
    pub api_key: String,

    /// API root without a trailing slash
    pub base_url: String,

    pub timeout: Duration,

    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
            user_agent: concat!("govinfo-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Build from `GOVINFO_API_KEY`, `GOVINFO_BASE_URL` and `GOVINFO_API_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new(require_env(API_KEY_ENV)?);

        if let Some(url) = optional_env(BASE_URL_ENV) {
            config = config.with_base_url(url);
        }

        if let Some(secs) = parse_env::<u64>(TIMEOUT_ENV)? {
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(GovInfoError::config("API key must not be empty"));
        }
        if self.timeout.is_zero() {
            return Err(GovInfoError::config("Request timeout must be greater than zero"));
        }
        url::Url::parse(&self.base_url)
            .map_err(|e| GovInfoError::config(format!("Invalid base URL '{}': {}", self.base_url, e)))?;
        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var(API_KEY_ENV);
        std::env::remove_var(BASE_URL_ENV);
        std::env::remove_var(TIMEOUT_ENV);
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("DEMO_KEY");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ClientConfig::new("super-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = ClientConfig::new("k").with_base_url("http://localhost:9000/");
        assert_eq!(config.base_url, "http://localhost:9000");
    }

    #[test]
    #[serial]
    fn test_from_env() {
        clear_env();
        std::env::set_var(API_KEY_ENV, "env-key");
        std::env::set_var(BASE_URL_ENV, "http://127.0.0.1:8080");
        std::env::set_var(TIMEOUT_ENV, "5");

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.timeout, Duration::from_secs(5));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_requires_key() {
        clear_env();
        assert!(matches!(
            ClientConfig::from_env(),
            Err(GovInfoError::MissingEnv(_))
        ));
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_timeout() {
        clear_env();
        std::env::set_var(API_KEY_ENV, "env-key");
        std::env::set_var(TIMEOUT_ENV, "soon");

        assert!(matches!(
            ClientConfig::from_env(),
            Err(GovInfoError::InvalidEnv { .. })
        ));

        clear_env();
    }
}
