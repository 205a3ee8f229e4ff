//! Environment-backed configuration helpers
//!
//! Crates in this workspace read their settings from `GOVINFO_*` environment
//! variables. These helpers keep the lookup and parse rules in one place so a
//! malformed value fails loudly instead of silently falling back to a default.

use crate::error::{GovInfoError, Result};
use std::str::FromStr;
use tracing::debug;

/// Load variables from a `.env` file in the current directory or its parents.
///
/// A missing file is not an error; variables already set in the process
/// environment take precedence over the file.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "Loaded .env file"),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => debug!(error = %e, "Ignoring unreadable .env file"),
    }
}

/// Read a required environment variable.
pub fn require_env(key: &str) -> Result<String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(GovInfoError::MissingEnv(key.to_string())),
    }
}

/// Read an optional environment variable, treating empty values as unset.
pub fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse an optional environment variable.
///
/// Returns `Ok(None)` when unset and an error when set to something that
/// does not parse.
pub fn parse_env<T: FromStr>(key: &str) -> Result<Option<T>> {
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| GovInfoError::invalid_env(key, raw)),
        None => Ok(None),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_require_env_missing() {
        std::env::remove_var("GOVINFO_TEST_REQUIRED");
        let err = require_env("GOVINFO_TEST_REQUIRED").unwrap_err();
        assert!(matches!(err, GovInfoError::MissingEnv(ref k) if k == "GOVINFO_TEST_REQUIRED"));
    }

    #[test]
    #[serial]
    fn test_require_env_blank_is_missing() {
        std::env::set_var("GOVINFO_TEST_REQUIRED", "   ");
        assert!(require_env("GOVINFO_TEST_REQUIRED").is_err());
        std::env::remove_var("GOVINFO_TEST_REQUIRED");
    }

    #[test]
    #[serial]
    fn test_parse_env() {
        std::env::set_var("GOVINFO_TEST_NUMBER", "42");
        assert_eq!(parse_env::<u64>("GOVINFO_TEST_NUMBER").unwrap(), Some(42));

        std::env::set_var("GOVINFO_TEST_NUMBER", "forty-two");
        let err = parse_env::<u64>("GOVINFO_TEST_NUMBER").unwrap_err();
        assert!(matches!(err, GovInfoError::InvalidEnv { .. }));

        std::env::remove_var("GOVINFO_TEST_NUMBER");
        assert_eq!(parse_env::<u64>("GOVINFO_TEST_NUMBER").unwrap(), None);
    }
}
