//! Store connection settings

use crate::error::StoreResult;
use govinfo_common::config::{optional_env, parse_env};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://govinfo.db";
pub const IN_MEMORY_DATABASE_URL: &str = "sqlite::memory:";

pub const DATABASE_URL_ENV: &str = "GOVINFO_DATABASE_URL";
pub const MAX_CONNECTIONS_ENV: &str = "GOVINFO_DB_MAX_CONNECTIONS";
pub const CONNECT_TIMEOUT_ENV: &str = "GOVINFO_DB_CONNECT_TIMEOUT";

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
    /// Create the database file when it does not exist
    pub create_if_missing: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 5,
            connect_timeout_secs: 30,
            create_if_missing: true,
        }
    }
}

impl StoreConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Private in-memory database. Pinned to one connection, since every
    /// SQLite connection to `:memory:` opens its own database.
    pub fn in_memory() -> Self {
        Self {
            url: IN_MEMORY_DATABASE_URL.to_string(),
            max_connections: 1,
            ..Self::default()
        }
    }

    pub fn from_env() -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(url) = optional_env(DATABASE_URL_ENV) {
            config.url = url;
        }

        if let Some(max) = parse_env::<u32>(MAX_CONNECTIONS_ENV)? {
            config.max_connections = max.max(1);
        }

        if let Some(secs) = parse_env::<u64>(CONNECT_TIMEOUT_ENV)? {
            config.connect_timeout_secs = secs;
        }

        Ok(config)
    }

    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}
