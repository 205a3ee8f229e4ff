//! Search with a store-backed result cache
//!
//! Entries are keyed by a SHA-256 of the normalized query and page size.
//! Expiry is checked when an entry is read; an expired entry is refetched and
//! overwritten rather than deleted.

use crate::error::Result;
use crate::sink::RecordStore;
use chrono::{DateTime, Duration, Utc};
use govinfo_client::{GovInfoApi, SearchRequest, SearchResults};
use govinfo_common::config::parse_env;
use govinfo_store::NewSearchCacheEntry;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

pub const DEFAULT_CACHE_TTL_HOURS: i64 = 24;

pub const ENV_CACHE_TTL_HOURS: &str = "GOVINFO_SEARCH_CACHE_TTL_HOURS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::hours(DEFAULT_CACHE_TTL_HOURS),
        }
    }
}

impl CacheConfig {
    /// TTL from `GOVINFO_SEARCH_CACHE_TTL_HOURS`, 24 hours when unset
    pub fn from_env() -> govinfo_common::Result<Self> {
        let hours = parse_env::<i64>(ENV_CACHE_TTL_HOURS)?.unwrap_or(DEFAULT_CACHE_TTL_HOURS);
        Ok(Self {
            ttl: Duration::hours(hours),
        })
    }
}

/// Trim and collapse runs of whitespace to a single space
pub fn normalize_query(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cache key of an already normalized query
pub fn cache_key(normalized_query: &str, page_size: u32) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalized_query.as_bytes());
    hasher.update(b"\n");
    hasher.update(page_size.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone, PartialEq)]
pub struct CachedResults {
    pub results: SearchResults,
    pub from_cache: bool,
}

pub struct CachedSearch<'a, A: GovInfoApi + ?Sized, S: RecordStore + ?Sized> {
    api: &'a A,
    store: &'a S,
    ttl: Duration,
}

impl<'a, A: GovInfoApi + ?Sized, S: RecordStore + ?Sized> CachedSearch<'a, A, S> {
    pub fn new(api: &'a A, store: &'a S, ttl: Duration) -> Self {
        Self { api, store, ttl }
    }

    pub fn with_config(api: &'a A, store: &'a S, config: &CacheConfig) -> Self {
        Self::new(api, store, config.ttl)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn search(&self, query: &str, page_size: u32) -> Result<CachedResults> {
        self.search_at(query, page_size, Utc::now()).await
    }

    /// Same as [`search`](Self::search) with an explicit clock
    pub async fn search_at(
        &self,
        query: &str,
        page_size: u32,
        now: DateTime<Utc>,
    ) -> Result<CachedResults> {
        let normalized = normalize_query(query);
        let key = cache_key(&normalized, page_size);

        if let Some(entry) = self.store.search_cache_entry(&key).await? {
            if !entry.is_expired(now) {
                let results: SearchResults = serde_json::from_value(entry.results_json.0)?;
                info!(query = %normalized, count = results.count, "Search cache hit");
                return Ok(CachedResults {
                    results,
                    from_cache: true,
                });
            }
            debug!(query = %normalized, expired_at = %entry.expires_at, "Search cache entry expired");
        }

        let request = SearchRequest::new(normalized.as_str()).page_size(page_size);
        let results = self.api.search(&request).await?;

        let entry = NewSearchCacheEntry {
            query_hash: key,
            query_text: normalized,
            results: serde_json::to_value(&results)?,
            result_count: results.count,
            created_at: now,
            expires_at: now + self.ttl,
        };
        self.store.put_search_cache(&entry).await?;

        debug!(query = %entry.query_text, count = results.count, "Search results cached");
        Ok(CachedResults {
            results,
            from_cache: false,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("  climate   change\t\npolicy "), "climate change policy");
        assert_eq!(normalize_query("   "), "");
    }

    #[test]
    fn test_cache_key_depends_on_page_size() {
        let a = cache_key("climate", 10);
        let b = cache_key("climate", 20);

        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
        assert_eq!(a, cache_key("climate", 10));
    }

    #[test]
    fn test_cache_key_is_hex_sha256() {
        let mut hasher = Sha256::new();
        hasher.update(b"budget\n100");
        assert_eq!(cache_key("budget", 100), hex::encode(hasher.finalize()));
    }

    #[test]
    #[serial]
    fn test_cache_config_from_env() {
        std::env::remove_var(ENV_CACHE_TTL_HOURS);
        assert_eq!(CacheConfig::from_env().unwrap(), CacheConfig::default());

        std::env::set_var(ENV_CACHE_TTL_HOURS, "6");
        assert_eq!(CacheConfig::from_env().unwrap().ttl, Duration::hours(6));

        std::env::set_var(ENV_CACHE_TTL_HOURS, "soon");
        assert!(CacheConfig::from_env().is_err());

        std::env::remove_var(ENV_CACHE_TTL_HOURS);
    }
}
