//! Search cache table
//!
//! Expiry is left to the reader: lookups return entries whether or not they
//! have expired.

use super::Store;
use crate::error::StoreResult;
use crate::models::{NewSearchCacheEntry, SearchCacheEntry};
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use tracing::debug;

impl Store {
    pub async fn search_cache_entry(&self, query_hash: &str) -> StoreResult<Option<SearchCacheEntry>> {
        Ok(sqlx::query_as::<_, SearchCacheEntry>(
            r#"
            SELECT id, query_hash, query_text, results_json, result_count, created_at, expires_at
            FROM search_cache WHERE query_hash = ?1
            "#,
        )
        .bind(query_hash)
        .fetch_optional(&self.pool)
        .await?)
    }

    /// Insert or overwrite the entry for `entry.query_hash`
    pub async fn put_search_cache(&self, entry: &NewSearchCacheEntry) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO search_cache
                (query_hash, query_text, results_json, result_count, created_at, expires_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(query_hash) DO UPDATE SET
                query_text = excluded.query_text,
                results_json = excluded.results_json,
                result_count = excluded.result_count,
                created_at = excluded.created_at,
                expires_at = excluded.expires_at
            "#,
        )
        .bind(&entry.query_hash)
        .bind(&entry.query_text)
        .bind(Json(&entry.results))
        .bind(entry.result_count)
        .bind(entry.created_at)
        .bind(entry.expires_at)
        .execute(&self.pool)
        .await?;

        debug!(query_hash = %entry.query_hash, expires_at = %entry.expires_at, "Stored search cache entry");
        Ok(())
    }

    /// Delete entries expired as of `now`. Returns the number removed.
    pub async fn purge_expired_search_cache(&self, now: DateTime<Utc>) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM search_cache WHERE expires_at <= ?1")
            .bind(now)
            .execute(&self.pool)
            .await?;

        debug!(removed = result.rows_affected(), "Purged expired search cache entries");
        Ok(result.rows_affected())
    }
}
