//! SQLite-backed store handle
//!
//! A [`Store`] owns the connection pool. Open it before an ingestion run and
//! [`close`](Store::close) it afterwards; schema migrations are applied on
//! every connect. Clones share the pool.

mod read;
mod search_cache;
mod upsert;

use crate::config::StoreConfig;
use crate::error::StoreResult;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(config.create_if_missing)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(config.connect_timeout_secs));

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs));

        if config.is_in_memory() {
            // Dropping the last connection would discard the database
            pool_options = pool_options
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options.connect_with(options).await?;
        let store = Self { pool };
        store.migrate().await?;

        tracing::info!(
            url = %config.url,
            max_connections = config.max_connections,
            "Store opened"
        );

        Ok(store)
    }

    pub async fn in_memory() -> StoreResult<Self> {
        Self::connect(&StoreConfig::in_memory()).await
    }

    async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Release all connections
    pub async fn close(self) {
        self.pool.close().await;
        tracing::debug!("Store closed");
    }
}
