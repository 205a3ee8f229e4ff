//! Ingestion of GovInfo listings into the relational mirror
//!
//! - [`Ingestion`] walks a paginated listing and upserts each record,
//!   optionally fetching its full summary first
//! - [`CachedSearch`] answers repeated searches from the store until the
//!   cached entry expires
//! - [`Table`] exports records as CSV or a rendered terminal table
//!
//! ```no_run
//! use chrono::{TimeZone, Utc};
//! use govinfo_client::{ClientConfig, GovInfoClient, PackageQuery};
//! use govinfo_ingest::{IngestOptions, Ingestion};
//! use govinfo_store::{NewCollection, Store, StoreConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GovInfoClient::new(ClientConfig::from_env()?)?;
//! let store = Store::connect(&StoreConfig::from_env()?).await?;
//! store.upsert_collection(&NewCollection::new("BILLS", "Congressional Bills")).await?;
//!
//! let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let report = Ingestion::new(&client, &store)
//!     .ingest_collection_packages(&PackageQuery::new("BILLS", start), &IngestOptions::default().max_pages(10))
//!     .await?;
//! println!("{} packages over {} pages", report.processed, report.pages);
//! # Ok(())
//! # }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod error;
pub mod export;
pub mod pipeline;
pub mod search_cache;
pub mod sink;

pub use error::{IngestError, IngestFailure, Result};
pub use export::{Table, Tabular};
pub use pipeline::{Detail, IngestOptions, IngestReport, Ingestion, UpsertPolicy};
pub use search_cache::{CacheConfig, CachedResults, CachedSearch, DEFAULT_CACHE_TTL_HOURS};
pub use sink::RecordStore;
