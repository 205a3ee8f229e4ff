//! Relational mirror of GovInfo collections, packages and granules
//!
//! Rows are keyed by their GovInfo identifiers. Writes are upserts that
//! overwrite every mutable column (last write wins) and refuse to create a
//! child whose parent row is missing.

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod error;
pub mod models;
mod store;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use models::{
    CollectionRow, GranuleRow, NewCollection, NewGranule, NewPackage, NewSearchCacheEntry,
    PackageFilter, PackageRow, SearchCacheEntry, UpsertAction,
};
pub use store::Store;
