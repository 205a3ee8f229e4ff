//! GovInfo API client
//!
//! Typed models for the GovInfo REST API, an async HTTP client and a cursor
//! walker for the `offsetMark`-paginated listings.
//!
//! ```no_run
//! use govinfo_client::{ClientConfig, CollectionPackagesFetcher, Cursor, CursorWalker, GovInfoClient, PackageQuery};
//! use chrono::{TimeZone, Utc};
//!
//! # async fn run() -> govinfo_client::Result<()> {
//! let client = GovInfoClient::new(ClientConfig::new("DEMO_KEY"))?;
//! let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let query = PackageQuery::new("BILLS", start).page_size(100);
//!
//! let mut walker = CursorWalker::new(CollectionPackagesFetcher::new(&client, query), Cursor::First)
//!     .with_max_pages(5);
//! while let Some(page) = walker.next_page().await? {
//!     for package in page.items {
//!         println!("{}", package.package_id);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod api;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod pagination;
pub mod query;

pub use api::GovInfoApi;
pub use client::GovInfoClient;
pub use config::{ClientConfig, DEFAULT_API_TIMEOUT_SECS, DEFAULT_BASE_URL};
pub use error::{ClientError, Result};
pub use models::*;
pub use pagination::{
    cursor_from_next_page, CollectionPackagesFetcher, Cursor, CursorWalker, GranulesFetcher,
    Listing, Page, PageFetcher, PublishedPackagesFetcher, WalkOutcome,
};
pub use query::{PackageQuery, PublishedQuery, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
