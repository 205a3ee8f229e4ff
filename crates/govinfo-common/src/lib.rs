//! GovInfo Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared helpers for the GovInfo client workspace.
//!
//! # Overview
//!
//! - **Error Handling**: [`GovInfoError`] for configuration and parse failures
//! - **Logging**: `tracing` subscriber setup shared by every binary and test harness
//! - **Configuration**: `.env` loading and typed environment lookups
//! - **Dates**: ISO 8601 formatting and the date ranges the listing endpoints expect
//! - **Validators**: collection code and package identifier checks
//!
//! # Example
//!
//! ```no_run
//! use govinfo_common::dates::{date_range_last_days, format_iso_date};
//! use govinfo_common::validators::normalize_collection_code;
//!
//! fn main() -> govinfo_common::Result<()> {
//!     let code = normalize_collection_code("bills")?;
//!     let (start, end) = date_range_last_days(7);
//!     println!("{code}: {} .. {}", format_iso_date(start), format_iso_date(end));
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dates;
pub mod error;
pub mod logging;
pub mod validators;

// Re-export commonly used types
pub use error::{GovInfoError, Result};
