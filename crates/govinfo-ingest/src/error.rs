//! Ingestion errors

use govinfo_client::ClientError;
use govinfo_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("API error: {0}")]
    Client(#[from] ClientError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Export error: {0}")]
    Export(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IngestError {
    pub fn is_client(&self) -> bool {
        matches!(self, Self::Client(_))
    }

    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

/// A run that stopped on its first error
///
/// Records upserted before the failure stay committed; the counts say how far
/// the run got.
#[derive(Debug, Error)]
#[error("Ingestion stopped after {processed} records on {pages} pages: {error}")]
pub struct IngestFailure {
    pub processed: usize,
    pub pages: usize,
    #[source]
    pub error: IngestError,
}

pub type Result<T> = std::result::Result<T, IngestError>;
