use govinfo_common::GovInfoError;
use thiserror::Error;

/// Relational store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQL query or connection error
    #[error("Database query failed: {0}")]
    Database(#[from] sqlx::Error),

    /// Embedded schema migrations could not be applied
    #[error("Database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Upsert attempted against a parent row that does not exist
    #[error("{kind} '{id}' does not exist; ingest it before its children")]
    MissingParent { kind: &'static str, id: String },

    /// Requested record does not exist
    #[error("{0}")]
    NotFound(String),

    /// A JSON column could not be encoded
    #[error("Failed to serialize column value: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] GovInfoError),
}

impl StoreError {
    pub fn missing_parent(kind: &'static str, id: impl Into<String>) -> Self {
        Self::MissingParent {
            kind,
            id: id.into(),
        }
    }

    /// Create a not found error with resource context
    pub fn not_found(resource_type: &str, identifier: &str) -> Self {
        Self::NotFound(format!("{} '{}' not found in database", resource_type, identifier))
    }

    pub fn is_missing_parent(&self) -> bool {
        matches!(self, Self::MissingParent { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
