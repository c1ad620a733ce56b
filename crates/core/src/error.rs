//! Unified error types for the mart builder.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the mart builder.
///
/// Schema and storage errors are fatal for the relation being materialized;
/// there is no local recovery below the run's top level.
#[derive(Debug, Error)]
pub enum Error {
    /// An input record or relation did not match the expected schema.
    #[error("schema error: {0}")]
    Schema(String),

    /// An epoch-millisecond value outside the representable datetime range.
    #[error("invalid timestamp: {0} ms")]
    InvalidTimestamp(i64),

    /// The columnar store failed to write or read a relation.
    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
