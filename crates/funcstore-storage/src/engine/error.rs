//! Storage error types.

use thiserror::Error;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The database could not be opened.
    #[error("failed to open database: {0}")]
    Open(String),

    /// A bucket does not exist.
    #[error("bucket not found: {0}")]
    BucketNotFound(String),

    /// A bucket already exists.
    #[error("bucket already exists: {0}")]
    BucketExists(String),

    /// A write was attempted in a read-only transaction.
    #[error("transaction is read-only")]
    ReadOnly,

    /// A transaction could not be started or committed.
    #[error("transaction error: {0}")]
    Transaction(String),

    /// The backend reported an error while reading or writing a table.
    #[error("internal storage error: {0}")]
    Internal(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Returns `true` if this error reports a missing bucket.
    #[must_use]
    pub const fn is_bucket_not_found(&self) -> bool {
        matches!(self, Self::BucketNotFound(_))
    }
}

/// A specialized `Result` type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
