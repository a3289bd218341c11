//! Error types for `funcstore`.
//!
//! This module provides the [`enum@Error`] type returned by every datastore
//! operation.

use funcstore_core::CoreError;
use funcstore_storage::StorageError;
use thiserror::Error;

/// Errors that can occur when using the datastore.
#[derive(Debug, Error)]
pub enum Error {
    /// The datastore location or options are invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// A filesystem operation failed while opening the datastore.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The storage engine failed. The enclosing transaction was rolled back.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A record could not be encoded or decoded.
    #[error("codec error: {0}")]
    Codec(#[from] CoreError),

    /// The requested route does not exist.
    #[error("route '{route}' not found in app '{app}'")]
    RouteNotFound {
        /// The application that was searched.
        app: String,
        /// The missing route.
        route: String,
    },
}

impl Error {
    /// Create a config error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns `true` if a route or bucket does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::RouteNotFound { .. } | Self::Storage(StorageError::BucketNotFound(_)))
    }

    /// Returns `true` if this is a missing-route error.
    #[must_use]
    pub const fn is_route_not_found(&self) -> bool {
        matches!(self, Self::RouteNotFound { .. })
    }

    /// Returns `true` if this is a storage error.
    #[must_use]
    pub const fn is_storage_error(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Returns `true` if this is an encoding or decoding error.
    #[must_use]
    pub const fn is_codec_error(&self) -> bool {
        matches!(self, Self::Codec(_))
    }
}

/// A specialized `Result` type for datastore operations.
pub type Result<T> = std::result::Result<T, Error>;
