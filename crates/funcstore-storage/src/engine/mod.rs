//! Storage engine traits and abstractions.
//!
//! This module defines the core traits that storage backends must implement:
//!
//! - [`StorageEngine`] - Main entry point for creating transactions
//! - [`Transaction`] - ACID transaction with bucket and get/put/delete operations
//! - [`Cursor`] - Ordered iteration over key-value pairs
//!
//! Buckets are addressed with [`BucketPath`].

mod bucket;
mod error;
mod traits;

pub use bucket::BucketPath;
pub use error::{StorageError, StorageResult};
pub use traits::{Cursor, CursorResult, KeyValue, StorageEngine, Transaction};
