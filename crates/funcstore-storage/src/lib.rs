//! `funcstore` Storage
//!
//! This crate provides the storage engine abstraction and the redb backend
//! used by `funcstore`.
//!
//! # Overview
//!
//! The storage layer exposes a transactional key-value interface organised
//! into nested, named *buckets*. A bucket is an ordered map from byte keys to
//! byte values that may itself contain child buckets. Buckets are addressed by
//! a [`BucketPath`].
//!
//! # Core Traits
//!
//! - [`StorageEngine`] - The main entry point for storage operations
//! - [`Transaction`] - ACID transaction with bucket and key-value operations
//! - [`Cursor`] - Ordered, bidirectional iteration over a bucket's entries
//!
//! # Error Handling
//!
//! All storage operations return [`StorageResult<T>`], which is an alias for
//! `Result<T, StorageError>`.
//!
//! # Example
//!
//! ```ignore
//! use funcstore_storage::backends::RedbEngine;
//! use funcstore_storage::{BucketPath, StorageEngine, Transaction};
//!
//! let engine = RedbEngine::open("funcs.redb")?;
//! let users = BucketPath::root("users");
//!
//! let mut tx = engine.begin_write()?;
//! tx.create_bucket_if_not_exists(&users)?;
//! tx.put(&users, b"user:1", b"Alice")?;
//! tx.commit()?;
//!
//! let tx = engine.begin_read()?;
//! assert_eq!(tx.get(&users, b"user:1")?, Some(b"Alice".to_vec()));
//! ```
//!
//! # Modules
//!
//! - [`engine`] - Storage engine traits and abstractions
//! - [`backends`] - Concrete storage backend implementations

#![deny(clippy::unwrap_used)]

pub mod backends;
pub mod engine;

pub use engine::{
    BucketPath, Cursor, CursorResult, KeyValue, StorageEngine, StorageError, StorageResult,
    Transaction,
};
