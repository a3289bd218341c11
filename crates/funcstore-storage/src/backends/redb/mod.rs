//! Redb storage backend.
//!
//! This module provides a storage backend implementation using Redb,
//! a pure-Rust embedded database with ACID transactions, a single
//! exclusive writer and snapshot-isolated readers.
//!
//! Redb only offers flat, statically named tables. Nested buckets are built
//! on top of two physical tables: a bucket registry recording which buckets
//! exist, and a data table holding every entry under a key prefixed by its
//! encoded bucket path. See [`tables`] for the key layout.
//!
//! # Example
//!
//! ```ignore
//! use funcstore_storage::backends::RedbEngine;
//! use funcstore_storage::{BucketPath, StorageEngine, Transaction};
//!
//! let engine = RedbEngine::open("funcs.redb")?;
//! let apps = BucketPath::root("funcs-apps");
//!
//! let mut tx = engine.begin_write()?;
//! tx.create_bucket_if_not_exists(&apps)?;
//! tx.put(&apps, b"myapp", b"{}")?;
//! tx.commit()?;
//! ```
//!
//! # In-Memory Databases
//!
//! For testing, you can create an in-memory database that doesn't persist:
//!
//! ```ignore
//! let engine = RedbEngine::in_memory()?;
//! ```

mod engine;
pub mod tables;
mod transaction;

pub use engine::{RedbConfig, RedbEngine};
pub use transaction::{RedbCursor, RedbTransaction};
