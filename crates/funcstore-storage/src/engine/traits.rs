//! Core storage engine traits.
//!
//! This module defines the fundamental traits for storage backends:
//!
//! - [`StorageEngine`] - The main entry point for storage operations
//! - [`Transaction`] - ACID transaction support over nested buckets
//! - [`Cursor`] - Ordered iteration over key-value pairs

use std::sync::Arc;

use super::{BucketPath, StorageError};

/// A key-value pair returned by cursor operations.
pub type KeyValue = (Vec<u8>, Vec<u8>);

/// Result type for cursor operations that return a key-value pair.
pub type CursorResult = Result<Option<KeyValue>, StorageError>;

/// A storage engine that provides transactional bucket operations.
///
/// Implementations must be thread-safe (`Send + Sync`). A single write
/// transaction may be open at a time; any number of read transactions may run
/// concurrently, each on a consistent snapshot.
///
/// # Example
///
/// ```ignore
/// use funcstore_storage::{BucketPath, StorageEngine, StorageError, Transaction};
///
/// fn example<E: StorageEngine>(engine: &E) -> Result<(), StorageError> {
///     let bucket = BucketPath::root("my_bucket");
///
///     let mut tx = engine.begin_write()?;
///     tx.create_bucket_if_not_exists(&bucket)?;
///     tx.put(&bucket, b"key", b"value")?;
///     tx.commit()?;
///
///     let tx = engine.begin_read()?;
///     let value = tx.get(&bucket, b"key")?;
///     Ok(())
/// }
/// ```
pub trait StorageEngine: Send + Sync {
    /// The transaction type for this engine.
    type Transaction<'a>: Transaction
    where
        Self: 'a;

    /// Begin a read-only transaction.
    ///
    /// Read transactions see a consistent snapshot of the database taken when
    /// the transaction starts. They never block on writers.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Transaction`] if the transaction cannot be started.
    fn begin_read(&self) -> Result<Self::Transaction<'_>, StorageError>;

    /// Begin a read-write transaction.
    ///
    /// Write transactions are serialized: this call blocks while another write
    /// transaction is open. It must not be called from a thread that already
    /// holds an open write transaction.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Transaction`] if the transaction cannot be started.
    fn begin_write(&self) -> Result<Self::Transaction<'_>, StorageError>;

    /// Flush any buffered data to durable storage.
    ///
    /// The default implementation does nothing, as backends are expected to
    /// make data durable on commit.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the flush fails.
    fn flush(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

/// A transaction over nested buckets.
///
/// Write transactions must be explicitly committed; dropping one without
/// committing rolls back every change made through it.
///
/// Key-value operations require the addressed bucket to exist and return
/// [`StorageError::BucketNotFound`] otherwise. Every mutating operation returns
/// [`StorageError::ReadOnly`] on a read-only transaction.
pub trait Transaction {
    /// The cursor type for iteration.
    type Cursor<'a>: Cursor
    where
        Self: 'a;

    /// Check whether a bucket exists.
    fn bucket_exists(&self, bucket: &BucketPath) -> Result<bool, StorageError>;

    /// Create a bucket.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::BucketExists`] if the bucket already exists and
    /// [`StorageError::BucketNotFound`] if its parent bucket does not.
    fn create_bucket(&mut self, bucket: &BucketPath) -> Result<(), StorageError>;

    /// Create a bucket unless it already exists.
    ///
    /// An existing bucket is left untouched, including its entries and child
    /// buckets.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::BucketNotFound`] if the parent bucket does not exist.
    fn create_bucket_if_not_exists(&mut self, bucket: &BucketPath) -> Result<(), StorageError> {
        if self.bucket_exists(bucket)? {
            return Ok(());
        }
        self.create_bucket(bucket)
    }

    /// Delete a bucket together with all of its entries and child buckets.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::BucketNotFound`] if the bucket does not exist.
    fn delete_bucket(&mut self, bucket: &BucketPath) -> Result<(), StorageError>;

    /// Get a value by key from a bucket.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    fn get(&self, bucket: &BucketPath, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError>;

    /// Put a key-value pair into a bucket, replacing any existing value.
    fn put(&mut self, bucket: &BucketPath, key: &[u8], value: &[u8]) -> Result<(), StorageError>;

    /// Delete a key from a bucket.
    ///
    /// Returns `Ok(true)` if the key was deleted, `Ok(false)` if it did not exist.
    fn delete(&mut self, bucket: &BucketPath, key: &[u8]) -> Result<bool, StorageError>;

    /// Create a cursor over the entries of a bucket, in ascending key order.
    ///
    /// Child buckets are not entries and are not visited. The cursor starts
    /// unpositioned; position it with [`Cursor::seek_first`],
    /// [`Cursor::seek_last`] or [`Cursor::seek`].
    fn cursor(&self, bucket: &BucketPath) -> Result<Self::Cursor<'_>, StorageError>;

    /// Commit the transaction, making all changes durable.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Transaction`] if the commit fails.
    fn commit(self) -> Result<(), StorageError>;

    /// Rollback the transaction, discarding all changes.
    ///
    /// This is implicit when a transaction is dropped without committing.
    fn rollback(self) -> Result<(), StorageError>;

    /// Check if this is a read-only transaction.
    fn is_read_only(&self) -> bool;
}

/// A cursor for ordered iteration over key-value pairs.
///
/// # Iteration Pattern
///
/// ```ignore
/// let mut cursor = tx.cursor(&bucket)?;
///
/// // Newest first, by key order
/// let mut entry = cursor.seek_last()?;
/// while let Some((key, value)) = entry {
///     // Process key-value pair
///     entry = cursor.prev()?;
/// }
/// ```
pub trait Cursor {
    /// Seek to the first key greater than or equal to the given key.
    fn seek(&mut self, key: &[u8]) -> CursorResult;

    /// Seek to the first key-value pair, or `None` if the bucket is empty.
    fn seek_first(&mut self) -> CursorResult;

    /// Seek to the last key-value pair, or `None` if the bucket is empty.
    fn seek_last(&mut self) -> CursorResult;

    /// Move to the next key-value pair, or `None` past the end.
    ///
    /// An unpositioned cursor moves to the first entry.
    fn next(&mut self) -> CursorResult;

    /// Move to the previous key-value pair, or `None` before the beginning.
    ///
    /// An unpositioned cursor moves to the last entry.
    fn prev(&mut self) -> CursorResult;

    /// Get the current key-value pair without moving.
    fn current(&self) -> Option<(&[u8], &[u8])>;
}

/// Implement `StorageEngine` for `Arc<E>` to allow shared ownership of engines.
impl<E: StorageEngine> StorageEngine for Arc<E> {
    type Transaction<'a>
        = E::Transaction<'a>
    where
        Self: 'a;

    fn begin_read(&self) -> Result<Self::Transaction<'_>, StorageError> {
        (**self).begin_read()
    }

    fn begin_write(&self) -> Result<Self::Transaction<'_>, StorageError> {
        (**self).begin_write()
    }

    fn flush(&self) -> Result<(), StorageError> {
        (**self).flush()
    }
}
