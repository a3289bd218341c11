//! Redb transaction implementation.
//!
//! This module provides the `RedbTransaction` type which implements the
//! `Transaction` trait for both read-only and read-write transactions.
//!
//! # Memory-Efficient Cursors
//!
//! The cursor implementation uses batched streaming to avoid loading entire
//! buckets into memory. Entries are loaded in batches (default 1000 entries),
//! and the next or previous batch is fetched on demand as the cursor moves.

use redb::{ReadTransaction, ReadableTable, TableDefinition, WriteTransaction};
use tracing::debug;

use crate::engine::{BucketPath, Cursor, CursorResult, KeyValue, StorageError, Transaction};

use super::tables::{
    decode_entry_key, encode_bucket, entries_end, entries_start, entry_key, subtree_end,
    successor, BUCKET_TABLE, DATA_TABLE,
};

/// Default batch size for cursor operations.
const DEFAULT_BATCH_SIZE: usize = 1000;

/// Value stored in the bucket registry.
const BUCKET_MARKER: &[u8] = &[];

type Table = TableDefinition<'static, &'static [u8], &'static [u8]>;

/// Scan direction for batched range reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Reverse,
}

/// A transaction for the Redb storage engine.
///
/// This type wraps both read-only and read-write Redb transactions,
/// providing a unified interface through the `Transaction` trait.
#[allow(clippy::large_enum_variant)]
pub enum RedbTransaction {
    /// A read-only transaction.
    Read(ReadTransaction),
    /// A read-write transaction.
    Write(WriteTransaction),
}

impl RedbTransaction {
    /// Create a new read-only transaction.
    pub const fn new_read(tx: ReadTransaction) -> Self {
        Self::Read(tx)
    }

    /// Create a new read-write transaction.
    pub const fn new_write(tx: WriteTransaction) -> Self {
        Self::Write(tx)
    }

    fn writable(&self) -> Result<&WriteTransaction, StorageError> {
        match self {
            Self::Read(_) => Err(StorageError::ReadOnly),
            Self::Write(tx) => Ok(tx),
        }
    }

    /// Look up a physical key in one of the physical tables.
    fn lookup(&self, definition: Table, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        match self {
            Self::Read(tx) => match tx.open_table(definition) {
                Ok(t) => read_value(&t, key),
                // No table yet means nothing has been written to it
                Err(redb::TableError::TableDoesNotExist(_)) => Ok(None),
                Err(e) => Err(internal(e)),
            },
            Self::Write(tx) => {
                let t = tx.open_table(definition).map_err(internal)?;
                read_value(&t, key)
            }
        }
    }

    /// Read up to `limit` raw entries of a physical table in `[start, end)`.
    fn scan(
        &self,
        definition: Table,
        start: &[u8],
        end: &[u8],
        direction: Direction,
        limit: usize,
    ) -> Result<Vec<KeyValue>, StorageError> {
        match self {
            Self::Read(tx) => match tx.open_table(definition) {
                Ok(t) => read_range(&t, start, end, direction, limit),
                Err(redb::TableError::TableDoesNotExist(_)) => Ok(Vec::new()),
                Err(e) => Err(internal(e)),
            },
            Self::Write(tx) => {
                let t = tx.open_table(definition).map_err(internal)?;
                read_range(&t, start, end, direction, limit)
            }
        }
    }

    /// Resolve a bucket to its encoded prefix, failing if it does not exist.
    fn require_bucket(&self, bucket: &BucketPath) -> Result<Vec<u8>, StorageError> {
        let prefix = encode_bucket(bucket);
        if self.lookup(BUCKET_TABLE, &prefix)?.is_none() {
            return Err(StorageError::BucketNotFound(bucket.to_string()));
        }
        Ok(prefix)
    }

    /// Fetch a batch of a bucket's entries with physical keys in `[start, end)`.
    ///
    /// Keys are returned with the bucket prefix stripped, in ascending order
    /// regardless of `direction`. `direction` decides which end of the range
    /// the batch is taken from.
    fn fetch_batch(
        &self,
        bucket: &[u8],
        start: &[u8],
        end: &[u8],
        direction: Direction,
        batch_size: usize,
    ) -> Result<Vec<KeyValue>, StorageError> {
        let raw = self.scan(DATA_TABLE, start, end, direction, batch_size)?;
        let mut entries: Vec<KeyValue> = raw
            .into_iter()
            .filter_map(|(k, v)| decode_entry_key(bucket, &k).map(|key| (key.to_vec(), v)))
            .collect();
        if direction == Direction::Reverse {
            entries.reverse();
        }
        Ok(entries)
    }
}

fn internal(err: impl std::fmt::Display) -> StorageError {
    StorageError::Internal(err.to_string())
}

fn read_value<T>(table: &T, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError>
where
    T: ReadableTable<&'static [u8], &'static [u8]>,
{
    let value = table.get(key).map_err(internal)?;
    Ok(value.map(|v| v.value().to_vec()))
}

fn read_range<T>(
    table: &T,
    start: &[u8],
    end: &[u8],
    direction: Direction,
    limit: usize,
) -> Result<Vec<KeyValue>, StorageError>
where
    T: ReadableTable<&'static [u8], &'static [u8]>,
{
    let mut entries = Vec::with_capacity(limit.min(1024));
    if start >= end || limit == 0 {
        return Ok(entries);
    }

    let range = table.range(start..end).map_err(internal)?;
    match direction {
        Direction::Forward => {
            for item in range {
                if entries.len() >= limit {
                    break;
                }
                let (k, v) = item.map_err(internal)?;
                entries.push((k.value().to_vec(), v.value().to_vec()));
            }
        }
        Direction::Reverse => {
            for item in range.rev() {
                if entries.len() >= limit {
                    break;
                }
                let (k, v) = item.map_err(internal)?;
                entries.push((k.value().to_vec(), v.value().to_vec()));
            }
        }
    }
    Ok(entries)
}

/// Remove every key of a physical table in `[start, end)`.
fn remove_range(
    tx: &WriteTransaction,
    definition: Table,
    start: &[u8],
    end: &[u8],
) -> Result<usize, StorageError> {
    let mut table = tx.open_table(definition).map_err(internal)?;
    let keys = table
        .range(start..end)
        .map_err(internal)?
        .map(|item| item.map(|(k, _)| k.value().to_vec()).map_err(internal))
        .collect::<Result<Vec<_>, _>>()?;
    for key in &keys {
        table.remove(key.as_slice()).map_err(internal)?;
    }
    Ok(keys.len())
}

impl Transaction for RedbTransaction {
    type Cursor<'a>
        = RedbCursor<'a>
    where
        Self: 'a;

    fn bucket_exists(&self, bucket: &BucketPath) -> Result<bool, StorageError> {
        Ok(self.lookup(BUCKET_TABLE, &encode_bucket(bucket))?.is_some())
    }

    fn create_bucket(&mut self, bucket: &BucketPath) -> Result<(), StorageError> {
        let tx = self.writable()?;

        if let Some(parent) = bucket.parent() {
            if !self.bucket_exists(&parent)? {
                return Err(StorageError::BucketNotFound(parent.to_string()));
            }
        }
        if self.bucket_exists(bucket)? {
            return Err(StorageError::BucketExists(bucket.to_string()));
        }

        let prefix = encode_bucket(bucket);
        let mut t = tx.open_table(BUCKET_TABLE).map_err(internal)?;
        t.insert(prefix.as_slice(), BUCKET_MARKER).map_err(internal)?;
        debug!(bucket = %bucket, "created bucket");
        Ok(())
    }

    fn delete_bucket(&mut self, bucket: &BucketPath) -> Result<(), StorageError> {
        let tx = self.writable()?;
        let prefix = self.require_bucket(bucket)?;
        let end = subtree_end(&prefix);

        let buckets = remove_range(tx, BUCKET_TABLE, &prefix, &end)?;
        let entries = remove_range(tx, DATA_TABLE, &prefix, &end)?;
        debug!(bucket = %bucket, buckets, entries, "deleted bucket");
        Ok(())
    }

    fn get(&self, bucket: &BucketPath, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        let prefix = self.require_bucket(bucket)?;
        self.lookup(DATA_TABLE, &entry_key(&prefix, key))
    }

    fn put(&mut self, bucket: &BucketPath, key: &[u8], value: &[u8]) -> Result<(), StorageError> {
        let tx = self.writable()?;
        let prefix = self.require_bucket(bucket)?;
        let encoded_key = entry_key(&prefix, key);

        let mut t = tx.open_table(DATA_TABLE).map_err(internal)?;
        t.insert(encoded_key.as_slice(), value).map_err(internal)?;
        Ok(())
    }

    fn delete(&mut self, bucket: &BucketPath, key: &[u8]) -> Result<bool, StorageError> {
        let tx = self.writable()?;
        let prefix = self.require_bucket(bucket)?;
        let encoded_key = entry_key(&prefix, key);

        let mut t = tx.open_table(DATA_TABLE).map_err(internal)?;
        let removed = t.remove(encoded_key.as_slice()).map_err(internal)?.is_some();
        Ok(removed)
    }

    fn cursor(&self, bucket: &BucketPath) -> Result<Self::Cursor<'_>, StorageError> {
        let prefix = self.require_bucket(bucket)?;
        Ok(RedbCursor::new(self, prefix, DEFAULT_BATCH_SIZE))
    }

    fn commit(self) -> Result<(), StorageError> {
        match self {
            // Read transactions don't need explicit commit
            Self::Read(_) => Ok(()),
            Self::Write(tx) => tx.commit().map_err(|e| StorageError::Transaction(e.to_string())),
        }
    }

    fn rollback(self) -> Result<(), StorageError> {
        match self {
            Self::Read(_) => Ok(()),
            Self::Write(tx) => tx.abort().map_err(|e| StorageError::Transaction(e.to_string())),
        }
    }

    fn is_read_only(&self) -> bool {
        matches!(self, Self::Read(_))
    }
}

/// A memory-efficient cursor over the entries of one bucket.
///
/// At any time the cursor holds at most `batch_size` entries in memory, plus
/// the current entry. Child buckets are skipped.
pub struct RedbCursor<'a> {
    /// Reference to the transaction for fetching additional batches.
    tx: &'a RedbTransaction,
    /// Encoded prefix of the bucket being iterated.
    bucket: Vec<u8>,
    /// Current batch of entries, ascending, with prefixes stripped.
    batch: Vec<KeyValue>,
    /// Position within the current batch.
    batch_position: Option<usize>,
    /// Maximum entries per batch.
    batch_size: usize,
    /// Whether there may be entries after the current batch.
    has_more_forward: bool,
    /// Whether there may be entries before the current batch.
    has_more_backward: bool,
    /// Cached current entry for the `current()` method.
    current_entry: Option<KeyValue>,
}

impl<'a> RedbCursor<'a> {
    /// Create a new streaming cursor over the bucket with the given prefix.
    ///
    /// The cursor starts unpositioned.
    pub(crate) fn new(tx: &'a RedbTransaction, bucket: Vec<u8>, batch_size: usize) -> Self {
        Self {
            tx,
            bucket,
            batch: Vec::new(),
            batch_position: None,
            batch_size: batch_size.max(1),
            has_more_forward: true,
            has_more_backward: true,
            current_entry: None,
        }
    }

    fn load_first_batch(&mut self) -> Result<(), StorageError> {
        let (start, end) = (entries_start(&self.bucket), entries_end(&self.bucket));
        self.batch =
            self.tx.fetch_batch(&self.bucket, &start, &end, Direction::Forward, self.batch_size)?;
        self.has_more_forward = self.batch.len() >= self.batch_size;
        self.has_more_backward = false;
        Ok(())
    }

    fn load_last_batch(&mut self) -> Result<(), StorageError> {
        let (start, end) = (entries_start(&self.bucket), entries_end(&self.bucket));
        self.batch =
            self.tx.fetch_batch(&self.bucket, &start, &end, Direction::Reverse, self.batch_size)?;
        self.has_more_backward = self.batch.len() >= self.batch_size;
        self.has_more_forward = false;
        Ok(())
    }

    /// Load the batch following the last key of the current batch.
    fn load_next_batch(&mut self) -> Result<bool, StorageError> {
        if !self.has_more_forward {
            return Ok(false);
        }
        let Some((last, _)) = self.batch.last() else {
            self.has_more_forward = false;
            return Ok(false);
        };

        let start = successor(&entry_key(&self.bucket, last));
        let end = entries_end(&self.bucket);
        let new_batch =
            self.tx.fetch_batch(&self.bucket, &start, &end, Direction::Forward, self.batch_size)?;

        if new_batch.is_empty() {
            self.has_more_forward = false;
            return Ok(false);
        }

        self.has_more_forward = new_batch.len() >= self.batch_size;
        self.has_more_backward = true;
        self.batch = new_batch;
        self.batch_position = Some(0);
        Ok(true)
    }

    /// Load the batch preceding the first key of the current batch.
    fn load_prev_batch(&mut self) -> Result<bool, StorageError> {
        if !self.has_more_backward {
            return Ok(false);
        }
        let Some((first, _)) = self.batch.first() else {
            self.has_more_backward = false;
            return Ok(false);
        };

        let start = entries_start(&self.bucket);
        let end = entry_key(&self.bucket, first);
        let new_batch =
            self.tx.fetch_batch(&self.bucket, &start, &end, Direction::Reverse, self.batch_size)?;

        if new_batch.is_empty() {
            self.has_more_backward = false;
            return Ok(false);
        }

        self.has_more_backward = new_batch.len() >= self.batch_size;
        self.has_more_forward = true;
        self.batch_position = Some(new_batch.len() - 1);
        self.batch = new_batch;
        Ok(true)
    }

    fn position_at(&mut self, position: Option<usize>) -> CursorResult {
        self.batch_position = position;
        self.current_entry = position.and_then(|pos| self.batch.get(pos).cloned());
        Ok(self.current_entry.clone())
    }
}

impl Cursor for RedbCursor<'_> {
    fn seek(&mut self, key: &[u8]) -> CursorResult {
        let start = entry_key(&self.bucket, key);
        let end = entries_end(&self.bucket);
        self.batch =
            self.tx.fetch_batch(&self.bucket, &start, &end, Direction::Forward, self.batch_size)?;
        self.has_more_forward = self.batch.len() >= self.batch_size;
        // Entries before the seek key may exist
        self.has_more_backward = true;

        if self.batch.is_empty() {
            return self.position_at(None);
        }
        self.position_at(Some(0))
    }

    fn seek_first(&mut self) -> CursorResult {
        self.load_first_batch()?;
        if self.batch.is_empty() {
            return self.position_at(None);
        }
        self.position_at(Some(0))
    }

    fn seek_last(&mut self) -> CursorResult {
        self.load_last_batch()?;
        if self.batch.is_empty() {
            return self.position_at(None);
        }
        self.position_at(Some(self.batch.len() - 1))
    }

    fn next(&mut self) -> CursorResult {
        match self.batch_position {
            None => self.seek_first(),
            Some(pos) if pos + 1 < self.batch.len() => self.position_at(Some(pos + 1)),
            Some(_) => {
                if self.load_next_batch()? {
                    self.position_at(Some(0))
                } else {
                    self.position_at(None)
                }
            }
        }
    }

    fn prev(&mut self) -> CursorResult {
        match self.batch_position {
            None => self.seek_last(),
            Some(0) => {
                if self.load_prev_batch()? {
                    self.position_at(self.batch_position)
                } else {
                    self.position_at(None)
                }
            }
            Some(pos) => self.position_at(Some(pos - 1)),
        }
    }

    fn current(&self) -> Option<(&[u8], &[u8])> {
        self.current_entry.as_ref().map(|(k, v)| (k.as_slice(), v.as_slice()))
    }
}
