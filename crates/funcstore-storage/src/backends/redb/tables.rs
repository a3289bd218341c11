//! Redb table definitions and key encoding utilities.
//!
//! Bucket paths are encoded as a sequence of segments, each written as
//! `SEGMENT_TAG | u32 big-endian length | name bytes`. The encoding of a
//! child bucket therefore starts with the encoding of its parent, and no two
//! distinct paths share an encoding.
//!
//! An entry with key `k` in a bucket whose path encodes to `p` is stored in
//! [`DATA_TABLE`] under `p | ENTRY_TAG | k`. Since `ENTRY_TAG < SEGMENT_TAG`,
//! a bucket's entries occupy the contiguous range `[p | ENTRY_TAG, p | SEGMENT_TAG)`
//! in key order, and everything stored under the bucket (entries and child
//! buckets at any depth) occupies `[p, p | SUBTREE_END)`.

use redb::TableDefinition;

use crate::engine::BucketPath;

/// The physical table that stores all bucket entries.
pub const DATA_TABLE: TableDefinition<'static, &[u8], &[u8]> =
    TableDefinition::new("funcstore_data");

/// The physical table recording which buckets exist.
/// Keys are encoded bucket paths; values are empty.
pub const BUCKET_TABLE: TableDefinition<'static, &[u8], &[u8]> =
    TableDefinition::new("funcstore_buckets");

/// Marks an entry key following a bucket prefix.
pub const ENTRY_TAG: u8 = 0x00;

/// Marks a path segment.
pub const SEGMENT_TAG: u8 = 0x01;

/// Upper bound (exclusive) of everything stored beneath a bucket prefix.
pub const SUBTREE_END: u8 = 0x02;

/// Encode a bucket path into its physical key prefix.
pub fn encode_bucket(path: &BucketPath) -> Vec<u8> {
    let capacity = path.segments().iter().map(|s| s.len() + 5).sum();
    let mut encoded = Vec::with_capacity(capacity);
    for segment in path.segments() {
        encoded.push(SEGMENT_TAG);
        // Segment names are bucket names; they never approach 4 GiB.
        encoded.extend_from_slice(&(segment.len() as u32).to_be_bytes());
        encoded.extend_from_slice(segment.as_bytes());
    }
    encoded
}

/// Encode the physical key of an entry in the bucket with the given prefix.
pub fn entry_key(bucket: &[u8], key: &[u8]) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(bucket.len() + 1 + key.len());
    encoded.extend_from_slice(bucket);
    encoded.push(ENTRY_TAG);
    encoded.extend_from_slice(key);
    encoded
}

/// Strip the bucket prefix from an entry's physical key.
///
/// Returns `None` if the key is not an entry of that bucket.
pub fn decode_entry_key<'a>(bucket: &[u8], encoded: &'a [u8]) -> Option<&'a [u8]> {
    let rest = encoded.strip_prefix(bucket)?;
    match rest.split_first() {
        Some((&ENTRY_TAG, key)) => Some(key),
        _ => None,
    }
}

/// The first physical key that can hold an entry of the bucket.
pub fn entries_start(bucket: &[u8]) -> Vec<u8> {
    with_tag(bucket, ENTRY_TAG)
}

/// The first physical key past the bucket's entries.
pub fn entries_end(bucket: &[u8]) -> Vec<u8> {
    with_tag(bucket, SEGMENT_TAG)
}

/// The first physical key past everything stored beneath the bucket.
pub fn subtree_end(bucket: &[u8]) -> Vec<u8> {
    with_tag(bucket, SUBTREE_END)
}

/// The smallest key that sorts strictly after `key`.
pub fn successor(key: &[u8]) -> Vec<u8> {
    with_tag(key, 0x00)
}

fn with_tag(prefix: &[u8], tag: u8) -> Vec<u8> {
    let mut key = Vec::with_capacity(prefix.len() + 1);
    key.extend_from_slice(prefix);
    key.push(tag);
    key
}
