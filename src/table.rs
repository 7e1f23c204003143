//! Bucket Table
//!
//! Fixed-size array of optional trees. The partition key picks the slot,
//! the tree inside the slot disambiguates colliding keys.
//!
//! ```text
//!   partition_key ──► fingerprint ──► [ 0 ][ 1 ][ 2 ] ... [ n-1 ]
//!                                       │         │
//!                                       ▼         ▼
//!                                    AvlTree   AvlTree
//! ```

use crate::error::{BucketError, Result};
use crate::fingerprint::fingerprint;
use crate::index::AvlTree;
use crate::key::{CompositeKey, Payload};

/// Occupancy summary of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStats {
    /// Total number of buckets
    pub capacity: usize,

    /// Buckets currently holding a tree
    pub occupied_buckets: usize,

    /// Entries across all buckets
    pub entries: usize,

    /// Entry count of the fullest bucket
    pub largest_bucket: usize,
}

/// Hash-routed collection of per-bucket ordered indexes
///
/// The bucket count is set at construction and never changes.
#[derive(Debug)]
pub struct BucketTable {
    buckets: Vec<Option<AvlTree>>,
    len: usize,
}

impl BucketTable {
    /// Create a table with `capacity` empty buckets
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(BucketError::Config(
                "bucket table needs at least one bucket".to_string(),
            ));
        }

        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, || None);

        Ok(Self { buckets, len: 0 })
    }

    /// Slot that `partition_key` routes to
    pub fn bucket_index(&self, partition_key: &str) -> usize {
        fingerprint(partition_key, self.buckets.len())
    }

    /// Insert or overwrite, materializing the bucket's tree on first use
    pub fn insert(&mut self, key: CompositeKey, payload: Payload) -> Option<Payload> {
        let index = self.bucket_index(&key.partition_key);
        let tree = self.buckets[index].get_or_insert_with(AvlTree::new);

        let previous = tree.insert(key, payload);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Remove a key; absent buckets and absent keys are no-ops
    pub fn delete(&mut self, key: &CompositeKey) -> Option<Payload> {
        let index = self.bucket_index(&key.partition_key);
        let slot = &mut self.buckets[index];

        let removed = slot.as_mut()?.delete(key);
        if removed.is_some() {
            self.len -= 1;
        }

        // Release trees that no longer hold anything
        if slot.as_ref().is_some_and(AvlTree::is_empty) {
            *slot = None;
        }
        removed
    }

    pub fn find(&self, key: &CompositeKey) -> Option<&Payload> {
        self.bucket_for(&key.partition_key)?.find(key)
    }

    /// The tree holding `partition_key`'s entries, if that bucket is in use.
    ///
    /// The tree may also hold entries of other partition keys that collide.
    pub fn bucket_for(&self, partition_key: &str) -> Option<&AvlTree> {
        self.buckets[self.bucket_index(partition_key)].as_ref()
    }

    /// Number of buckets
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Number of entries across all buckets
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn stats(&self) -> TableStats {
        let occupied = self.buckets.iter().flatten();

        TableStats {
            capacity: self.capacity(),
            occupied_buckets: occupied.clone().count(),
            entries: self.len,
            largest_bucket: occupied.map(AvlTree::len).max().unwrap_or(0),
        }
    }

    /// Verify every bucket's tree and that each entry sits in the bucket its
    /// partition key routes to
    pub fn check_invariants(&self) -> Result<()> {
        for (index, tree) in self.buckets.iter().enumerate() {
            let Some(tree) = tree else { continue };
            tree.check_invariants()?;

            let misplaced = tree
                .iter()
                .find(|(key, _)| self.bucket_index(&key.partition_key) != index);

            if let Some((key, _)) = misplaced {
                return Err(BucketError::InvariantViolation(format!(
                    "key {} stored in bucket {} but routes elsewhere",
                    key, index
                )));
            }
        }
        Ok(())
    }
}
