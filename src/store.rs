//! Store Module
//!
//! The facade collaborators talk to. Validates keys at the boundary and
//! delegates everything else to the bucket table.
//!
//! ## Operations
//! - `upsert`: insert or overwrite by composite key (last write wins)
//! - `get`: point lookup, `None` when absent
//! - `delete`: remove by composite key, no-op when absent
//! - `scan_partition`: every record of one partition, ascending by sort key

use crate::config::Config;
use crate::error::Result;
use crate::key::{CompositeKey, Payload, Record, SortKey};
use crate::table::{BucketTable, TableStats};

/// In-memory composite-key store
///
/// ## Concurrency Model
/// Single-threaded and synchronous: every operation runs to completion.
/// Buckets share no state, so a lock per bucket is the natural extension if
/// concurrent writers are ever needed.
#[derive(Debug)]
pub struct Store {
    table: BucketTable,
}

impl Store {
    /// Create a store with a fixed number of buckets
    pub fn new(capacity: usize) -> Result<Self> {
        let table = BucketTable::new(capacity)?;
        tracing::debug!(capacity, "store created");
        Ok(Self { table })
    }

    /// Create a store from a validated config
    pub fn open(config: &Config) -> Result<Self> {
        config.validate()?;
        Self::new(config.capacity)
    }

    /// Insert a record, or replace the title/content of an existing key
    pub fn upsert(&mut self, record: Record) -> Result<()> {
        record.key.validate()?;

        let (key, payload) = record.into_parts();
        tracing::trace!(key = %key, "upsert");

        if self.table.insert(key, payload).is_some() {
            tracing::debug!("upsert overwrote existing entry");
        }
        Ok(())
    }

    /// Look up the payload stored under `(partition_key, sort_key)`
    pub fn get(&self, partition_key: &str, sort_key: &SortKey) -> Option<&Payload> {
        let key = CompositeKey::new(partition_key, sort_key.clone());
        self.table.find(&key)
    }

    /// Remove `(partition_key, sort_key)`. Returns the removed payload, if any.
    pub fn delete(&mut self, partition_key: &str, sort_key: &SortKey) -> Option<Payload> {
        let key = CompositeKey::new(partition_key, sort_key.clone());
        let removed = self.table.delete(&key);
        tracing::debug!(key = %key, found = removed.is_some(), "delete");
        removed
    }

    /// All records of `partition_key`, ascending by sort key.
    ///
    /// The bucket can be shared with colliding partition keys. Since trees
    /// order by partition key first, the requested partition is one
    /// contiguous run of the in-order walk.
    pub fn scan_partition(&self, partition_key: &str) -> Vec<Record> {
        let Some(tree) = self.table.bucket_for(partition_key) else {
            return Vec::new();
        };

        tree.iter()
            .skip_while(|(key, _)| key.partition_key.as_str() < partition_key)
            .take_while(|(key, _)| key.partition_key == partition_key)
            .map(|(key, payload)| Record::from_parts(key.clone(), payload.clone()))
            .collect()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Number of buckets
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    pub fn stats(&self) -> TableStats {
        self.table.stats()
    }

    /// Verify every tree in the store. See [`crate::index::AvlTree::check_invariants`].
    pub fn check_invariants(&self) -> Result<()> {
        self.table.check_invariants()
    }
}
