//! Partition key fingerprinting
//!
//! Maps a partition key to a bucket index. SHA-1 is used for its avalanche
//! behavior only; nothing here depends on cryptographic strength.

use sha1::{Digest, Sha1};

/// Bucket index for `partition_key` in a table of `table_size` buckets.
///
/// The 160-bit digest is read as a big-endian unsigned integer and reduced
/// modulo `table_size` one byte at a time.
///
/// # Panics
///
/// Panics if `table_size` is zero. `BucketTable::new` rejects a zero
/// capacity, so lookups routed through a table never hit this.
pub fn fingerprint(partition_key: &str, table_size: usize) -> usize {
    assert!(table_size > 0, "fingerprint table_size must be non-zero");

    let digest = Sha1::digest(partition_key.as_bytes());
    let modulus = table_size as u128;

    let remainder = digest
        .iter()
        .fold(0u128, |acc, &byte| ((acc << 8) | byte as u128) % modulus);

    remainder as usize
}
