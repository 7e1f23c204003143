//! # BucketKV
//!
//! A minimal key-value store for composite keys:
//! - Partition key routes to one of a fixed number of hash buckets
//! - Each bucket is an AVL tree ordered by (partition key, sort key)
//! - Point get/upsert/delete in O(log n) within a bucket
//! - Ordered partition scans without a full-store traversal
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              CLI / Loaders / Renderers                       │
//! │           (JSON input, table output)                         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Store                                   │
//! │        (upsert / get / delete / scan_partition)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Bucket Table                                │
//! │          (SHA-1 fingerprint mod capacity)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   AvlTree   │   ...    │   AvlTree   │
//!   │ (bucket 0)  │          │ (bucket n)  │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod key;
pub mod fingerprint;
pub mod index;
pub mod table;
pub mod store;

pub mod loader;
pub mod render;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BucketError, Result};
pub use config::Config;
pub use key::{CompositeKey, Payload, Record, SortKey};
pub use store::Store;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of BucketKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
