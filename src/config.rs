//! Configuration for BucketKV
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{BucketError, Result};

/// Default number of buckets in the table
pub const DEFAULT_CAPACITY: usize = 1000;

/// Default batch-load file preloaded by the CLI before lookups
pub const DEFAULT_DATA_FILE: &str = "input_data.json";

/// Main configuration for a BucketKV store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Table Configuration
    // -------------------------------------------------------------------------
    /// Number of buckets. Fixed for the lifetime of the store, never resized.
    pub capacity: usize,

    // -------------------------------------------------------------------------
    // Input Configuration
    // -------------------------------------------------------------------------
    /// Records file loaded before `get-item` and `query` commands
    pub data_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check that the configuration describes a usable store
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(BucketError::Config(
                "capacity must be at least one bucket".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the number of buckets
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    /// Set the records file preloaded before lookups
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_file = path.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
