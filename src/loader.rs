//! Input loaders
//!
//! Parse batch-load and query files into records and keys for the store.
//!
//! ## Input Format (JSON)
//! ```text
//! [
//!   { "note_holder": "alice", "note_created_date": 100,
//!     "note_title": "T1", "note_content": "C1" },
//!   ...
//! ]
//! ```
//! A query file holds a single object with `note_holder` and
//! `note_created_date`. Missing sort keys default to `0`, missing strings to
//! empty; a missing partition key is rejected.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::key::{CompositeKey, Record, SortKey};
use crate::store::Store;

/// One record as it appears in an input file
#[derive(Debug, Deserialize)]
struct NoteRecord {
    #[serde(default)]
    note_holder: String,

    #[serde(default)]
    note_created_date: SortKey,

    #[serde(default)]
    note_title: String,

    #[serde(default)]
    note_content: String,
}

impl NoteRecord {
    fn key(&self) -> CompositeKey {
        CompositeKey::new(self.note_holder.clone(), self.note_created_date.clone())
    }

    fn into_record(self) -> Result<Record> {
        let record = Record::new(
            self.note_holder,
            self.note_created_date,
            self.note_title,
            self.note_content,
        );
        record.key.validate()?;
        Ok(record)
    }
}

/// Parse a JSON array of records
pub fn parse_records(input: &str) -> Result<Vec<Record>> {
    let notes: Vec<NoteRecord> = serde_json::from_str(input)?;

    notes
        .into_iter()
        .enumerate()
        .map(|(position, note)| {
            note.into_record().inspect_err(|err| {
                tracing::warn!(position, error = %err, "rejected input record");
            })
        })
        .collect()
}

/// Parse a single JSON query object into a composite key
pub fn parse_query(input: &str) -> Result<CompositeKey> {
    let note: NoteRecord = serde_json::from_str(input)?;
    let key = note.key();
    key.validate()?;
    Ok(key)
}

/// Read and parse a records file
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let input = fs::read_to_string(path)?;
    parse_records(&input)
}

/// Read and parse a query file
pub fn read_query(path: &Path) -> Result<CompositeKey> {
    let input = fs::read_to_string(path)?;
    parse_query(&input)
}

/// Upsert every record of a records file. Returns the number of records read.
///
/// The file is fully parsed before the store is touched, so a malformed file
/// leaves the store unchanged.
pub fn put_items(store: &mut Store, path: &Path) -> Result<usize> {
    let records = load_records(path)?;
    let count = records.len();

    for record in records {
        store.upsert(record)?;
    }

    tracing::info!(path = %path.display(), count, entries = store.len(), "records loaded");
    Ok(count)
}
