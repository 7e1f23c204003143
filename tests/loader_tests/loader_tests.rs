//! Loader and Render Tests
//!
//! Tests verify:
//! - JSON record parsing with field defaults
//! - Rejection of records and queries without a partition key
//! - File-based loading into a store
//! - Lookup and partition table formatting

use std::fs;

use bucketkv::loader::{load_records, parse_query, parse_records, put_items, read_query};
use bucketkv::render::{format_lookup, format_partition};
use bucketkv::{BucketError, CompositeKey, Payload, Record, SortKey, Store};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

const SAMPLE: &str = r#"[
    {"note_holder": "alice", "note_created_date": 100, "note_title": "T1", "note_content": "C1"},
    {"note_holder": "alice", "note_created_date": 50, "note_title": "T2", "note_content": "C2"},
    {"note_holder": "bob", "note_created_date": 10, "note_title": "T3", "note_content": "C3"}
]"#;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

// =============================================================================
// Parsing Tests
// =============================================================================

#[test]
fn test_parse_records() {
    let records = parse_records(SAMPLE).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0], Record::new("alice", 100i64, "T1", "C1"));
    assert_eq!(records[2], Record::new("bob", 10i64, "T3", "C3"));
}

#[test]
fn test_parse_records_applies_defaults() {
    let records = parse_records(r#"[{"note_holder": "alice"}]"#).unwrap();

    assert_eq!(records[0].key.sort_key, SortKey::Int(0));
    assert_eq!(records[0].title, "");
    assert_eq!(records[0].content, "");
}

#[test]
fn test_parse_records_text_sort_key() {
    let records =
        parse_records(r#"[{"note_holder": "alice", "note_created_date": "2024-01-01"}]"#).unwrap();

    assert_eq!(records[0].key.sort_key, SortKey::Text("2024-01-01".to_string()));
}

#[test]
fn test_parse_records_float_sort_key() {
    let records =
        parse_records(r#"[{"note_holder": "alice", "note_created_date": 20240101.5}]"#).unwrap();

    assert_eq!(records[0].key.sort_key, SortKey::Float(20240101.5));
}

#[test]
fn test_parse_records_null_sort_key_defaults() {
    let records =
        parse_records(r#"[{"note_holder": "alice", "note_created_date": null}]"#).unwrap();

    assert_eq!(records[0].key.sort_key, SortKey::default());
}

#[test]
fn test_parse_records_sort_key_above_i64_range() {
    let records = parse_records(
        r#"[{"note_holder": "alice", "note_created_date": 18446744073709551615}]"#,
    )
    .unwrap();

    assert_eq!(records[0].key.sort_key, SortKey::Float(18446744073709551615u64 as f64));
    assert!(records[0].key.sort_key > SortKey::Int(i64::MAX));
}

#[test]
fn test_parse_records_rejects_non_scalar_sort_key() {
    let result = parse_records(r#"[{"note_holder": "alice", "note_created_date": [1]}]"#);
    assert!(matches!(result, Err(BucketError::Serialization(_))));
}

#[test]
fn test_put_items_mixed_numeric_sort_keys() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "input_data.json",
        r#"[
            {"note_holder": "alice", "note_created_date": 2, "note_title": "two"},
            {"note_holder": "alice", "note_created_date": 1.5, "note_title": "one and a half"},
            {"note_holder": "alice", "note_created_date": null, "note_title": "zero"},
            {"note_holder": "alice", "note_created_date": "later", "note_title": "text"},
            {"note_holder": "alice", "note_title": "missing"}
        ]"#,
    );
    let mut store = Store::new(10).unwrap();

    assert_eq!(put_items(&mut store, &path).unwrap(), 5);

    // null and a missing sort key are the same default key: last write wins
    let titles: Vec<String> = store
        .scan_partition("alice")
        .into_iter()
        .map(|record| record.title)
        .collect();
    assert_eq!(titles, vec!["missing", "one and a half", "two", "text"]);
}

#[test]
fn test_parse_records_missing_partition_key() {
    let result = parse_records(r#"[{"note_title": "orphan"}]"#);
    assert!(matches!(result, Err(BucketError::InvalidKey(_))));
}

#[test]
fn test_parse_records_malformed_json() {
    let result = parse_records("[{\"note_holder\": ");
    assert!(matches!(result, Err(BucketError::Serialization(_))));
}

#[test]
fn test_parse_records_not_an_array() {
    let result = parse_records(r#"{"note_holder": "alice"}"#);
    assert!(matches!(result, Err(BucketError::Serialization(_))));
}

#[test]
fn test_parse_query() {
    let key = parse_query(r#"{"note_holder": "bob", "note_created_date": 10}"#).unwrap();
    assert_eq!(key, CompositeKey::new("bob", 10i64));
}

#[test]
fn test_parse_query_missing_partition_key() {
    let result = parse_query(r#"{"note_created_date": 10}"#);
    assert!(matches!(result, Err(BucketError::InvalidKey(_))));
}

// =============================================================================
// File Tests
// =============================================================================

#[test]
fn test_load_records_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "input_data.json", SAMPLE);

    let records = load_records(&path).unwrap();
    assert_eq!(records.len(), 3);
}

#[test]
fn test_load_records_missing_file() {
    let dir = TempDir::new().unwrap();

    let result = load_records(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(BucketError::Io(_))));
}

#[test]
fn test_read_query_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "query.json",
        r#"{"note_holder": "alice", "note_created_date": 50}"#,
    );

    assert_eq!(read_query(&path).unwrap(), CompositeKey::new("alice", 50i64));
}

#[test]
fn test_put_items() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "input_data.json", SAMPLE);
    let mut store = Store::new(100).unwrap();

    let count = put_items(&mut store, &path).unwrap();

    assert_eq!(count, 3);
    assert_eq!(store.len(), 3);
    assert_eq!(store.get("alice", &SortKey::Int(50)), Some(&Payload::new("T2", "C2")));
}

#[test]
fn test_put_items_invalid_file_leaves_store_untouched() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "input_data.json",
        r#"[{"note_holder": "alice"}, {"note_title": "no holder"}]"#,
    );
    let mut store = Store::new(100).unwrap();

    assert!(put_items(&mut store, &path).is_err());
    assert!(store.is_empty());
}

// =============================================================================
// Render Tests
// =============================================================================

#[test]
fn test_format_lookup_found() {
    let key = CompositeKey::new("bob", 10i64);
    let payload = Payload::new("T3", "C3");

    assert_eq!(format_lookup(&key, Some(&payload)), "Retrieved: bob 10 T3 C3");
}

#[test]
fn test_format_lookup_missing() {
    let key = CompositeKey::new("alice", 999i64);
    assert_eq!(format_lookup(&key, None), "Item not found: alice 999");
}

#[test]
fn test_format_partition_empty() {
    assert_eq!(
        format_partition("nobody", &[]),
        "No records found for primary key: nobody"
    );
}

#[test]
fn test_format_partition_table() {
    let records = vec![
        Record::new("alice", 50i64, "T2", "C2"),
        Record::new("alice", 100i64, "T1", "a longer content cell"),
    ];

    let table = format_partition("alice", &records);
    let lines: Vec<&str> = table.lines().collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[0],
        "| note_holder | note_created_date | note_title | note_content          |"
    );
    assert_eq!(
        lines[1],
        "|-------------|-------------------|------------|-----------------------|"
    );
    assert_eq!(
        lines[2],
        "| alice       | 50                | T2         | C2                    |"
    );
    assert!(lines[3].contains("a longer content cell"));

    // Every row has the same width
    assert!(lines.iter().all(|line| line.chars().count() == lines[0].chars().count()));
}
