//! Key and record definitions
//!
//! A record is addressed by a composite key: the partition key picks the
//! bucket, the full `(partition_key, sort_key)` pair orders entries inside it.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::de::{self, Deserialize, Deserializer, Visitor};

use crate::error::{BucketError, Result};

/// Ordering key within a partition
///
/// Numbers order before strings. `Int` and `Float` compare by numeric value;
/// when an integer and a float are numerically equal the integer sorts first.
/// Floats compare with `f64::total_cmp`, so `-0.0 < 0.0` and NaN has a fixed place.
#[derive(Debug, Clone)]
pub enum SortKey {
    Int(i64),
    Float(f64),
    Text(String),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Int(_) | SortKey::Float(_) => 0,
            SortKey::Text(_) => 1,
        }
    }
}

/// 2^63, the first float above every `i64`
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

fn cmp_int_float(int: i64, float: f64) -> Ordering {
    if float.is_nan() {
        return if float.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if float >= I64_UPPER {
        return Ordering::Less;
    }
    if float < -I64_UPPER {
        return Ordering::Greater;
    }

    let whole = float.trunc();
    int.cmp(&(whole as i64)).then_with(|| {
        let fraction = float - whole;
        if fraction > 0.0 {
            Ordering::Less
        } else if fraction < 0.0 {
            Ordering::Greater
        } else {
            // Numerically equal: Int before Float keeps Eq structural
            Ordering::Less
        }
    })
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Int(a), SortKey::Int(b)) => a.cmp(b),
            (SortKey::Float(a), SortKey::Float(b)) => a.total_cmp(b),
            (SortKey::Int(a), SortKey::Float(b)) => cmp_int_float(*a, *b),
            (SortKey::Float(a), SortKey::Int(b)) => cmp_int_float(*b, *a).reverse(),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

impl Hash for SortKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            SortKey::Int(value) => (0u8, value).hash(state),
            // total_cmp equality is bit equality
            SortKey::Float(value) => (1u8, value.to_bits()).hash(state),
            SortKey::Text(value) => (2u8, value).hash(state),
        }
    }
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::Int(0)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // pad() so callers can use width specifiers when rendering tables
            SortKey::Int(value) => f.pad(&value.to_string()),
            SortKey::Float(value) => f.pad(&value.to_string()),
            SortKey::Text(value) => f.pad(value),
        }
    }
}

/// Accepts any JSON scalar: integers, floats, strings, and `null` (the default key).
/// Integers above `i64::MAX` become `Float`.
impl<'de> Deserialize<'de> for SortKey {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(SortKeyVisitor)
    }
}

struct SortKeyVisitor;

impl<'de> Visitor<'de> for SortKeyVisitor {
    type Value = SortKey;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, a string or null")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<SortKey, E> {
        Ok(SortKey::Int(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<SortKey, E> {
        Ok(i64::try_from(value).map_or(SortKey::Float(value as f64), SortKey::Int))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> std::result::Result<SortKey, E> {
        Ok(SortKey::Float(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<SortKey, E> {
        Ok(SortKey::Text(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> std::result::Result<SortKey, E> {
        Ok(SortKey::Text(value))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<SortKey, E> {
        Ok(SortKey::default())
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<SortKey, E> {
        Ok(SortKey::default())
    }
}

impl From<i64> for SortKey {
    fn from(value: i64) -> Self {
        SortKey::Int(value)
    }
}

impl From<f64> for SortKey {
    fn from(value: f64) -> Self {
        SortKey::Float(value)
    }
}

impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        SortKey::Text(value.to_string())
    }
}

impl From<String> for SortKey {
    fn from(value: String) -> Self {
        SortKey::Text(value)
    }
}

/// Full key of a record. Ordering is lexicographic: partition key, then sort key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompositeKey {
    pub partition_key: String,
    pub sort_key: SortKey,
}

impl CompositeKey {
    pub fn new(partition_key: impl Into<String>, sort_key: impl Into<SortKey>) -> Self {
        Self {
            partition_key: partition_key.into(),
            sort_key: sort_key.into(),
        }
    }

    /// Reject keys that cannot be routed to a bucket
    pub fn validate(&self) -> Result<()> {
        if self.partition_key.is_empty() {
            return Err(BucketError::InvalidKey(format!(
                "missing partition key (sort key {})",
                self.sort_key
            )));
        }
        Ok(())
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.partition_key, self.sort_key)
    }
}

/// Value stored under a composite key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    pub title: String,
    pub content: String,
}

impl Payload {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// A complete entry: key plus payload fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub key: CompositeKey,
    pub title: String,
    pub content: String,
}

impl Record {
    pub fn new(
        partition_key: impl Into<String>,
        sort_key: impl Into<SortKey>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            key: CompositeKey::new(partition_key, sort_key),
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn from_parts(key: CompositeKey, payload: Payload) -> Self {
        Self {
            key,
            title: payload.title,
            content: payload.content,
        }
    }

    pub fn into_parts(self) -> (CompositeKey, Payload) {
        (
            self.key,
            Payload {
                title: self.title,
                content: self.content,
            },
        )
    }
}
