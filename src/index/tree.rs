//! AVL tree implementation
//!
//! Keyed by the full composite key. Insert, delete and find all compare with
//! `CompositeKey::cmp`, never with a single field.

use std::cmp::Ordering;

use crate::error::{BucketError, Result};
use crate::key::{CompositeKey, Payload, Record};

use super::node::{self, Link, Node};

/// Self-balancing ordered index for one bucket
#[derive(Debug, Default)]
pub struct AvlTree {
    root: Link,
    len: usize,
}

impl AvlTree {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Insert a key, or overwrite the payload of an equal key in place.
    ///
    /// Returns the previous payload when the key already existed.
    pub fn insert(&mut self, key: CompositeKey, payload: Payload) -> Option<Payload> {
        let (root, previous) = node::insert(self.root.take(), key, payload);
        self.root = Some(root);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Remove a key. Deleting an absent key is a no-op returning `None`.
    pub fn delete(&mut self, key: &CompositeKey) -> Option<Payload> {
        let (root, removed) = node::delete(self.root.take(), key);
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Look up the payload stored under `key`
    pub fn find(&self, key: &CompositeKey) -> Option<&Payload> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Equal => return Some(&node.payload),
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }

    /// Iterate entries in ascending key order
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter { stack: Vec::with_capacity(self.height()) };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    /// Materialize every entry in ascending key order
    pub fn traverse_ordered(&self) -> Vec<Record> {
        self.iter()
            .map(|(key, payload)| Record::from_parts(key.clone(), payload.clone()))
            .collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the tree (0 when empty)
    pub fn height(&self) -> usize {
        node::height(&self.root)
    }

    /// Walk the whole tree verifying key order, cached heights, balance
    /// factors and the entry count.
    ///
    /// A failure here means the rotation logic is broken; callers should
    /// treat it as fatal.
    pub fn check_invariants(&self) -> Result<()> {
        let mut count = 0;
        check_subtree(&self.root, None, None, &mut count)?;
        if count != self.len {
            return Err(BucketError::InvariantViolation(format!(
                "len is {} but tree holds {} nodes",
                self.len, count
            )));
        }
        Ok(())
    }
}

/// Returns the recomputed height of the subtree.
fn check_subtree(
    link: &Link,
    lower: Option<&CompositeKey>,
    upper: Option<&CompositeKey>,
    count: &mut usize,
) -> Result<usize> {
    let Some(node) = link else {
        return Ok(0);
    };

    let below = lower.is_some_and(|lower| node.key <= *lower);
    let above = upper.is_some_and(|upper| node.key >= *upper);
    if below || above {
        return Err(BucketError::InvariantViolation(format!(
            "key {} is out of order",
            node.key
        )));
    }

    let left = check_subtree(&node.left, lower, Some(&node.key), count)?;
    let right = check_subtree(&node.right, Some(&node.key), upper, count)?;
    *count += 1;

    let expected = 1 + left.max(right);
    if node.height != expected {
        return Err(BucketError::InvariantViolation(format!(
            "node {} caches height {} but has height {}",
            node.key, node.height, expected
        )));
    }

    let balance = right as isize - left as isize;
    if !(-1..=1).contains(&balance) {
        return Err(BucketError::InvariantViolation(format!(
            "node {} has balance factor {}",
            node.key, balance
        )));
    }

    Ok(expected)
}

/// In-order iterator over a tree, driven by an explicit stack
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iter<'a> {
    fn push_left_spine(&mut self, mut current: Option<&'a Node>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a CompositeKey, &'a Payload);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some((&node.key, &node.payload))
    }
}

impl<'a> IntoIterator for &'a AvlTree {
    type Item = (&'a CompositeKey, &'a Payload);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
