//! Ordered Index Module
//!
//! Per-bucket ordered storage for entries that hashed to the same slot.
//!
//! ## Responsibilities
//! - Point insert/delete/find by full composite key
//! - Overwrite payload in place on duplicate keys
//! - Ascending in-order traversal for partition scans
//!
//! ## Data Structure Choice
//! AVL tree over boxed nodes:
//! - Height kept at O(log n) by rotations after every insert/delete
//! - Each recursive step takes ownership of a subtree and hands the rebuilt
//!   root back to its caller, so no parent pointers or shared mutation
//!
//! ```text
//!   balance factor = height(right) - height(left),  kept in {-1, 0, 1}
//!
//!        z                      y
//!       / \    rotate_left     / \
//!      T1  y   ──────────►    z   x
//!         / \                / \
//!        T2  x              T1 T2
//! ```

mod node;
mod tree;

pub use tree::{AvlTree, Iter};
