//! Tree nodes and rebalancing
//!
//! Every function here consumes a subtree and returns its new root.

use std::cmp::Ordering;

use crate::key::{CompositeKey, Payload};

pub(crate) type Link = Option<Box<Node>>;

#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) key: CompositeKey,
    pub(crate) payload: Payload,
    pub(crate) left: Link,
    pub(crate) right: Link,
    /// 1 for a leaf; an absent subtree counts as 0
    pub(crate) height: usize,
}

impl Node {
    fn leaf(key: CompositeKey, payload: Payload) -> Box<Self> {
        Box::new(Self {
            key,
            payload,
            left: None,
            right: None,
            height: 1,
        })
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    fn balance_factor(&self) -> isize {
        height(&self.right) as isize - height(&self.left) as isize
    }
}

pub(crate) fn height(link: &Link) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

// =============================================================================
// Rotations
// =============================================================================

fn rotate_left(mut z: Box<Node>) -> Box<Node> {
    let Some(mut y) = z.right.take() else {
        return z;
    };
    z.right = y.left.take();
    z.update_height();
    y.left = Some(z);
    y.update_height();
    y
}

fn rotate_right(mut z: Box<Node>) -> Box<Node> {
    let Some(mut y) = z.left.take() else {
        return z;
    };
    z.left = y.right.take();
    z.update_height();
    y.right = Some(z);
    y.update_height();
    y
}

/// Restore the AVL property at `node`, assuming both children already hold it.
fn rebalance(mut node: Box<Node>) -> Box<Node> {
    node.update_height();
    let balance = node.balance_factor();

    if balance > 1 {
        // Right-left case needs the child straightened first
        if let Some(right) = node.right.take() {
            node.right = Some(if right.balance_factor() < 0 {
                rotate_right(right)
            } else {
                right
            });
        }
        return rotate_left(node);
    }

    if balance < -1 {
        if let Some(left) = node.left.take() {
            node.left = Some(if left.balance_factor() > 0 {
                rotate_left(left)
            } else {
                left
            });
        }
        return rotate_right(node);
    }

    node
}

// =============================================================================
// Structural Operations
// =============================================================================

/// Insert or overwrite. Returns the new subtree root and the replaced payload.
pub(crate) fn insert(
    link: Link,
    key: CompositeKey,
    payload: Payload,
) -> (Box<Node>, Option<Payload>) {
    let Some(mut node) = link else {
        return (Node::leaf(key, payload), None);
    };

    match key.cmp(&node.key) {
        Ordering::Equal => {
            // Same key: payload swap only, structure untouched
            let previous = std::mem::replace(&mut node.payload, payload);
            (node, Some(previous))
        }
        Ordering::Less => {
            let (left, previous) = insert(node.left.take(), key, payload);
            node.left = Some(left);
            (rebalance(node), previous)
        }
        Ordering::Greater => {
            let (right, previous) = insert(node.right.take(), key, payload);
            node.right = Some(right);
            (rebalance(node), previous)
        }
    }
}

/// Remove `key` if present. Returns the new subtree root and the removed payload.
pub(crate) fn delete(link: Link, key: &CompositeKey) -> (Link, Option<Payload>) {
    let Some(mut node) = link else {
        return (None, None);
    };

    match key.cmp(&node.key) {
        Ordering::Less => {
            let (left, removed) = delete(node.left.take(), key);
            node.left = left;
            (Some(rebalance(node)), removed)
        }
        Ordering::Greater => {
            let (right, removed) = delete(node.right.take(), key);
            node.right = right;
            (Some(rebalance(node)), removed)
        }
        Ordering::Equal => {
            let Node {
                payload,
                left,
                right,
                ..
            } = *node;

            match (left, right) {
                (None, child) | (child, None) => (child, Some(payload)),
                (Some(left), Some(right)) => {
                    // In-order successor takes the deleted node's place
                    let (right, mut successor) = take_min(right);
                    successor.left = Some(left);
                    successor.right = right;
                    (Some(rebalance(successor)), Some(payload))
                }
            }
        }
    }
}

/// Detach the minimum node of a subtree. Returns the rebalanced remainder and the node.
fn take_min(mut node: Box<Node>) -> (Link, Box<Node>) {
    match node.left.take() {
        None => {
            let rest = node.right.take();
            (rest, node)
        }
        Some(left) => {
            let (left, min) = take_min(left);
            node.left = left;
            (Some(rebalance(node)), min)
        }
    }
}
