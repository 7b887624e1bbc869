//! Binary tree data model and structural mutators.
//!
//! Every node is exclusively owned by its parent slot (or by the tree as root).
//! Mutators rewrite slots in place; nothing here emits trace steps.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::error::DomainError;

/// Owning slot for a subtree.
pub type Link = Option<Box<Node>>;

/// Tree node, serialized as the nested `{value, left, right}` record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub value: i64,
    #[serde(default)]
    pub left: Link,
    #[serde(default)]
    pub right: Link,
}

impl Node {
    pub fn new(value: i64) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Child in the given slot.
    pub fn child(&self, side: Side) -> Option<&Node> {
        match side {
            Side::Left => self.left.as_deref(),
            Side::Right => self.right.as_deref(),
        }
    }

    fn slot_mut(&mut self, side: Side) -> &mut Link {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// Child slot selector for manual insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

impl FromStr for Side {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(Side::Left),
            "right" | "r" => Ok(Side::Right),
            _ => Err(DomainError::InvalidSide(s.to_string())),
        }
    }
}

/// Node with at least one open child slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableParent {
    pub value: i64,
    pub can_insert_left: bool,
    pub can_insert_right: bool,
}

/// Binary tree owning its root.
///
/// Serializes transparently as the root record, `null` when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BinaryTree {
    root: Link,
}

impl BinaryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree by BST-inserting `values` in order.
    pub fn from_values(values: &[i64]) -> Self {
        let mut tree = Self::new();
        for &value in values {
            tree.insert(value);
        }
        tree
    }

    /// Wrap an already-built node structure.
    pub fn from_root(root: Option<Node>) -> Self {
        Self {
            root: root.map(Box::new),
        }
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.root = None;
    }

    /// BST insert. Equal values are dropped silently.
    #[instrument(level = "debug", skip(self))]
    pub fn insert(&mut self, value: i64) {
        Self::insert_node(&mut self.root, value);
    }

    fn insert_node(slot: &mut Link, value: i64) {
        match slot {
            None => *slot = Some(Box::new(Node::new(value))),
            Some(node) => match value.cmp(&node.value) {
                Ordering::Less => Self::insert_node(&mut node.left, value),
                Ordering::Greater => Self::insert_node(&mut node.right, value),
                Ordering::Equal => debug!("duplicate value {} ignored", value),
            },
        }
    }

    /// Attach `value` as the `side` child of the node holding `parent`, ignoring BST order.
    ///
    /// On an empty tree the value becomes the root whatever `parent` and `side` say.
    /// Returns false when the parent does not exist or the slot is occupied.
    #[instrument(level = "debug", skip(self))]
    pub fn insert_manual(&mut self, value: i64, parent: i64, side: Side) -> bool {
        if self.root.is_none() {
            self.root = Some(Box::new(Node::new(value)));
            return true;
        }

        let Some(parent_node) = self
            .root
            .as_deref_mut()
            .and_then(|root| Self::find_node_mut(root, parent))
        else {
            debug!("parent {} not found", parent);
            return false;
        };

        let slot = parent_node.slot_mut(side);
        if slot.is_some() {
            debug!("{} slot of {} is occupied", side, parent);
            return false;
        }
        *slot = Some(Box::new(Node::new(value)));
        true
    }

    /// BST delete; returns whether the tree still has a root.
    ///
    /// Deleting an absent value leaves the tree untouched.
    #[instrument(level = "debug", skip(self))]
    pub fn delete(&mut self, value: i64) -> bool {
        Self::delete_node(&mut self.root, value);
        self.root.is_some()
    }

    fn delete_node(slot: &mut Link, value: i64) {
        let Some(node) = slot else {
            return;
        };

        match value.cmp(&node.value) {
            Ordering::Less => Self::delete_node(&mut node.left, value),
            Ordering::Greater => Self::delete_node(&mut node.right, value),
            Ordering::Equal => {
                let successor = match (&node.left, &node.right) {
                    (Some(_), Some(right)) => Some(Self::min_value(right)),
                    _ => None,
                };
                if let Some(successor) = successor {
                    node.value = successor;
                    Self::delete_node(&mut node.right, successor);
                } else {
                    let child = node.left.take().or_else(|| node.right.take());
                    *slot = child;
                }
            }
        }
    }

    fn min_value(mut node: &Node) -> i64 {
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        node.value
    }

    /// Unordered pre-order lookup, first match wins.
    pub fn find_node(&self, value: i64) -> Option<&Node> {
        fn find(node: Option<&Node>, value: i64) -> Option<&Node> {
            let node = node?;
            if node.value == value {
                return Some(node);
            }
            find(node.left.as_deref(), value).or_else(|| find(node.right.as_deref(), value))
        }

        find(self.root(), value)
    }

    pub fn contains(&self, value: i64) -> bool {
        self.find_node(value).is_some()
    }

    fn find_node_mut(node: &mut Node, value: i64) -> Option<&mut Node> {
        if node.value == value {
            return Some(node);
        }
        if let Some(left) = node.left.as_deref_mut() {
            if let Some(found) = Self::find_node_mut(left, value) {
                return Some(found);
            }
        }
        node.right
            .as_deref_mut()
            .and_then(|right| Self::find_node_mut(right, value))
    }

    /// Nodes with an open child slot, in pre-order.
    pub fn available_parents(&self) -> Vec<AvailableParent> {
        fn collect(node: Option<&Node>, parents: &mut Vec<AvailableParent>) {
            let Some(node) = node else {
                return;
            };
            let can_insert_left = node.left.is_none();
            let can_insert_right = node.right.is_none();
            if can_insert_left || can_insert_right {
                parents.push(AvailableParent {
                    value: node.value,
                    can_insert_left,
                    can_insert_right,
                });
            }
            collect(node.left.as_deref(), parents);
            collect(node.right.as_deref(), parents);
        }

        let mut parents = Vec::new();
        collect(self.root(), &mut parents);
        parents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_two_children_uses_successor() {
        let mut tree = BinaryTree::from_values(&[5, 3, 8, 7, 9]);
        assert!(tree.delete(5));

        let root = tree.root().unwrap();
        assert_eq!(root.value, 7);
        assert_eq!(root.left.as_ref().unwrap().value, 3);
        let right = root.right.as_ref().unwrap();
        assert_eq!(right.value, 8);
        assert!(right.left.is_none());
        assert_eq!(right.right.as_ref().unwrap().value, 9);
    }

    #[test]
    fn test_delete_last_node_empties_tree() {
        let mut tree = BinaryTree::from_values(&[1]);
        assert!(!tree.delete(1));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_side_parsing() {
        assert_eq!("Left".parse::<Side>().unwrap(), Side::Left);
        assert_eq!("r".parse::<Side>().unwrap(), Side::Right);
        assert!(matches!(
            "middle".parse::<Side>(),
            Err(DomainError::InvalidSide(_))
        ));
    }
}
