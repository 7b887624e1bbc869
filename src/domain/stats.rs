//! Aggregate tree statistics, recomputed on every call.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::tree::{BinaryTree, Node};

/// Derived metrics for a tree. Never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeStats {
    pub height: usize,
    pub node_count: usize,
    pub leaf_count: usize,
    pub is_balanced: bool,
    #[serde(rename = "isValidBST")]
    pub is_valid_bst: bool,
}

impl TreeStats {
    #[instrument(level = "debug", skip_all)]
    pub fn of(root: Option<&Node>) -> Self {
        Self {
            height: height(root),
            node_count: node_count(root),
            leaf_count: leaf_count(root),
            is_balanced: is_balanced(root),
            is_valid_bst: is_valid_bst(root),
        }
    }
}

/// 0 for an empty tree, 1 for a single node.
pub fn height(node: Option<&Node>) -> usize {
    node.map_or(0, |n| {
        1 + height(n.left.as_deref()).max(height(n.right.as_deref()))
    })
}

pub fn node_count(node: Option<&Node>) -> usize {
    node.map_or(0, |n| {
        1 + node_count(n.left.as_deref()) + node_count(n.right.as_deref())
    })
}

pub fn leaf_count(node: Option<&Node>) -> usize {
    match node {
        None => 0,
        Some(n) if n.is_leaf() => 1,
        Some(n) => leaf_count(n.left.as_deref()) + leaf_count(n.right.as_deref()),
    }
}

/// AVL balance: subtree heights differ by at most one at every node.
pub fn is_balanced(node: Option<&Node>) -> bool {
    let Some(n) = node else {
        return true;
    };
    let left = height(n.left.as_deref());
    let right = height(n.right.as_deref());
    left.abs_diff(right) <= 1 && is_balanced(n.left.as_deref()) && is_balanced(n.right.as_deref())
}

/// Strict BST ordering via inherited exclusive bounds.
pub fn is_valid_bst(node: Option<&Node>) -> bool {
    fn within(node: Option<&Node>, min: Option<i64>, max: Option<i64>) -> bool {
        let Some(n) = node else {
            return true;
        };
        if min.is_some_and(|min| n.value <= min) || max.is_some_and(|max| n.value >= max) {
            return false;
        }
        within(n.left.as_deref(), min, Some(n.value))
            && within(n.right.as_deref(), Some(n.value), max)
    }

    within(node, None, None)
}

impl BinaryTree {
    pub fn stats(&self) -> TreeStats {
        TreeStats::of(self.root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tree_stats_are_trivial() {
        let stats = BinaryTree::new().stats();
        assert_eq!(
            stats,
            TreeStats {
                height: 0,
                node_count: 0,
                leaf_count: 0,
                is_balanced: true,
                is_valid_bst: true,
            }
        );
    }

    #[test]
    fn test_stats_serialize_with_camel_case_field_names() {
        let json = serde_json::to_value(BinaryTree::from_values(&[2, 1]).stats()).unwrap();
        assert_eq!(json["nodeCount"], 2);
        assert_eq!(json["leafCount"], 1);
        assert_eq!(json["isBalanced"], true);
        assert_eq!(json["isValidBST"], true);
    }
}
