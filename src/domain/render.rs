//! Text rendering of binary trees via `termtree`.
/*
Binary trees need both slots visible: a node with only a right child must not look
like a node with only a left child. Missing siblings are drawn as `·`.
 */
use termtree::Tree;
use tracing::instrument;

use crate::domain::tree::{BinaryTree, Node, Side};

/// Placeholder label for an absent child next to a present sibling.
pub const EMPTY_SLOT: &str = "·";

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for Node {
    fn to_tree_string(&self) -> Tree<String> {
        let root = self.value.to_string();

        if self.is_leaf() {
            return Tree::new(root);
        }

        let leaves: Vec<_> = [Side::Left, Side::Right]
            .into_iter()
            .map(|side| match self.child(side) {
                Some(child) => child.to_tree_string(),
                None => Tree::new(EMPTY_SLOT.to_string()),
            })
            .collect();

        Tree::new(root).with_leaves(leaves)
    }
}

impl TreeNodeConvert for BinaryTree {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        match self.root() {
            Some(root) => root.to_tree_string(),
            None => Tree::new("Empty tree".to_string()),
        }
    }
}
