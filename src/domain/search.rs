//! Search with step traces, in two modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::error::DomainError;
use crate::domain::trace::{Action, Recorder, SearchResult};
use crate::domain::tree::{BinaryTree, Node};

/// Which search routine to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Explore every node regardless of ordering
    #[default]
    Complete,
    /// Follow BST ordering, one subtree per level
    Bst,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Complete => write!(f, "complete"),
            SearchMode::Bst => write!(f, "bst"),
        }
    }
}

impl FromStr for SearchMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "complete" | "full" => Ok(SearchMode::Complete),
            "bst" | "optimized" => Ok(SearchMode::Bst),
            _ => Err(DomainError::UnknownSearchMode(s.to_string())),
        }
    }
}

/// Pre-order search over the whole tree.
///
/// `Visit` on entry; `Backtrack` only for nodes whose subtree did not contain the
/// target. Stops at the first match.
#[instrument(level = "debug", skip(root))]
pub fn complete_search(root: Option<&Node>, target: i64) -> SearchResult {
    fn walk(node: Option<&Node>, target: i64, rec: &mut Recorder) -> Option<Vec<i64>> {
        let node = node?;
        rec.enter(node.value);
        rec.step(Action::Visit);

        let found = if node.value == target {
            Some(rec.current_path().to_vec())
        } else {
            walk(node.left.as_deref(), target, rec)
                .or_else(|| walk(node.right.as_deref(), target, rec))
        };

        if found.is_none() {
            rec.step(Action::Backtrack);
        }
        rec.leave();
        found
    }

    let mut rec = Recorder::default();
    let found = walk(root, target, &mut rec);
    debug!("complete search for {}: found={}", target, found.is_some());
    rec.into_search(found)
}

/// Search that descends only into the subtree BST ordering points at.
///
/// On a tree that violates BST ordering this can miss values that exist.
#[instrument(level = "debug", skip(root))]
pub fn bst_search(root: Option<&Node>, target: i64) -> SearchResult {
    let mut rec = Recorder::default();
    let mut current = root;
    let mut found = None;

    while let Some(node) = current {
        rec.enter(node.value);
        rec.step(Action::Visit);
        if node.value == target {
            found = Some(rec.current_path().to_vec());
            break;
        }
        current = if target < node.value {
            node.left.as_deref()
        } else {
            node.right.as_deref()
        };
    }

    debug!("bst search for {}: found={}", target, found.is_some());
    rec.into_search(found)
}

impl BinaryTree {
    pub fn search(&self, target: i64, mode: SearchMode) -> SearchResult {
        match mode {
            SearchMode::Complete => complete_search(self.root(), target),
            SearchMode::Bst => bst_search(self.root(), target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trace::Step;

    #[test]
    fn test_complete_search_backtracks_out_of_dead_subtree() {
        let tree = BinaryTree::from_values(&[5, 3, 8]);
        let result = tree.search(8, SearchMode::Complete);

        assert!(result.found);
        assert_eq!(result.path, vec![5, 8]);
        let actions: Vec<_> = result.steps.iter().map(|s| (s.node, s.action)).collect();
        assert_eq!(
            actions,
            vec![
                (5, Action::Visit),
                (3, Action::Visit),
                (3, Action::Backtrack),
                (8, Action::Visit),
            ]
        );
    }

    #[test]
    fn test_bst_search_follows_one_branch() {
        let tree = BinaryTree::from_values(&[5, 3, 8, 7]);
        let result = tree.search(7, SearchMode::Bst);

        assert!(result.found);
        assert_eq!(result.path, vec![5, 8, 7]);
        assert_eq!(
            result.steps.last(),
            Some(&Step {
                node: 7,
                path: vec![5, 8, 7],
                action: Action::Visit,
            })
        );
        assert_eq!(result.visited_count(), 3);
    }

    #[test]
    fn test_search_on_empty_tree() {
        let tree = BinaryTree::new();
        for mode in [SearchMode::Complete, SearchMode::Bst] {
            let result = tree.search(1, mode);
            assert!(!result.found);
            assert!(result.path.is_empty());
            assert!(result.steps.is_empty());
        }
    }
}
