//! Operation tags, as selected in the visualizer and stored on snapshots.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::traversal::Traversal;

/// Operation a snapshot was last worked with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Insert,
    Delete,
    Search,
    Inorder,
    Preorder,
    Postorder,
    Dfs,
    Bfs,
    Clear,
}

impl Algorithm {
    /// Human readable name for completion messages.
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Insert => "Insert",
            Algorithm::Delete => "Delete",
            Algorithm::Search => "Search",
            Algorithm::Inorder => "In-order traversal",
            Algorithm::Preorder => "Pre-order traversal",
            Algorithm::Postorder => "Post-order traversal",
            Algorithm::Dfs => "DFS traversal",
            Algorithm::Bfs => "BFS traversal",
            Algorithm::Clear => "Clear",
        }
    }

    pub fn traversal(self) -> Option<Traversal> {
        match self {
            Algorithm::Inorder => Some(Traversal::Inorder),
            Algorithm::Preorder => Some(Traversal::Preorder),
            Algorithm::Postorder => Some(Traversal::Postorder),
            Algorithm::Dfs => Some(Traversal::Dfs),
            Algorithm::Bfs => Some(Traversal::Bfs),
            _ => None,
        }
    }
}

impl From<Traversal> for Algorithm {
    fn from(order: Traversal) -> Self {
        match order {
            Traversal::Inorder => Algorithm::Inorder,
            Traversal::Preorder => Algorithm::Preorder,
            Traversal::Postorder => Algorithm::Postorder,
            Traversal::Dfs => Algorithm::Dfs,
            Traversal::Bfs => Algorithm::Bfs,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(order) = self.traversal() {
            return write!(f, "{}", order);
        }
        let name = match self {
            Algorithm::Insert => "insert",
            Algorithm::Delete => "delete",
            Algorithm::Search => "search",
            _ => "clear",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Algorithm {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(order) = s.parse::<Traversal>() {
            return Ok(order.into());
        }
        match s.trim().to_ascii_lowercase().as_str() {
            "insert" => Ok(Algorithm::Insert),
            "delete" => Ok(Algorithm::Delete),
            "search" => Ok(Algorithm::Search),
            "clear" => Ok(Algorithm::Clear),
            _ => Err(DomainError::UnknownAlgorithm(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse_agree() {
        for algorithm in [
            Algorithm::Insert,
            Algorithm::Delete,
            Algorithm::Search,
            Algorithm::Inorder,
            Algorithm::Preorder,
            Algorithm::Postorder,
            Algorithm::Dfs,
            Algorithm::Bfs,
            Algorithm::Clear,
        ] {
            assert_eq!(algorithm.to_string().parse::<Algorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn test_traversal_tags_map_back_to_orders() {
        assert_eq!(Algorithm::from(Traversal::Bfs).traversal(), Some(Traversal::Bfs));
        assert_eq!(Algorithm::Search.traversal(), None);
        assert_eq!(Algorithm::Inorder.label(), "In-order traversal");
    }
}
