//! Domain layer: the tree structure and the algorithm/trace engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).
//! Everything here is synchronous; traces are computed in full before anyone replays them.
//! Trees are acyclic by construction since every node is owned by exactly one slot.

pub mod algorithm;
pub mod entities;
pub mod error;
pub mod render;
pub mod search;
pub mod stats;
pub mod trace;
pub mod traversal;
pub mod tree;

pub use algorithm::Algorithm;
pub use entities::*;
pub use error::DomainError;
pub use render::TreeNodeConvert;
pub use search::{bst_search, complete_search, SearchMode};
pub use stats::TreeStats;
pub use trace::{Action, Frame, Replay, SearchResult, Step, TraversalResult};
pub use traversal::{bfs, dfs, inorder, postorder, preorder, Traversal};
pub use tree::{AvailableParent, BinaryTree, Link, Node, Side};
