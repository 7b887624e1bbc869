//! Traversal orders with step traces.
//!
//! Recursive walks share a [`Recorder`] that tracks the current path. BFS uses an
//! explicit queue and records child visits at enqueue time.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::error::DomainError;
use crate::domain::trace::{Action, Recorder, TraversalResult};
use crate::domain::tree::{BinaryTree, Node};

/// Traversal order selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Traversal {
    Inorder,
    Preorder,
    Postorder,
    Dfs,
    Bfs,
}

impl Traversal {
    pub const ALL: [Traversal; 5] = [
        Traversal::Inorder,
        Traversal::Preorder,
        Traversal::Postorder,
        Traversal::Dfs,
        Traversal::Bfs,
    ];

    pub fn run(self, root: Option<&Node>) -> TraversalResult {
        match self {
            Traversal::Inorder => inorder(root),
            Traversal::Preorder => preorder(root),
            Traversal::Postorder => postorder(root),
            Traversal::Dfs => dfs(root),
            Traversal::Bfs => bfs(root),
        }
    }
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Traversal::Inorder => "inorder",
            Traversal::Preorder => "preorder",
            Traversal::Postorder => "postorder",
            Traversal::Dfs => "dfs",
            Traversal::Bfs => "bfs",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Traversal {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "").as_str() {
            "inorder" => Ok(Traversal::Inorder),
            "preorder" => Ok(Traversal::Preorder),
            "postorder" => Ok(Traversal::Postorder),
            "dfs" => Ok(Traversal::Dfs),
            "bfs" | "levelorder" => Ok(Traversal::Bfs),
            _ => Err(DomainError::UnknownTraversal(s.to_string())),
        }
    }
}

/// Left, self, right. `Visit` on entry, `Process` between the subtrees.
#[instrument(level = "debug", skip_all)]
pub fn inorder(root: Option<&Node>) -> TraversalResult {
    fn walk(node: Option<&Node>, rec: &mut Recorder) {
        let Some(node) = node else {
            return;
        };
        rec.enter(node.value);
        rec.step(Action::Visit);
        walk(node.left.as_deref(), rec);
        rec.process();
        walk(node.right.as_deref(), rec);
        rec.leave();
    }

    let mut rec = Recorder::default();
    walk(root, &mut rec);
    rec.into_traversal()
}

/// Self, left, right. `Process` on entry only.
#[instrument(level = "debug", skip_all)]
pub fn preorder(root: Option<&Node>) -> TraversalResult {
    fn walk(node: Option<&Node>, rec: &mut Recorder) {
        let Some(node) = node else {
            return;
        };
        rec.enter(node.value);
        rec.process();
        walk(node.left.as_deref(), rec);
        walk(node.right.as_deref(), rec);
        rec.leave();
    }

    let mut rec = Recorder::default();
    walk(root, &mut rec);
    rec.into_traversal()
}

/// Left, right, self. `Visit` on entry, `Process` after both subtrees.
#[instrument(level = "debug", skip_all)]
pub fn postorder(root: Option<&Node>) -> TraversalResult {
    fn walk(node: Option<&Node>, rec: &mut Recorder) {
        let Some(node) = node else {
            return;
        };
        rec.enter(node.value);
        rec.step(Action::Visit);
        walk(node.left.as_deref(), rec);
        walk(node.right.as_deref(), rec);
        rec.process();
        rec.leave();
    }

    let mut rec = Recorder::default();
    walk(root, &mut rec);
    rec.into_traversal()
}

/// Pre-order values, with an explicit `Backtrack` once both subtrees are done.
#[instrument(level = "debug", skip_all)]
pub fn dfs(root: Option<&Node>) -> TraversalResult {
    fn walk(node: Option<&Node>, rec: &mut Recorder) {
        let Some(node) = node else {
            return;
        };
        rec.enter(node.value);
        rec.process();
        walk(node.left.as_deref(), rec);
        walk(node.right.as_deref(), rec);
        rec.step(Action::Backtrack);
        rec.leave();
    }

    let mut rec = Recorder::default();
    walk(root, &mut rec);
    rec.into_traversal()
}

/// Level order.
///
/// A child's `Visit` is recorded when it is enqueued, so both children's visits
/// directly follow their parent's `Process` step.
#[instrument(level = "debug", skip_all)]
pub fn bfs(root: Option<&Node>) -> TraversalResult {
    let mut rec = Recorder::default();
    let Some(root) = root else {
        return rec.into_traversal();
    };

    let mut queue: VecDeque<(&Node, Vec<i64>)> = VecDeque::new();
    queue.push_back((root, vec![root.value]));

    while let Some((node, path)) = queue.pop_front() {
        rec.process_at(&path);

        for child in [node.left.as_deref(), node.right.as_deref()]
            .into_iter()
            .flatten()
        {
            let mut child_path = path.clone();
            child_path.push(child.value);
            rec.step_at(&child_path, Action::Visit);
            queue.push_back((child, child_path));
        }
    }

    rec.into_traversal()
}

impl BinaryTree {
    pub fn inorder_traversal(&self) -> TraversalResult {
        inorder(self.root())
    }

    pub fn preorder_traversal(&self) -> TraversalResult {
        preorder(self.root())
    }

    pub fn postorder_traversal(&self) -> TraversalResult {
        postorder(self.root())
    }

    pub fn dfs_traversal(&self) -> TraversalResult {
        dfs(self.root())
    }

    pub fn bfs_traversal(&self) -> TraversalResult {
        bfs(self.root())
    }

    pub fn traverse(&self, order: Traversal) -> TraversalResult {
        order.run(self.root())
    }
}
