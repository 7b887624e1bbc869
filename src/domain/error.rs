//! Domain-level errors (no I/O concerns)

use thiserror::Error;
use uuid::Uuid;

use crate::domain::tree::Side;

/// Domain errors represent violations of tree and snapshot rules.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("invalid side: {0} (expected 'left' or 'right')")]
    InvalidSide(String),

    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("unknown traversal: {0}")]
    UnknownTraversal(String),

    #[error("unknown search mode: {0}")]
    UnknownSearchMode(String),

    #[error("node {0} not found in tree")]
    NodeNotFound(i64),

    #[error("cannot insert {value}: parent {parent} not found or its {side} slot is occupied")]
    SlotUnavailable { value: i64, parent: i64, side: Side },

    #[error("tree name is required")]
    EmptyName,

    #[error("cannot save an empty tree")]
    EmptyTree,

    #[error("snapshot not found: {0}")]
    SnapshotNotFound(String),
}

impl DomainError {
    pub fn snapshot_not_found(id: &Uuid) -> Self {
        Self::SnapshotNotFound(id.to_string())
    }
}
