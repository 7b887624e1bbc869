//! Domain entities: saved tree snapshots

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::algorithm::Algorithm;
use crate::domain::error::DomainError;
use crate::domain::tree::BinaryTree;

/// Owner used when no user is configured.
pub const ANONYMOUS_USER: &str = "anonymous";

/// A named, persisted tree.
///
/// The tree is stored as the nested `{value, left, right}` record under `treeData`.
/// `name`, `algorithm` and `userId` are metadata the engine does not interpret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub id: Uuid,
    pub name: String,
    pub tree_data: BinaryTree,
    #[serde(default)]
    pub algorithm: Algorithm,
    #[serde(default = "default_user")]
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_user() -> String {
    ANONYMOUS_USER.to_string()
}

impl Snapshot {
    /// Create a new snapshot record, validating name and contents.
    pub fn new(
        name: &str,
        tree: BinaryTree,
        algorithm: Algorithm,
        user_id: &str,
    ) -> Result<Self, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::EmptyName);
        }
        if tree.is_empty() {
            return Err(DomainError::EmptyTree);
        }
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            tree_data: tree,
            algorithm,
            user_id: user_id.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply the provided fields and bump `updated_at`.
    ///
    /// A blank replacement name is rejected; the tree may be replaced by an empty one.
    pub fn apply(&mut self, update: SnapshotUpdate) -> Result<(), DomainError> {
        if let Some(name) = update.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(DomainError::EmptyName);
            }
            self.name = name.to_string();
        }
        if let Some(tree) = update.tree {
            self.tree_data = tree;
        }
        if let Some(algorithm) = update.algorithm {
            self.algorithm = algorithm;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Partial update; `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotUpdate {
    pub name: Option<String>,
    pub tree: Option<BinaryTree>,
    pub algorithm: Option<Algorithm>,
}

impl SnapshotUpdate {
    pub fn tree(tree: BinaryTree, algorithm: Algorithm) -> Self {
        Self {
            name: None,
            tree: Some(tree),
            algorithm: Some(algorithm),
        }
    }

    /// Only record the last operation run on the snapshot.
    pub fn tagged(algorithm: Algorithm) -> Self {
        Self {
            algorithm: Some(algorithm),
            ..Self::default()
        }
    }

    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}
