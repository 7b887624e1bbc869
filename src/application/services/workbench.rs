//! Working-tree service
//!
//! Applies structural edits to a named snapshot: load, mutate, save. Each call is
//! the single writer of the snapshot it touches for its whole duration.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::services::SnapshotService;
use crate::application::ApplicationResult;
use crate::domain::{
    Algorithm, BinaryTree, DomainError, SearchMode, SearchResult, Side, Snapshot, SnapshotUpdate,
    Traversal, TraversalResult,
};

/// A loaded working tree and the snapshot backing it, if it was saved before.
#[derive(Debug, Clone)]
pub struct Workbench {
    pub name: String,
    pub snapshot: Option<Snapshot>,
    pub tree: BinaryTree,
}

/// Service for editing named working trees.
pub struct WorkbenchService {
    snapshots: Arc<SnapshotService>,
    user_id: String,
}

impl WorkbenchService {
    pub fn new(snapshots: Arc<SnapshotService>, user_id: impl Into<String>) -> Self {
        Self {
            snapshots,
            user_id: user_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Load the working tree; an unsaved name yields an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn open(&self, name: &str) -> ApplicationResult<Workbench> {
        let snapshot = self.snapshots.find_by_name(&self.user_id, name)?;
        let tree = snapshot
            .as_ref()
            .map(|s| s.tree_data.clone())
            .unwrap_or_default();
        debug!("open {}: saved={}", name, snapshot.is_some());
        Ok(Workbench {
            name: name.trim().to_string(),
            snapshot,
            tree,
        })
    }

    /// BST-insert each value in order; duplicates are skipped.
    pub fn insert(&self, name: &str, values: &[i64]) -> ApplicationResult<Workbench> {
        self.edit(name, Algorithm::Insert, |tree| {
            for &value in values {
                tree.insert(value);
            }
            Ok(())
        })
    }

    /// Attach a value at an explicit position, ignoring BST ordering.
    pub fn insert_manual(
        &self,
        name: &str,
        value: i64,
        parent: i64,
        side: Side,
    ) -> ApplicationResult<Workbench> {
        self.edit(name, Algorithm::Insert, |tree| {
            if tree.insert_manual(value, parent, side) {
                Ok(())
            } else {
                Err(DomainError::SlotUnavailable {
                    value,
                    parent,
                    side,
                })
            }
        })
    }

    /// Delete a value, reporting absent values as `NodeNotFound`.
    pub fn delete(&self, name: &str, value: i64) -> ApplicationResult<Workbench> {
        self.edit(name, Algorithm::Delete, |tree| {
            if !tree.contains(value) {
                return Err(DomainError::NodeNotFound(value));
            }
            tree.delete(value);
            Ok(())
        })
    }

    pub fn clear(&self, name: &str) -> ApplicationResult<Workbench> {
        self.edit(name, Algorithm::Clear, |tree| {
            tree.clear();
            Ok(())
        })
    }

    /// Search the working tree; a saved snapshot is tagged `search`.
    #[instrument(level = "debug", skip(self))]
    pub fn search(
        &self,
        name: &str,
        target: i64,
        mode: SearchMode,
    ) -> ApplicationResult<(Workbench, SearchResult)> {
        let bench = self.open(name)?;
        let result = bench.tree.search(target, mode);
        Ok((self.tag(bench, Algorithm::Search)?, result))
    }

    /// Traverse the working tree; a saved snapshot is tagged with the order.
    #[instrument(level = "debug", skip(self))]
    pub fn traverse(
        &self,
        name: &str,
        order: Traversal,
    ) -> ApplicationResult<(Workbench, TraversalResult)> {
        let bench = self.open(name)?;
        let result = bench.tree.traverse(order);
        Ok((self.tag(bench, Algorithm::from(order))?, result))
    }

    fn edit<F>(&self, name: &str, algorithm: Algorithm, apply: F) -> ApplicationResult<Workbench>
    where
        F: FnOnce(&mut BinaryTree) -> Result<(), DomainError>,
    {
        let mut bench = self.open(name)?;
        apply(&mut bench.tree)?;
        self.commit(bench, algorithm)
    }

    /// Record `algorithm` on the backing snapshot without touching the tree.
    fn tag(&self, mut bench: Workbench, algorithm: Algorithm) -> ApplicationResult<Workbench> {
        bench.snapshot = match bench.snapshot.take() {
            Some(existing) if existing.algorithm != algorithm => Some(
                self.snapshots
                    .update(&existing.id, SnapshotUpdate::tagged(algorithm))?,
            ),
            other => other,
        };
        Ok(bench)
    }

    /// Persist the working tree.
    ///
    /// Saved snapshots are updated in place, even to an empty tree. An unsaved
    /// empty tree has nothing to store and is returned as is.
    fn commit(&self, mut bench: Workbench, algorithm: Algorithm) -> ApplicationResult<Workbench> {
        bench.snapshot = match bench.snapshot.take() {
            Some(existing) => Some(self.snapshots.update(
                &existing.id,
                SnapshotUpdate::tree(bench.tree.clone(), algorithm),
            )?),
            None if bench.tree.is_empty() => None,
            None => Some(self.snapshots.create(
                &bench.name,
                bench.tree.clone(),
                algorithm,
                &self.user_id,
            )?),
        };
        Ok(bench)
    }
}
