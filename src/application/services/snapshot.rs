//! Snapshot store service
//!
//! Persists trees as one JSON record per snapshot under the store directory:
//! `<store_dir>/<id>.json`. Whole records are read and written; writes are atomic.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::application::{ApplicationResult, PathContextExt};
use crate::domain::{Algorithm, BinaryTree, DomainError, Snapshot, SnapshotUpdate};
use crate::infrastructure::traits::FileSystem;

const SNAPSHOT_EXTENSION: &str = "json";

/// Service for saving, loading and managing tree snapshots.
pub struct SnapshotService {
    fs: Arc<dyn FileSystem>,
    store_dir: PathBuf,
}

impl SnapshotService {
    /// Create a new snapshot service rooted at `store_dir`.
    pub fn new(fs: Arc<dyn FileSystem>, store_dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            store_dir: store_dir.into(),
        }
    }

    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    fn path_for(&self, id: &Uuid) -> PathBuf {
        self.store_dir.join(format!("{}.{}", id, SNAPSHOT_EXTENSION))
    }

    /// Save a new snapshot. Rejects blank names and empty trees.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn create(
        &self,
        name: &str,
        tree: BinaryTree,
        algorithm: Algorithm,
        user_id: &str,
    ) -> ApplicationResult<Snapshot> {
        let snapshot = Snapshot::new(name, tree, algorithm, user_id)?;
        self.write(&snapshot)?;
        info!("created snapshot {} ({})", snapshot.name, snapshot.id);
        Ok(snapshot)
    }

    /// All snapshots owned by `user_id`, newest first.
    #[instrument(level = "debug", skip(self))]
    pub fn list(&self, user_id: &str) -> ApplicationResult<Vec<Snapshot>> {
        let mut snapshots: Vec<_> = self
            .load_all()?
            .into_iter()
            .filter(|s| s.user_id == user_id)
            .collect();
        snapshots.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(snapshots)
    }

    /// Load one snapshot by id.
    #[instrument(level = "debug", skip(self))]
    pub fn get(&self, id: &Uuid) -> ApplicationResult<Snapshot> {
        let path = self.path_for(id);
        if !self.fs.is_file(&path) {
            return Err(DomainError::snapshot_not_found(id).into());
        }
        self.read(&path)
    }

    /// Newest snapshot of `user_id` with exactly this (trimmed) name.
    pub fn find_by_name(&self, user_id: &str, name: &str) -> ApplicationResult<Option<Snapshot>> {
        let name = name.trim();
        Ok(self.list(user_id)?.into_iter().find(|s| s.name == name))
    }

    /// Resolve a snapshot reference given as an id or as a name.
    pub fn resolve(&self, user_id: &str, key: &str) -> ApplicationResult<Snapshot> {
        if let Ok(id) = Uuid::parse_str(key.trim()) {
            return self.get(&id);
        }
        self.find_by_name(user_id, key)?
            .ok_or_else(|| DomainError::SnapshotNotFound(key.to_string()).into())
    }

    /// Apply a partial update and persist it.
    #[instrument(level = "debug", skip(self, update))]
    pub fn update(&self, id: &Uuid, update: SnapshotUpdate) -> ApplicationResult<Snapshot> {
        let mut snapshot = self.get(id)?;
        snapshot.apply(update)?;
        self.write(&snapshot)?;
        debug!("updated snapshot {}", id);
        Ok(snapshot)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn delete(&self, id: &Uuid) -> ApplicationResult<()> {
        let path = self.path_for(id);
        if !self.fs.is_file(&path) {
            return Err(DomainError::snapshot_not_found(id).into());
        }
        self.fs
            .remove_file(&path)
            .with_path_context("remove snapshot", &path)?;
        info!("deleted snapshot {}", id);
        Ok(())
    }

    /// Delete every snapshot of `user_id`; returns how many were removed.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_all(&self, user_id: &str) -> ApplicationResult<usize> {
        let owned = self.list(user_id)?;
        for snapshot in &owned {
            self.delete(&snapshot.id)?;
        }
        Ok(owned.len())
    }

    /// Every readable record in the store; unreadable ones are skipped with a warning.
    fn load_all(&self) -> ApplicationResult<Vec<Snapshot>> {
        if !self.fs.exists(&self.store_dir) {
            debug!("store {} does not exist yet", self.store_dir.display());
            return Ok(Vec::new());
        }

        let snapshots = self
            .fs
            .list_dir(&self.store_dir)
            .with_path_context("list snapshot store", &self.store_dir)?
            .into_iter()
            .filter(|p| p.extension().is_some_and(|ext| ext == SNAPSHOT_EXTENSION))
            .filter(|p| self.fs.is_file(p))
            .filter_map(|p| match self.read(&p) {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    warn!("skipping {}: {}", p.display(), e);
                    None
                }
            })
            .collect();
        Ok(snapshots)
    }

    fn read(&self, path: &Path) -> ApplicationResult<Snapshot> {
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read snapshot", path)?;
        serde_json::from_str::<Snapshot>(&content).with_path_context("parse snapshot", path)
    }

    fn write(&self, snapshot: &Snapshot) -> ApplicationResult<()> {
        let path = self.path_for(&snapshot.id);
        let content =
            serde_json::to_string_pretty(snapshot).with_path_context("encode snapshot", &path)?;
        self.fs
            .write_atomic(&path, &content)
            .with_path_context("write snapshot", &path)
    }
}
