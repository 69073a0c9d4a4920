//! Staging area.
//!
//! The only mutable persisted structure besides branch pointers: a map
//! of pending additions (path → blob id) and a set of pending removals.
//! The two are mutually exclusive for any given path at any instant;
//! every mutator below maintains that invariant. Persisted as JSON at
//! `.gitlet/index` with ordered collections so the file is stable.

use crate::artifacts::objects::commit::Tree;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stage {
    #[serde(skip)]
    path: PathBuf,
    to_add: BTreeMap<String, ObjectId>,
    to_remove: BTreeSet<String>,
}

impl Stage {
    pub fn new(path: PathBuf) -> Self {
        Stage {
            path,
            ..Default::default()
        }
    }

    /// Reload the stage from disk, replacing any in-memory state. A
    /// missing or empty index file yields a clear stage.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.to_add.clear();
        self.to_remove.clear();

        if !self.path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Unable to read index file {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(());
        }

        let loaded: Stage = serde_json::from_str(&content)
            .with_context(|| format!("Malformed index file {}", self.path.display()))?;
        self.to_add = loaded.to_add;
        self.to_remove = loaded.to_remove;

        Ok(())
    }

    pub fn write_updates(&self) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self).context("Unable to encode index")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Unable to write index file {}", self.path.display()))
    }

    pub fn is_clear(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    pub fn clear(&mut self) {
        self.to_add.clear();
        self.to_remove.clear();
    }

    pub fn to_add(&self) -> &BTreeMap<String, ObjectId> {
        &self.to_add
    }

    pub fn to_remove(&self) -> &BTreeSet<String> {
        &self.to_remove
    }

    pub fn is_staged_for_addition(&self, path: &str) -> bool {
        self.to_add.contains_key(path)
    }

    pub fn staged_blob_id(&self, path: &str) -> Option<&ObjectId> {
        self.to_add.get(path)
    }

    pub fn is_staged_for_removal(&self, path: &str) -> bool {
        self.to_remove.contains(path)
    }

    /// Record a pending addition, displacing any pending removal.
    pub fn stage_for_addition(&mut self, path: String, oid: ObjectId) {
        self.to_remove.remove(&path);
        self.to_add.insert(path, oid);
    }

    /// Record a pending removal, displacing any pending addition.
    pub fn stage_for_removal(&mut self, path: String) {
        self.to_add.remove(&path);
        self.to_remove.insert(path);
    }

    /// Drop a pending addition. Returns whether one was present.
    pub fn discard_addition(&mut self, path: &str) -> bool {
        self.to_add.remove(path).is_some()
    }

    /// Drop the path from both maps: used when a working file turns out
    /// to be identical to the tracked version, making staging a no-op.
    pub fn unstage(&mut self, path: &str) {
        self.to_add.remove(path);
        self.to_remove.remove(path);
    }

    /// Apply pending additions as overwrites/insertions and pending
    /// removals as deletions onto a copy of `base`.
    pub fn materialize_into_tree(&self, base: &Tree) -> Tree {
        let mut tree = base.clone();
        for (path, oid) in &self.to_add {
            tree.insert(path.clone(), oid.clone());
        }
        for path in &self.to_remove {
            tree.remove(path);
        }

        tree
    }
}
