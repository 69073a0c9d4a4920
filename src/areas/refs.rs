//! Branch pointers and HEAD.
//!
//! Branches are named mutable pointers: one file per branch under
//! `.gitlet/refs/heads/`, each containing a single commit digest. HEAD
//! is a symbolic reference (`ref: refs/heads/<name>`) to the currently
//! checked-out branch, never directly to a commit, so resolving the
//! current commit is always a two-step lookup: HEAD → branch file →
//! digest.

use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;
use anyhow::Context;
use derive_new::new;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Pattern for the symbolic reference stored in HEAD.
const SYMREF_REGEX: &str = r"^ref: refs/heads/(.+)$";

/// Name of the branch created by `init`.
pub const DEFAULT_BRANCH: &str = "master";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the `.gitlet` directory.
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> PathBuf {
        self.path.join("HEAD")
    }

    pub fn heads_path(&self) -> PathBuf {
        self.path.join("refs").join("heads")
    }

    fn branch_path(&self, name: &str) -> PathBuf {
        self.heads_path().join(name)
    }

    /// Point HEAD at the given branch.
    pub fn set_head_branch(&self, name: &str) -> anyhow::Result<()> {
        self.write_ref_file(self.head_path(), &format!("ref: refs/heads/{name}"))
    }

    /// Name of the branch HEAD currently points at.
    pub fn current_branch_name(&self) -> anyhow::Result<String> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("Unable to read HEAD at {}", head_path.display()))?;
        let content = content.trim();

        let captures = regex::Regex::new(SYMREF_REGEX)?
            .captures(content)
            .with_context(|| format!("HEAD is not a symbolic reference: {content:?}"))?;

        Ok(captures[1].to_string())
    }

    /// Digest the given branch points at, or None for a branch file
    /// that does not exist.
    pub fn read_branch(&self, name: &str) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.branch_path(name);
        if !branch_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("Unable to read branch file {}", branch_path.display()))?;

        Ok(Some(ObjectId::try_parse(content.trim().to_string())?))
    }

    pub fn branch_exists(&self, name: &str) -> bool {
        self.branch_path(name).is_file()
    }

    /// Move an existing branch pointer (or the default branch during
    /// init) to the given digest.
    pub fn update_branch(&self, name: &str, oid: &ObjectId) -> anyhow::Result<()> {
        self.write_ref_file(self.branch_path(name), oid.as_ref())
    }

    /// Create a new branch pointing at the given digest.
    pub fn create_branch(&self, name: &str, oid: &ObjectId) -> anyhow::Result<()> {
        if self.branch_exists(name) {
            return Err(GitletError::BranchAlreadyExists.into());
        }

        self.write_ref_file(self.branch_path(name), oid.as_ref())
    }

    /// Delete a branch pointer. The commits it referenced stay stored.
    pub fn delete_branch(&self, name: &str) -> anyhow::Result<()> {
        if !self.branch_exists(name) {
            return Err(GitletError::NoSuchBranch.into());
        }
        if name == self.current_branch_name()? {
            return Err(GitletError::CannotRemoveCurrentBranch.into());
        }

        let branch_path = self.branch_path(name);
        std::fs::remove_file(&branch_path)
            .with_context(|| format!("Unable to delete branch file {}", branch_path.display()))
    }

    /// All branch names, sorted.
    pub fn list_branches(&self) -> anyhow::Result<Vec<String>> {
        let heads_path = self.heads_path();
        let mut names = std::fs::read_dir(&heads_path)
            .with_context(|| format!("Unable to list branches in {}", heads_path.display()))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect::<Vec<_>>();
        names.sort();

        Ok(names)
    }

    /// Digest of the current commit, via HEAD and the current branch.
    pub fn read_head_oid(&self) -> anyhow::Result<ObjectId> {
        let branch = self.current_branch_name()?;
        self.read_branch(&branch)?
            .with_context(|| format!("Branch {branch} has no commits"))
    }

    fn write_ref_file(&self, path: PathBuf, content: &str) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!("Invalid ref file path {}", path.display())
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("Unable to open ref file {}", path.display()))?;
        ref_file
            .write_all(content.as_bytes())
            .with_context(|| format!("Unable to write ref file {}", path.display()))
    }
}
