use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Commit, Tree};
use crate::errors::GitletError;
use anyhow::Context;

impl Repository {
    /// `checkout -- <file>`: restore a single file from the current
    /// commit. The stage is left untouched.
    pub fn checkout_file(&self, file: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let head = self.current_commit()?;
        self.restore_file(&head, file)
    }

    /// `checkout <commit> -- <file>`: restore a single file from the
    /// given commit, identified by a full or abbreviated digest.
    pub fn checkout_file_from_commit(&self, commit: &str, file: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let oid = self.database().resolve_commit_prefix(commit)?;
        let commit = self.database().load_commit(&oid)?;
        self.restore_file(&commit, file)
    }

    /// `checkout <branch>`: rewrite the working tree to the branch tip,
    /// clear the stage, and move HEAD to the branch.
    pub fn checkout_branch(&self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        if !self.refs().branch_exists(name) {
            return Err(GitletError::NoSuchBranchCheckout.into());
        }
        if name == self.refs().current_branch_name()? {
            return Err(GitletError::AlreadyOnBranch.into());
        }

        let target_oid = self
            .refs()
            .read_branch(name)?
            .with_context(|| format!("Branch {name} has no commits"))?;
        let target = self.database().load_commit(&target_oid)?;
        let current = self.current_commit()?;

        self.reconcile_working_tree(current.tree(), target.tree())?;
        self.stage().clear();
        self.stage().write_updates()?;
        self.refs().set_head_branch(name)?;

        Ok(())
    }

    /// Overwrite the working copy of `file` with its version in `commit`.
    pub(crate) fn restore_file(&self, commit: &Commit, file: &str) -> anyhow::Result<()> {
        let blob_oid = commit.blob_id(file).ok_or(GitletError::FileNotInCommit)?;
        let blob = self.database().load_blob(blob_oid)?;
        self.workspace().write_file(file, blob.content())
    }

    /// Rewrite the working tree from `current` to `target`: every file
    /// in `target` is materialized, every file tracked only by `current`
    /// is deleted, everything else is left alone.
    ///
    /// The untracked-overwrite check runs first, so a failed checkout
    /// leaves the working tree untouched.
    pub(crate) fn reconcile_working_tree(
        &self,
        current: &Tree,
        target: &Tree,
    ) -> anyhow::Result<()> {
        for path in target.keys() {
            if !current.contains_key(path) && self.workspace().file_exists(path) {
                return Err(GitletError::UntrackedFileConflict.into());
            }
        }

        for (path, oid) in target {
            let blob = self.database().load_blob(oid)?;
            self.workspace().write_file(path, blob.content())?;
        }
        for path in current.keys() {
            if !target.contains_key(path) {
                self.workspace().remove_file(path)?;
            }
        }

        Ok(())
    }
}
