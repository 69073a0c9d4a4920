use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;
use anyhow::Context;

impl Repository {
    /// Record the staged changes as a new commit on the current branch.
    pub fn commit(&self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        if message.trim().is_empty() {
            return Err(GitletError::EmptyMessage.into());
        }

        self.stage().rehydrate()?;
        if self.stage().is_clear() {
            return Err(GitletError::NothingToCommit.into());
        }

        let parent = self.current_commit_id()?;
        self.write_commit(message.to_string(), vec![parent])?;

        Ok(())
    }

    /// Store a commit whose tree is the stage materialized onto the
    /// first parent's tree, advance the current branch to it, and clear
    /// the stage. `merge` reuses this with two parents.
    pub(crate) fn write_commit(
        &self,
        message: String,
        parents: Vec<ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        let first_parent = parents
            .first()
            .context("A non-initial commit needs a parent")?
            .clone();
        let base = self.database().load_commit(&first_parent)?;
        let tree = self.stage().materialize_into_tree(base.tree());

        let commit = Commit::new(message, chrono::Local::now().fixed_offset(), parents, tree);
        let oid = self.database().store(&commit)?;

        self.refs()
            .update_branch(&self.refs().current_branch_name()?, &oid)?;
        self.stage().clear();
        self.stage().write_updates()?;

        Ok(oid)
    }
}
