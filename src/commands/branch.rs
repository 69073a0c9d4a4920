use crate::areas::repository::Repository;

impl Repository {
    /// Create a branch pointing at the current commit. HEAD stays where
    /// it is.
    pub fn branch(&self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let oid = self.current_commit_id()?;
        self.refs().create_branch(name, &oid)
    }

    /// Delete a branch pointer. The commits it referenced stay in the
    /// database and remain visible to `global-log`.
    pub fn rm_branch(&self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        self.refs().delete_branch(name)
    }
}
