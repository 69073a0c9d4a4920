use crate::areas::repository::Repository;

impl Repository {
    /// Move the current branch pointer to the given commit and rewrite
    /// the working tree to match it. HEAD keeps naming the same branch;
    /// the stage is cleared.
    pub fn reset(&self, commit: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let target_oid = self.database().resolve_commit_prefix(commit)?;
        let target = self.database().load_commit(&target_oid)?;
        let current = self.current_commit()?;

        self.reconcile_working_tree(current.tree(), target.tree())?;
        self.stage().clear();
        self.stage().write_updates()?;
        self.refs()
            .update_branch(&self.refs().current_branch_name()?, &target_oid)
    }
}
