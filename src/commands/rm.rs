use crate::areas::repository::Repository;
use crate::errors::GitletError;

impl Repository {
    /// Unstage a pending addition and, if the file is tracked by the
    /// current commit, stage it for removal and delete the working copy.
    ///
    /// A file that is neither staged nor tracked gives no reason to
    /// remove anything.
    pub fn rm(&self, file: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;
        self.stage().rehydrate()?;

        let head = self.current_commit()?;
        let was_staged = self.stage().discard_addition(file);
        let tracked = head.tracks(file);

        if !was_staged && !tracked {
            return Err(GitletError::NothingToRemove.into());
        }

        if tracked {
            self.stage().stage_for_removal(file.to_string());
            self.workspace().remove_file(file)?;
        }

        self.stage().write_updates()
    }
}
