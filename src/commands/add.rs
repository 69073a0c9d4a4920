use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::errors::GitletError;

impl Repository {
    /// Stage a working file for the next commit.
    ///
    /// If the working version is identical to the version in the
    /// current commit there is nothing to record, and any stale entry
    /// for the path is dropped from both sides of the stage. Otherwise
    /// the blob is stored first, so the stage never references a digest
    /// that is not in the database.
    pub fn add(&self, file: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;
        self.stage().rehydrate()?;

        if !self.workspace().file_exists(file) {
            return Err(GitletError::FileDoesNotExist.into());
        }

        let blob = self.workspace().parse_blob(file)?;
        let oid = blob.object_id()?;
        let head = self.current_commit()?;

        if head.blob_id(file) == Some(&oid) {
            self.stage().unstage(file);
        } else {
            self.database().store(&blob)?;
            self.stage().stage_for_addition(file.to_string(), oid);
        }

        self.stage().write_updates()
    }
}
