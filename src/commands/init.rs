use crate::areas::refs::DEFAULT_BRANCH;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_kind::ObjectKind;
use crate::errors::GitletError;
use anyhow::Context;

impl Repository {
    /// Create the `.gitlet` layout with a single initial commit on the
    /// default branch.
    ///
    /// Because the initial commit is a pure value, every repository
    /// starts from the same root digest. The branch pointer and HEAD
    /// are written only after the commit object is durably stored.
    pub fn init(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(GitletError::RepositoryExists.into());
        }

        let gitlet_path = self.gitlet_path();
        for collection in [ObjectKind::Blob, ObjectKind::Commit] {
            let collection_path = gitlet_path.join("objects").join(collection.collection_name());
            std::fs::create_dir_all(&collection_path).with_context(|| {
                format!("Unable to create {}", collection_path.display())
            })?;
        }
        std::fs::create_dir_all(self.refs().heads_path())
            .context("Unable to create the refs directory")?;

        let initial_oid = self.database().store(&Commit::initial())?;
        self.refs().update_branch(DEFAULT_BRANCH, &initial_oid)?;
        self.refs().set_head_branch(DEFAULT_BRANCH)?;
        self.stage().write_updates()?;

        Ok(())
    }
}
