use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::status::status_info::{ChangeKind, StatusReport};
use std::io::Write;

impl Repository {
    /// Render the five-section status report: branches (current one
    /// starred), staged files, removed files, unstaged modifications,
    /// untracked files.
    ///
    /// A file counts as modified when its working bytes disagree with
    /// whichever version is authoritative for it (the staged blob if one
    /// exists, otherwise the current commit's blob), and as deleted when
    /// that authoritative version has no working file left. Untracked
    /// covers files neither staged nor tracked, including files staged
    /// for removal and then re-created.
    pub fn status(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;
        self.stage().rehydrate()?;

        let head = self.current_commit()?;
        let stage = self.stage().clone();

        let mut report = StatusReport::new(self.refs().current_branch_name()?);
        for branch in self.refs().list_branches()? {
            report.add_branch(branch);
        }
        for path in stage.to_add().keys() {
            report.add_staged(path.clone());
        }
        for path in stage.to_remove() {
            report.add_removed(path.clone());
        }

        for file in self.workspace().list_file_names()? {
            let working_oid = self.workspace().parse_blob(&file)?.object_id()?;

            if let Some(staged_oid) = stage.staged_blob_id(&file) {
                if staged_oid != &working_oid {
                    report.add_modification(file, ChangeKind::Modified);
                }
            } else if stage.is_staged_for_removal(&file) {
                report.add_untracked(file);
            } else if let Some(tracked_oid) = head.blob_id(&file) {
                if tracked_oid != &working_oid {
                    report.add_modification(file, ChangeKind::Modified);
                }
            } else {
                report.add_untracked(file);
            }
        }

        for path in stage.to_add().keys() {
            if !self.workspace().file_exists(path) {
                report.add_modification(path.clone(), ChangeKind::Deleted);
            }
        }
        for path in head.tree().keys() {
            if !self.workspace().file_exists(path)
                && !stage.is_staged_for_removal(path)
                && !stage.is_staged_for_addition(path)
            {
                report.add_modification(path.clone(), ChangeKind::Deleted);
            }
        }

        write!(self.writer(), "{}", report.render())?;

        Ok(())
    }
}
