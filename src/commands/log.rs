use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Walk the first-parent chain from the current commit back to the
    /// initial commit. Second parents of merge commits are not
    /// traversed, only shown in the `Merge:` line.
    pub fn log(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let mut cursor = Some(self.current_commit_id()?);
        while let Some(oid) = cursor {
            let commit = self.database().load_commit(&oid)?;
            self.print_commit(&oid, &commit)?;
            cursor = commit.first_parent().cloned();
        }

        Ok(())
    }

    /// Every commit ever stored, regardless of reachability. Ordered by
    /// digest so the output is reproducible.
    pub fn global_log(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let mut oids = self.database().list_commit_ids()?;
        oids.sort();
        for oid in oids {
            let commit = self.database().load_commit(&oid)?;
            self.print_commit(&oid, &commit)?;
        }

        Ok(())
    }

    fn print_commit(&self, oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "===")?;
        writeln!(writer, "commit {oid}")?;
        if let (Some(first), Some(second)) = (commit.first_parent(), commit.second_parent()) {
            writeln!(
                writer,
                "Merge: {} {}",
                first.to_short_oid(),
                second.to_short_oid()
            )?;
        }
        writeln!(writer, "Date: {}", commit.readable_timestamp())?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;

        Ok(())
    }
}
