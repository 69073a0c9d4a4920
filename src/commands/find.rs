use crate::areas::repository::Repository;
use crate::errors::GitletError;
use std::io::Write;

impl Repository {
    /// Print the ids of every stored commit whose message matches
    /// `message` exactly, one per line, ordered by digest.
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let mut oids = self.database().list_commit_ids()?;
        oids.sort();

        let mut found = false;
        for oid in oids {
            if self.database().load_commit(&oid)?.message() == message {
                writeln!(self.writer(), "{oid}")?;
                found = true;
            }
        }

        if !found {
            return Err(GitletError::NoCommitWithMessage.into());
        }

        Ok(())
    }
}
