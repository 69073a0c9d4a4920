use crate::areas::repository::Repository;
use crate::artifacts::merge::split_finder::SplitFinder;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeSet;
use std::io::Write;

impl Repository {
    /// Three-way merge of the given branch into the current one.
    ///
    /// The split point is the lowest common ancestor of the two tips.
    /// Two degenerate shapes short-circuit without creating a commit:
    /// the given tip being the split point (nothing to merge) and the
    /// current tip being the split point (fast-forward). Otherwise each
    /// path is reconciled against the split point, conflicts get marker
    /// files, and a two-parent merge commit is recorded. A conflict is a
    /// reported sub-outcome of a successful merge, not an error.
    pub fn merge(&self, branch: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;
        self.stage().rehydrate()?;

        if !self.stage().is_clear() {
            return Err(GitletError::UncommittedChanges.into());
        }
        if !self.refs().branch_exists(branch) {
            return Err(GitletError::NoSuchBranch.into());
        }
        let current_branch = self.refs().current_branch_name()?;
        if branch == current_branch {
            return Err(GitletError::SelfMerge.into());
        }

        let current_oid = self.current_commit_id()?;
        let other_oid = self
            .refs()
            .read_branch(branch)?
            .with_context(|| format!("Branch {branch} has no commits"))?;

        let split_oid = {
            let database = self.database();
            let finder = SplitFinder::new(|oid: &ObjectId| -> anyhow::Result<Vec<ObjectId>> {
                Ok(database.load_commit(oid)?.parents().to_vec())
            });
            finder.find_split_point(&current_oid, &other_oid)?
        };

        if split_oid == other_oid {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(());
        }

        if split_oid == current_oid {
            // the merged history already exists on the given branch, so
            // fast-forwarding is just checking that branch out
            self.checkout_branch(branch)?;
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }

        let current = self.database().load_commit(&current_oid)?;
        let other = self.database().load_commit(&other_oid)?;
        let split = self.database().load_commit(&split_oid)?;
        let conflicted = self.reconcile_merge(&split, &current, &other)?;

        self.write_commit(
            format!("Merged {branch} into {current_branch}."),
            vec![current_oid, other_oid],
        )?;

        if conflicted {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(())
    }

    /// Reconcile every path in the union of the three trees, staging
    /// the resulting changes. Returns whether any path conflicted.
    fn reconcile_merge(
        &self,
        split: &Commit,
        current: &Commit,
        other: &Commit,
    ) -> anyhow::Result<bool> {
        let mut paths = BTreeSet::new();
        paths.extend(split.tree().keys().cloned());
        paths.extend(current.tree().keys().cloned());
        paths.extend(other.tree().keys().cloned());

        // untracked check first so a refused merge leaves the working
        // tree untouched
        for path in &paths {
            if !current.tracks(path) && other.tracks(path) && self.workspace().file_exists(path) {
                return Err(GitletError::UntrackedFileConflict.into());
            }
        }

        let mut conflicted = false;
        for path in &paths {
            let base = split.blob_id(path);
            let ours = current.blob_id(path);
            let theirs = other.blob_id(path);

            if ours == theirs || base == theirs {
                // identical on both sides, or changed only on ours:
                // the working tree already holds the right version
                continue;
            }

            if base == ours {
                // changed only on theirs: take their version
                match theirs {
                    Some(oid) => {
                        let blob = self.database().load_blob(oid)?;
                        self.workspace().write_file(path, blob.content())?;
                        self.stage().stage_for_addition(path.clone(), oid.clone());
                    }
                    None => {
                        self.workspace().remove_file(path)?;
                        self.stage().stage_for_removal(path.clone());
                    }
                }
                continue;
            }

            // changed differently on both sides
            conflicted = true;
            let blob = self.write_conflict_file(path, ours, theirs)?;
            let oid = self.database().store(&blob)?;
            self.stage().stage_for_addition(path.clone(), oid);
        }

        self.stage().write_updates()?;
        Ok(conflicted)
    }

    /// Replace the working copy of a conflicted path with both versions
    /// between markers. An absent side contributes nothing between its
    /// markers.
    fn write_conflict_file(
        &self,
        path: &str,
        ours: Option<&ObjectId>,
        theirs: Option<&ObjectId>,
    ) -> anyhow::Result<Blob> {
        let mut content = Vec::new();
        content.extend_from_slice(b"<<<<<<< HEAD\n");
        if let Some(oid) = ours {
            content.extend_from_slice(self.database().load_blob(oid)?.content());
        }
        content.extend_from_slice(b"=======\n");
        if let Some(oid) = theirs {
            content.extend_from_slice(self.database().load_blob(oid)?.content());
        }
        content.extend_from_slice(b">>>>>>>\n");

        let blob = Blob::new(path.to_string(), Bytes::from(content));
        self.workspace().write_file(path, blob.content())?;

        Ok(blob)
    }
}
