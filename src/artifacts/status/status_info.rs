//! Status report assembly
//!
//! Collects the five status sections and renders them in their fixed
//! order and format:
//!
//! ```text
//! === Branches ===
//! *master
//! other-branch
//!
//! === Staged Files ===
//! wug.txt
//!
//! === Removed Files ===
//! goodbye.txt
//!
//! === Modifications Not Staged For Commit ===
//! junk.txt (deleted)
//! wug3.txt (modified)
//!
//! === Untracked Files ===
//! random.stuff
//! ```
//!
//! All sections are name-sorted; the gathering logic lives in the
//! status command, this type only accumulates and formats.

use std::collections::BTreeSet;
use std::fmt::Write;

/// How an unstaged working-tree change differs from the recorded state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChangeKind {
    Modified,
    Deleted,
}

impl ChangeKind {
    fn suffix(&self) -> &'static str {
        match self {
            ChangeKind::Modified => "(modified)",
            ChangeKind::Deleted => "(deleted)",
        }
    }
}

#[derive(Debug, Default)]
pub struct StatusReport {
    current_branch: String,
    branches: BTreeSet<String>,
    staged: BTreeSet<String>,
    removed: BTreeSet<String>,
    modified_not_staged: BTreeSet<(String, ChangeKind)>,
    untracked: BTreeSet<String>,
}

impl StatusReport {
    pub fn new(current_branch: String) -> Self {
        StatusReport {
            current_branch,
            ..Default::default()
        }
    }

    pub fn add_branch(&mut self, name: String) {
        self.branches.insert(name);
    }

    pub fn add_staged(&mut self, path: String) {
        self.staged.insert(path);
    }

    pub fn add_removed(&mut self, path: String) {
        self.removed.insert(path);
    }

    pub fn add_modification(&mut self, path: String, kind: ChangeKind) {
        self.modified_not_staged.insert((path, kind));
    }

    pub fn add_untracked(&mut self, path: String) {
        self.untracked.insert(path);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "=== Branches ===");
        for branch in &self.branches {
            if branch == &self.current_branch {
                let _ = writeln!(out, "*{branch}");
            } else {
                let _ = writeln!(out, "{branch}");
            }
        }
        let _ = writeln!(out);

        Self::render_section(&mut out, "=== Staged Files ===", self.staged.iter());
        Self::render_section(&mut out, "=== Removed Files ===", self.removed.iter());

        let _ = writeln!(out, "=== Modifications Not Staged For Commit ===");
        for (path, kind) in &self.modified_not_staged {
            let _ = writeln!(out, "{path} {}", kind.suffix());
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "=== Untracked Files ===");
        for path in &self.untracked {
            let _ = writeln!(out, "{path}");
        }
        let _ = writeln!(out);

        out
    }

    fn render_section<'e>(
        out: &mut String,
        title: &str,
        entries: impl Iterator<Item = &'e String>,
    ) {
        let _ = writeln!(out, "{title}");
        for entry in entries {
            let _ = writeln!(out, "{entry}");
        }
        let _ = writeln!(out);
    }
}
