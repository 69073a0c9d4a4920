//! Working-directory access.
//!
//! Tracked paths are plain file names in the repository root; the
//! `.gitlet` directory and subdirectories are never listed or touched.
//! All reads and writes are whole-file and assumed atomic per call.

use crate::artifacts::objects::blob::Blob;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::path::Path;

const GITLET_DIR_NAME: &str = ".gitlet";

#[derive(Debug, new)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Plain file names in the repository root, sorted. Directories
    /// (including `.gitlet`) are skipped.
    pub fn list_file_names(&self) -> anyhow::Result<Vec<String>> {
        let mut names = std::fs::read_dir(&self.path)
            .with_context(|| format!("Unable to list directory {}", self.path.display()))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name != GITLET_DIR_NAME)
            .collect::<Vec<_>>();
        names.sort();

        Ok(names)
    }

    pub fn file_exists(&self, name: &str) -> bool {
        self.path.join(name).is_file()
    }

    pub fn read_file(&self, name: &str) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(name);
        let content = std::fs::read(&file_path)
            .with_context(|| format!("Unable to read file {}", file_path.display()))?;

        Ok(Bytes::from(content))
    }

    /// Read a working file into a transient blob. The blob is not
    /// stored; callers compare or store it themselves.
    pub fn parse_blob(&self, name: &str) -> anyhow::Result<Blob> {
        let content = self.read_file(name)?;
        Ok(Blob::new(name.to_string(), content))
    }

    pub fn write_file(&self, name: &str, content: &[u8]) -> anyhow::Result<()> {
        let file_path = self.path.join(name);
        std::fs::write(&file_path, content)
            .with_context(|| format!("Unable to write file {}", file_path.display()))
    }

    /// Delete a working file. Missing files are a no-op so callers can
    /// reconcile a tree that is already partially absent.
    pub fn remove_file(&self, name: &str) -> anyhow::Result<()> {
        let file_path = self.path.join(name);
        if file_path.is_file() {
            std::fs::remove_file(&file_path)
                .with_context(|| format!("Unable to remove file {}", file_path.display()))?;
        }

        Ok(())
    }
}
