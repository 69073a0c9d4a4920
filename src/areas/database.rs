//! Object database.
//!
//! A write-once, digest-keyed store under `.gitlet/objects`, split into
//! two collections: `blobs/` for file snapshots and `commits/` for
//! history nodes. Object files are zlib-compressed and written through
//! a temp file plus rename so a half-written object is never visible
//! under its digest. There is no update or delete: storing identical
//! content twice is a no-op.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_kind::ObjectKind;
use crate::errors::GitletError;
use anyhow::Context;
use bytes::Bytes;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    fn collection_path(&self, kind: ObjectKind) -> PathBuf {
        self.path.join(kind.collection_name())
    }

    /// Persist an object keyed by its digest and return the digest.
    /// Idempotent: an already-stored digest is left untouched.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let oid = object.object_id()?;
        let object_path = self.path.join(object.object_path()?);

        if !object_path.exists() {
            let content = object.serialize()?;
            self.write_object(object_path, content)?;
        }

        Ok(oid)
    }

    pub fn load_blob(&self, oid: &ObjectId) -> anyhow::Result<Blob> {
        let (kind, reader) = self.parse_object_as_bytes(ObjectKind::Blob, oid)?;
        anyhow::ensure!(
            kind == ObjectKind::Blob,
            "Object {oid} is not a blob"
        );

        Blob::deserialize(reader)
    }

    /// Load a commit by its full digest. A missing file surfaces as the
    /// domain-level `NoSuchCommit` so callers can report it directly.
    pub fn load_commit(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        if !self.contains_commit(oid) {
            return Err(GitletError::NoSuchCommit.into());
        }

        let (kind, reader) = self.parse_object_as_bytes(ObjectKind::Commit, oid)?;
        anyhow::ensure!(
            kind == ObjectKind::Commit,
            "Object {oid} is not a commit"
        );

        Commit::deserialize(reader)
    }

    pub fn contains_commit(&self, oid: &ObjectId) -> bool {
        self.collection_path(ObjectKind::Commit)
            .join(oid.as_ref())
            .is_file()
    }

    /// Every stored commit id, in no particular order.
    pub fn list_commit_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        let commits_path = self.collection_path(ObjectKind::Commit);

        std::fs::read_dir(&commits_path)
            .with_context(|| format!("Unable to list commits in {}", commits_path.display()))?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .map(ObjectId::try_parse)
            .collect()
    }

    /// Resolve a full or abbreviated commit digest to the unique stored
    /// commit it identifies.
    ///
    /// Fails with `NoSuchCommit` when nothing matches and with
    /// `AmbiguousPrefix` when the abbreviation matches more than one
    /// stored commit.
    pub fn resolve_commit_prefix(&self, prefix: &str) -> anyhow::Result<ObjectId> {
        if prefix.is_empty() || prefix.len() > crate::artifacts::objects::OBJECT_ID_LENGTH {
            return Err(GitletError::NoSuchCommit.into());
        }

        if let Ok(oid) = ObjectId::try_parse(prefix.to_string()) {
            return if self.contains_commit(&oid) {
                Ok(oid)
            } else {
                Err(GitletError::NoSuchCommit.into())
            };
        }

        let matches = self
            .list_commit_ids()?
            .into_iter()
            .filter(|oid| oid.matches_prefix(prefix))
            .collect::<Vec<_>>();

        match matches.as_slice() {
            [] => Err(GitletError::NoSuchCommit.into()),
            [oid] => Ok(oid.clone()),
            _ => Err(GitletError::AmbiguousPrefix(prefix.to_string()).into()),
        }
    }

    fn parse_object_as_bytes(
        &self,
        kind: ObjectKind,
        oid: &ObjectId,
    ) -> anyhow::Result<(ObjectKind, impl std::io::BufRead)> {
        let object_path = self.collection_path(kind).join(oid.as_ref());
        let content = self.read_object(object_path)?;
        let mut reader = Cursor::new(content);

        let parsed_kind = ObjectKind::parse_header(&mut reader)?;
        Ok((parsed_kind, reader))
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let content = std::fs::read(&object_path).with_context(|| {
            format!("Unable to read object file {}", object_path.display())
        })?;

        Self::decompress(content.into())
    }

    fn write_object(&self, object_path: PathBuf, content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .with_context(|| format!("Invalid object path {}", object_path.display()))?;
        std::fs::create_dir_all(object_dir).with_context(|| {
            format!("Unable to create object directory {}", object_dir.display())
        })?;

        // write to a temp name first, then rename, so a digest never
        // names a partially written object
        let temp_object_path = object_dir.join(Self::temp_name(&object_path));
        let content = Self::compress(content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .with_context(|| {
                format!("Unable to open object file {}", temp_object_path.display())
            })?;
        file.write_all(&content).with_context(|| {
            format!("Unable to write object file {}", temp_object_path.display())
        })?;

        std::fs::rename(&temp_object_path, &object_path).with_context(|| {
            format!("Unable to rename object file to {}", object_path.display())
        })
    }

    fn temp_name(object_path: &Path) -> String {
        // one writer at a time is assumed, so pid plus target name is
        // collision-free enough
        format!(
            "tmp-obj-{}-{}",
            std::process::id(),
            object_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        )
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(Bytes::from)
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .context("Unable to decompress object content")?;

        Ok(Bytes::from(decompressed))
    }
}
