use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_kind::ObjectKind;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::BufRead;
use std::path::PathBuf;

/// Canonical on-disk serialization, including the `<kind> <len>\0`
/// header. The digest of an object is computed over exactly these bytes,
/// so two objects with identical semantic content always share an id.
pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

/// Reconstruction from the object body. The header has already been
/// consumed by the caller.
pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_kind(&self) -> ObjectKind;

    fn object_id(&self) -> Result<ObjectId> {
        let content = self.serialize()?;
        let mut hasher = Sha1::new();
        hasher.update(&content);

        let oid = hasher.finalize();
        ObjectId::try_parse(format!("{oid:x}"))
    }

    /// Path of this object relative to the objects directory.
    fn object_path(&self) -> Result<PathBuf> {
        let oid = self.object_id()?;
        Ok(PathBuf::from(self.object_kind().collection_name()).join(oid.as_ref()))
    }
}
