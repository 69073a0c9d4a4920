//! Blob object
//!
//! A blob records one versioned file's contents at one point in time.
//! Unlike git proper, the path participates in the digest: two files
//! with equal bytes but different names are distinct blobs.
//!
//! ## Format
//!
//! On disk: `blob <len>\0<path>\n<content>`

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_kind::ObjectKind;
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Read, Write};

/// Immutable snapshot of a single file.
///
/// May be created transiently (e.g. to compare a working file against a
/// tracked version by digest) without ever being stored.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    path: String,
    content: Bytes,
}

impl Blob {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut body = Vec::new();
        body.write_all(self.path.as_bytes())?;
        body.write_all(b"\n")?;
        body.write_all(&self.content)?;

        let mut blob_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_kind().as_str(), body.len());
        blob_bytes.write_all(header.as_bytes())?;
        blob_bytes.write_all(&body)?;

        Ok(Bytes::from(blob_bytes))
    }
}

impl Unpackable for Blob {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been read
        let mut path = String::new();
        reader.read_line(&mut path)?;
        let path = path.trim_end_matches('\n').to_string();

        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;

        Ok(Self::new(path, Bytes::from(content)))
    }
}

impl Object for Blob {
    fn object_kind(&self) -> ObjectKind {
        ObjectKind::Blob
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn digest_is_a_pure_function_of_path_and_content() {
        let a = Blob::new("wug.txt".to_string(), Bytes::from("wug"));
        let b = Blob::new("wug.txt".to_string(), Bytes::from("wug"));
        assert_eq!(a.object_id().unwrap(), b.object_id().unwrap());
    }

    #[test]
    fn different_content_produces_different_digest() {
        let a = Blob::new("wug.txt".to_string(), Bytes::from("wug"));
        let b = Blob::new("wug.txt".to_string(), Bytes::from("gum"));
        assert_ne!(a.object_id().unwrap(), b.object_id().unwrap());
    }

    #[test]
    fn same_content_under_different_path_is_a_different_blob() {
        let a = Blob::new("a.txt".to_string(), Bytes::from("wug"));
        let b = Blob::new("b.txt".to_string(), Bytes::from("wug"));
        assert_ne!(a.object_id().unwrap(), b.object_id().unwrap());
    }

    #[test]
    fn serialization_round_trip() {
        let blob = Blob::new("notes.txt".to_string(), Bytes::from("line one\nline two\n"));
        let bytes = blob.serialize().unwrap();

        let mut reader = Cursor::new(bytes);
        let kind = ObjectKind::parse_header(&mut reader).unwrap();
        assert_eq!(kind, ObjectKind::Blob);

        let parsed = Blob::deserialize(reader).unwrap();
        assert_eq!(parsed, blob);
    }
}
