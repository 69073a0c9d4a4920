//! Object kind tag
//!
//! Every serialized object starts with a `<kind> <len>\0` header. The
//! kind also selects which collection of the object database the object
//! lives in: blobs and commits are stored in separate digest-keyed
//! directories.

use anyhow::Context;
use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Blob,
    Commit,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Blob => "blob",
            ObjectKind::Commit => "commit",
        }
    }

    /// Name of the database subdirectory holding objects of this kind.
    pub fn collection_name(&self) -> &'static str {
        match self {
            ObjectKind::Blob => "blobs",
            ObjectKind::Commit => "commits",
        }
    }

    /// Read and consume the `<kind> <len>\0` header from the reader,
    /// leaving it positioned at the object body.
    pub fn parse_header(reader: &mut impl BufRead) -> anyhow::Result<Self> {
        let mut header = Vec::new();
        reader
            .read_until(b'\0', &mut header)
            .context("Unable to read object header")?;

        let header = std::str::from_utf8(&header)
            .context("Object header is not valid UTF-8")?
            .trim_end_matches('\0');
        let kind = header
            .split(' ')
            .next()
            .context("Malformed object header")?;

        match kind {
            "blob" => Ok(ObjectKind::Blob),
            "commit" => Ok(ObjectKind::Commit),
            other => Err(anyhow::anyhow!("Unknown object kind: {}", other)),
        }
    }
}
