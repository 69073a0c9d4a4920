//! Commit object
//!
//! A commit is one immutable node in the history DAG: a message, a
//! timestamp, 0–2 parent ids, and the full tracked tree (path → blob id)
//! at that point. The initial commit has no parents and an empty tree;
//! merge commits have two parents, first parent first.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <len>\0date <unix-seconds> <offset>
//! parent <parent-oid>
//! blob <blob-oid> <path>
//!
//! <commit message>
//! ```
//!
//! The digest covers all of the above, so changing a commit's tree (as
//! the merge path conceptually does) yields a *new* identity: callers
//! build a new `Commit` value instead of mutating a stored one.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_kind::ObjectKind;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::{BufRead, Read, Write};

/// Mapping from file path to blob id: all tracked files at one commit.
pub type Tree = BTreeMap<String, ObjectId>;

/// Message of the commit every repository starts from.
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    message: String,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
    /// 0 parents for the initial commit, 1 normally, 2 for merges.
    parents: Vec<ObjectId>,
    tree: Tree,
}

impl Commit {
    pub fn new(
        message: String,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
        parents: Vec<ObjectId>,
        tree: Tree,
    ) -> Self {
        Commit {
            message,
            timestamp,
            parents,
            tree,
        }
    }

    /// The commit every repository history is rooted at: no parents, an
    /// empty tree, and a timestamp fixed at the Unix epoch so that every
    /// repository shares the same root digest.
    pub fn initial() -> Self {
        Commit {
            message: INITIAL_COMMIT_MESSAGE.to_string(),
            timestamp: chrono::DateTime::<chrono::Utc>::UNIX_EPOCH.fixed_offset(),
            parents: Vec::new(),
            tree: Tree::new(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn first_parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn second_parent(&self) -> Option<&ObjectId> {
        self.parents.get(1)
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() == 2
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Blob id recorded for the given path, if the path is tracked.
    pub fn blob_id(&self, path: &str) -> Option<&ObjectId> {
        self.tree.get(path)
    }

    pub fn tracks(&self, path: &str) -> bool {
        self.tree.contains_key(path)
    }

    /// Timestamp in the log's human-readable form,
    /// e.g. `Thu Jan 1 00:00:00 1970 +0000`.
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut lines = vec![];

        lines.push(format!(
            "date {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        for parent in &self.parents {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        for (path, oid) in &self.tree {
            lines.push(format!("blob {} {}", oid.as_ref(), path));
        }
        lines.push(String::new());
        lines.push(self.message.to_string());

        let body = lines.join("\n");

        let mut commit_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_kind().as_str(), body.len());
        commit_bytes.write_all(header.as_bytes())?;
        commit_bytes.write_all(body.as_bytes())?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader.bytes().collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;
        let mut lines = content.lines();

        let date_line = lines
            .next()
            .context("Invalid commit object: missing date line")?;
        let timestamp = parse_date_line(date_line)?;

        let mut parents = Vec::new();
        let mut tree = Tree::new();
        for line in lines.by_ref() {
            if let Some(parent) = line.strip_prefix("parent ") {
                parents.push(ObjectId::try_parse(parent.to_string())?);
            } else if let Some(entry) = line.strip_prefix("blob ") {
                let (oid, path) = entry
                    .split_once(' ')
                    .context("Invalid commit object: malformed tree entry")?;
                tree.insert(path.to_string(), ObjectId::try_parse(oid.to_string())?);
            } else if line.is_empty() {
                break;
            } else {
                anyhow::bail!("Invalid commit object: unexpected line {:?}", line);
            }
        }

        let message = lines.collect::<Vec<&str>>().join("\n");
        Ok(Self::new(message, timestamp, parents, tree))
    }
}

/// Parse `date <unix-seconds> <offset>` back into a fixed-offset
/// datetime. The seconds pin the instant; the offset only restores the
/// zone the commit was recorded in.
fn parse_date_line(line: &str) -> anyhow::Result<chrono::DateTime<chrono::FixedOffset>> {
    let rest = line
        .strip_prefix("date ")
        .context("Invalid commit object: invalid date line")?;
    let (seconds, offset) = rest
        .split_once(' ')
        .context("Invalid commit object: invalid date line")?;
    let seconds = seconds
        .parse::<i64>()
        .context("Invalid commit object: invalid timestamp")?;

    let utc = chrono::DateTime::from_timestamp(seconds, 0)
        .context("Invalid commit object: timestamp out of range")?;
    Ok(utc.with_timezone(&parse_offset(offset)?))
}

/// Parse a `%z` offset such as `+0000` or `-0800`.
fn parse_offset(offset: &str) -> anyhow::Result<chrono::FixedOffset> {
    anyhow::ensure!(
        offset.len() == 5,
        "Invalid commit object: invalid timezone offset {offset:?}"
    );
    let sign = match &offset[..1] {
        "+" => 1,
        "-" => -1,
        _ => anyhow::bail!("Invalid commit object: invalid timezone offset {offset:?}"),
    };
    let hours = offset[1..3]
        .parse::<i32>()
        .context("Invalid commit object: invalid timezone offset")?;
    let minutes = offset[3..5]
        .parse::<i32>()
        .context("Invalid commit object: invalid timezone offset")?;

    chrono::FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .context("Invalid commit object: timezone offset out of range")
}

impl Object for Commit {
    fn object_kind(&self) -> ObjectKind {
        ObjectKind::Commit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn oid(fill: &str) -> ObjectId {
        ObjectId::try_parse(fill.repeat(40 / fill.len())).unwrap()
    }

    #[test]
    fn initial_commit_has_no_parents_and_an_empty_tree() {
        let initial = Commit::initial();
        assert!(initial.parents().is_empty());
        assert!(initial.tree().is_empty());
        assert_eq!(initial.message(), INITIAL_COMMIT_MESSAGE);
        assert_eq!(initial.timestamp().timestamp(), 0);
    }

    #[test]
    fn initial_commit_digest_is_stable() {
        assert_eq!(
            Commit::initial().object_id().unwrap(),
            Commit::initial().object_id().unwrap()
        );
    }

    #[test]
    fn digest_changes_with_the_tree() {
        let base = Commit::initial();
        let mut tree = Tree::new();
        tree.insert("wug.txt".to_string(), oid("a"));
        let changed = Commit::new(
            base.message().to_string(),
            base.timestamp(),
            base.parents().to_vec(),
            tree,
        );

        assert_ne!(base.object_id().unwrap(), changed.object_id().unwrap());
    }

    #[test]
    fn serialization_round_trip_with_two_parents() {
        let mut tree = Tree::new();
        tree.insert("a.txt".to_string(), oid("1"));
        tree.insert("dir file.txt".to_string(), oid("2"));

        let timestamp = chrono::DateTime::parse_from_str(
            "2023-01-01 12:00:00 +0100",
            "%Y-%m-%d %H:%M:%S %z",
        )
        .unwrap();
        let commit = Commit::new(
            "Merged feature into master.".to_string(),
            timestamp,
            vec![oid("3"), oid("4")],
            tree,
        );

        let bytes = commit.serialize().unwrap();
        let mut reader = Cursor::new(bytes);
        let kind = ObjectKind::parse_header(&mut reader).unwrap();
        assert_eq!(kind, ObjectKind::Commit);

        let parsed = Commit::deserialize(reader).unwrap();
        assert_eq!(parsed, commit);
        assert_eq!(parsed.object_id().unwrap(), commit.object_id().unwrap());
    }

    #[test]
    fn multi_line_messages_survive_the_round_trip() {
        let commit = Commit::new(
            "first line\n\nbody paragraph".to_string(),
            Commit::initial().timestamp(),
            vec![oid("a")],
            Tree::new(),
        );

        let bytes = commit.serialize().unwrap();
        let mut reader = Cursor::new(bytes);
        ObjectKind::parse_header(&mut reader).unwrap();
        let parsed = Commit::deserialize(reader).unwrap();
        assert_eq!(parsed.message(), commit.message());
    }
}
