//! Gitlet: a miniature content-addressable version-control system.
//!
//! The crate is split the same way the on-disk repository is:
//!
//! - `areas`: the long-lived, mutable parts of a repository (object
//!   database, staging area, refs, working directory access) plus the
//!   `Repository` context object that ties them together
//! - `artifacts`: immutable values and algorithms (blobs, commits,
//!   object ids, split-point search, status reporting)
//! - `commands`: one porcelain command per file, implemented as
//!   methods on `Repository`
//! - `errors`: the domain error taxonomy surfaced to the user

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
