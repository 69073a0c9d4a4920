//! Long-lived, mutable repository areas.
//!
//! - `database`: write-once object store under `.gitlet/objects`
//! - `stage`: the staging area persisted at `.gitlet/index`
//! - `refs`: branch pointer files and HEAD
//! - `workspace`: working-directory file access
//! - `repository`: the context object tying the areas together

pub mod database;
pub mod refs;
pub mod repository;
pub mod stage;
pub mod workspace;
