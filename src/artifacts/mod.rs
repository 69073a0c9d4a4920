//! Immutable values and algorithms.
//!
//! - `objects`: content-addressed object types (blob, commit)
//! - `merge`: split-point (common ancestor) search over the commit DAG
//! - `status`: working-tree status report assembly

pub mod merge;
pub mod objects;
pub mod status;
