//! Working-tree status reporting.

pub mod status_info;
