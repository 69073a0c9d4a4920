//! Merge support: split-point (lowest common ancestor) search.

pub mod split_finder;
