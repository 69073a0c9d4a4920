//! Split-point finder for merge operations.
//!
//! Determines the three-way merge base: the latest commit reachable
//! from both branch tips. The search builds, for each tip, a map from
//! every reachable commit id to its minimum distance from that tip
//! (tip = 0, each parent edge +1), traversing *both* parent edges so a
//! merge commit contributes two edges. The split point is the common
//! commit with the smallest distance in the current tip's map.
//!
//! Ties at equal minimal depth are not given a defined winner; any
//! minimal-depth common ancestor is a safe base in the restricted
//! two-parent "merge diamond" DAG shape this repository produces. The
//! iteration below happens to resolve ties toward the lexicographically
//! smallest id, which makes the result reproducible, but callers must
//! not rely on that if the DAG shape is ever generalized.

use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashMap, VecDeque};

/// Finds the split point between two commits.
///
/// Generic over a parent loader so the search works against the object
/// database in production and an in-memory DAG in tests.
pub struct SplitFinder<ParentsLoaderFn>
where
    ParentsLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    parents_loader: ParentsLoaderFn,
}

impl<ParentsLoaderFn> SplitFinder<ParentsLoaderFn>
where
    ParentsLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    pub fn new(parents_loader: ParentsLoaderFn) -> Self {
        Self { parents_loader }
    }

    /// The lowest common ancestor of `current` and `other`.
    ///
    /// Every pair of commits in a well-formed repository shares at
    /// least the initial commit, so a missing split point means the
    /// object database is corrupt.
    pub fn find_split_point(
        &self,
        current: &ObjectId,
        other: &ObjectId,
    ) -> anyhow::Result<ObjectId> {
        let current_distances = self.distance_map(current)?;
        let other_distances = self.distance_map(other)?;

        let mut common: Vec<(&u32, &ObjectId)> = current_distances
            .iter()
            .filter(|(oid, _)| other_distances.contains_key(oid))
            .map(|(oid, distance)| (distance, oid))
            .collect();
        common.sort();

        common
            .first()
            .map(|(_, oid)| (*oid).clone())
            .ok_or_else(|| anyhow::anyhow!("No common ancestor between {current} and {other}"))
    }

    /// Breadth-first traversal over both parent edges, recording the
    /// minimum distance from `tip` to every reachable commit.
    fn distance_map(&self, tip: &ObjectId) -> anyhow::Result<HashMap<ObjectId, u32>> {
        let mut distances = HashMap::new();
        let mut queue = VecDeque::new();

        distances.insert(tip.clone(), 0);
        queue.push_back(tip.clone());

        while let Some(oid) = queue.pop_front() {
            let distance = distances[&oid];
            for parent in (self.parents_loader)(&oid)? {
                if !distances.contains_key(&parent) {
                    distances.insert(parent.clone(), distance + 1);
                    queue.push_back(parent);
                }
            }
        }

        Ok(distances)
    }
}
