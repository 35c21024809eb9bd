//! Stable best-first frontier with a visited set of flattened grids.
//!
//! Pops are FIFO from the head; after each expansion batch the whole queue
//! is re-sorted ascending by heuristic with a stable sort, so equal
//! heuristics keep their relative order. The net effect is greedy
//! best-first exploration.
//!
//! The root's grid is marked visited when the frontier is created, so a
//! child can never recreate the starting board and every grid in the arena
//! is distinct.
//!
//! Uses a `BTreeSet` visited set (not `HashSet`) for deterministic
//! iteration order when dumped.

use std::collections::{BTreeSet, VecDeque};

use crate::node::NodeId;

/// Frontier manager for one search session.
///
/// Maintains:
/// - A `VecDeque` of node ids awaiting expansion
/// - A `BTreeSet<String>` of flattened grids already enqueued, root included
pub struct StableFrontier {
    queue: VecDeque<NodeId>,
    visited: BTreeSet<String>,
    high_water: usize,
}

impl StableFrontier {
    /// Create a frontier holding only `root`, whose flattened grid is
    /// recorded as visited.
    #[must_use]
    pub fn with_root(root: NodeId, grid: String) -> Self {
        Self {
            queue: VecDeque::from([root]),
            visited: BTreeSet::from([grid]),
            high_water: 1,
        }
    }

    /// Pop the head of the queue.
    #[must_use]
    pub fn pop(&mut self) -> Option<NodeId> {
        self.queue.pop_front()
    }

    /// Record a flattened grid as visited.
    ///
    /// Returns `false` if it was already visited.
    pub fn mark_visited(&mut self, grid: String) -> bool {
        self.visited.insert(grid)
    }

    /// Check if a flattened grid has been visited.
    #[must_use]
    pub fn is_visited(&self, grid: &str) -> bool {
        self.visited.contains(grid)
    }

    /// Append a batch of new ids, then stable-sort the whole queue by `key`.
    pub fn extend_sorted<K, F>(&mut self, ids: &[NodeId], key: F)
    where
        K: Ord,
        F: FnMut(&NodeId) -> K,
    {
        self.queue.extend(ids.iter().copied());
        self.queue.make_contiguous().sort_by_key(key);
        self.high_water = self.high_water.max(self.queue.len());
    }

    /// Current queue contents, head first.
    #[must_use]
    pub fn queued(&self) -> Vec<NodeId> {
        self.queue.iter().copied().collect()
    }

    /// Current frontier size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the frontier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of distinct grids ever enqueued.
    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// High-water mark of frontier size.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}
