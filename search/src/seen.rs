//! Per-iteration duplicate-state table.
//!
//! Maps each [`StateKey`] to the node that first reached it in the current
//! iteration. Entries are non-owning [`NodeId`] handles: the tree may release
//! the representative at any time, after which the entry is stale. A stale
//! entry is reported as [`SeenLookup::Released`] and never dereferenced.
//!
//! The table is never iterated, so a `HashMap` is enough; nothing about the
//! search depends on its internal order.

use std::collections::HashMap;

use crate::node::{MoveTree, NodeId};
use crate::state_key::StateKey;

/// Result of looking a key up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeenLookup {
    /// No node reached this state yet in this iteration.
    Absent,
    /// The representative is still in the tree.
    Live(NodeId),
    /// The representative reached this state but has since been released.
    Released,
}

impl SeenLookup {
    /// Whether some node already claimed the key, live or not.
    #[must_use]
    pub fn is_claimed(self) -> bool {
        !matches!(self, Self::Absent)
    }
}

/// Duplicate-state table for one deepening iteration.
#[derive(Debug, Default)]
pub struct SeenTable {
    entries: HashMap<StateKey, NodeId>,
}

impl SeenTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `key`, checking the representative's liveness against `tree`.
    #[must_use]
    pub fn lookup<M: Clone>(&self, key: &StateKey, tree: &MoveTree<M>) -> SeenLookup {
        match self.entries.get(key) {
            None => SeenLookup::Absent,
            Some(&id) if tree.contains(id) => SeenLookup::Live(id),
            Some(_) => SeenLookup::Released,
        }
    }

    /// Record `id` as the representative for `key`.
    ///
    /// First writer wins: returns `false` and leaves the entry untouched if
    /// the key is already claimed.
    pub fn record(&mut self, key: StateKey, id: NodeId) -> bool {
        match self.entries.entry(key) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(v) => {
                v.insert(id);
                true
            }
        }
    }

    /// Number of distinct states recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
