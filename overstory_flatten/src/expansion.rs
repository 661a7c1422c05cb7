// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Expansion state: the set of keys whose children are shown.

use core::hash::Hash;

use hashbrown::HashSet;

/// The set of currently expanded keys.
///
/// Starts empty; hosts mutate it only through the engine's toggle and
/// expand/collapse-all operations (or seed it through explicit expands before
/// the first paint). Entries for keys that have since left the snapshot are
/// **not** pruned: a stale key is simply never matched by the flatten walk,
/// so it is harmless. The set is bounded by the distinct keys ever expanded;
/// callers with long-lived sessions and churning key spaces should reuse
/// keys or start a fresh state.
#[derive(Clone, Debug, Default)]
pub struct ExpansionState<K> {
    expanded: HashSet<K>,
}

impl<K: Copy + Eq + Hash> ExpansionState<K> {
    /// Creates an empty state (everything collapsed).
    #[must_use]
    pub fn new() -> Self {
        Self {
            expanded: HashSet::new(),
        }
    }

    /// Returns `true` if `key` is expanded.
    #[must_use]
    pub fn is_expanded(&self, key: K) -> bool {
        self.expanded.contains(&key)
    }

    /// Flips membership of `key` and returns the new expanded flag.
    pub fn toggle(&mut self, key: K) -> bool {
        if self.expanded.remove(&key) {
            false
        } else {
            self.expanded.insert(key);
            true
        }
    }

    /// Adds `key`; returns `true` if it was newly inserted.
    pub fn insert(&mut self, key: K) -> bool {
        self.expanded.insert(key)
    }

    /// Removes `key`; returns `true` if it was present.
    pub fn remove(&mut self, key: K) -> bool {
        self.expanded.remove(&key)
    }

    /// Replaces the state with exactly the given keys.
    pub fn set_exactly(&mut self, keys: impl IntoIterator<Item = K>) {
        self.expanded.clear();
        self.expanded.extend(keys);
    }

    /// Collapses everything.
    pub fn clear(&mut self) {
        self.expanded.clear();
    }

    /// Number of expanded keys (stale entries included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    /// Returns `true` if nothing is expanded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Iterates over the expanded keys in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = K> + '_ {
        self.expanded.iter().copied()
    }
}
