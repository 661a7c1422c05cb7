// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pre-order flatten walk and its row output type.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashSet;

use crate::{ExpansionState, TreeNode};

bitflags::bitflags! {
    /// Structural flags of a flattened row.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct RowFlags: u8 {
        /// The underlying node has at least one child.
        const HAS_CHILDREN = 0b0000_0001;
        /// The underlying node is currently expanded.
        const EXPANDED     = 0b0000_0010;
    }
}

/// One visible row of the flattened tree.
///
/// Derived and ephemeral: recomputed from scratch whenever the snapshot or
/// the [`ExpansionState`] changes. Carries structure only; payload (title,
/// icon, extra) stays in the snapshot and is resolved by key when a row is
/// actually rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlatRow<K> {
    /// Key of the underlying node.
    pub key: K,
    /// Key of the parent node, `None` for roots.
    pub parent: Option<K>,
    /// Nesting level; roots are 0.
    pub depth: usize,
    /// Branch/expansion flags.
    pub flags: RowFlags,
}

impl<K> FlatRow<K> {
    /// Returns `true` if the underlying node has children.
    #[must_use]
    pub fn has_children(&self) -> bool {
        self.flags.contains(RowFlags::HAS_CHILDREN)
    }

    /// Returns `true` if the underlying node is expanded.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.flags.contains(RowFlags::EXPANDED)
    }
}

/// Flattens a snapshot forest into the visible row order.
///
/// Depth-first pre-order: a node is always emitted before its descendants,
/// and descendants are emitted only when the node is expanded. The output
/// vector is cleared first, so the same buffer can be reused across walks.
/// Deterministic: identical inputs produce identical output order.
pub fn flatten_into<K: Copy + Eq + Hash>(
    roots: &[TreeNode<K>],
    expanded: &ExpansionState<K>,
    out: &mut Vec<FlatRow<K>>,
) {
    fn walk<K: Copy + Eq + Hash>(
        nodes: &[TreeNode<K>],
        parent: Option<K>,
        depth: usize,
        expanded: &ExpansionState<K>,
        out: &mut Vec<FlatRow<K>>,
    ) {
        for node in nodes {
            let mut flags = RowFlags::empty();
            if node.has_children() {
                flags |= RowFlags::HAS_CHILDREN;
            }
            let is_open = node.has_children() && expanded.is_expanded(node.key);
            if is_open {
                flags |= RowFlags::EXPANDED;
            }
            out.push(FlatRow {
                key: node.key,
                parent,
                depth,
                flags,
            });
            if is_open {
                walk(&node.children, Some(node.key), depth + 1, expanded, out);
            }
        }
    }

    out.clear();
    walk(roots, None, 0, expanded, out);
}

/// Collects every key that has at least one child, across the whole forest.
///
/// This is the target set of an expand-all operation: leaf keys are never
/// included. The set is cleared first so it can be reused across snapshots.
pub fn collect_branch_keys<K: Copy + Eq + Hash>(roots: &[TreeNode<K>], out: &mut HashSet<K>) {
    fn walk<K: Copy + Eq + Hash>(nodes: &[TreeNode<K>], out: &mut HashSet<K>) {
        for node in nodes {
            if node.has_children() {
                out.insert(node.key);
                walk(&node.children, out);
            }
        }
    }

    out.clear();
    walk(roots, out);
}
