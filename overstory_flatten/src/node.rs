// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snapshot node type and child-index addressing.

use alloc::string::String;
use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

/// A small, copyable icon handle.
///
/// The engine never interprets this value; it is carried through to the row
/// renderer so hosts can map it to whatever glyph or asset they like. Nodes
/// without an explicit icon fall back to folder/file icons chosen by the row
/// renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IconSymbol(pub u32);

/// One node of a caller-owned snapshot forest.
///
/// Snapshots are immutable from the engine's point of view: the caller owns
/// the canonical tree and hands the engine a fresh snapshot after every
/// mutation. A node with a non-empty `children` vector is a branch; an empty
/// one is a leaf. `key` must be stable across renders and unique within the
/// whole snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeNode<K> {
    /// Stable identifier, unique across the whole snapshot.
    pub key: K,
    /// Display label.
    pub title: String,
    /// Optional caller-supplied icon; overrides the renderer's default choice.
    pub icon: Option<IconSymbol>,
    /// Optional trailing decoration (badge text, counts, and the like).
    pub extra: Option<String>,
    /// Ordered children. Non-empty means this node is a branch.
    pub children: Vec<TreeNode<K>>,
}

impl<K> TreeNode<K> {
    /// Creates a childless node.
    #[must_use]
    pub fn leaf(key: K, title: impl Into<String>) -> Self {
        Self {
            key,
            title: title.into(),
            icon: None,
            extra: None,
            children: Vec::new(),
        }
    }

    /// Creates a node with the given children.
    #[must_use]
    pub fn branch(key: K, title: impl Into<String>, children: Vec<Self>) -> Self {
        Self {
            key,
            title: title.into(),
            icon: None,
            extra: None,
            children,
        }
    }

    /// Attaches an explicit icon.
    #[must_use]
    pub fn with_icon(mut self, icon: IconSymbol) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Attaches a trailing decoration.
    #[must_use]
    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = Some(extra.into());
        self
    }

    /// Returns `true` if this node has at least one child.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Child-index address of a node within a snapshot forest.
///
/// The first segment indexes the root slice, each following segment indexes
/// the `children` vector of the node selected so far. Paths are only valid
/// for the snapshot they were built from; rebuild them (via [`index_paths`])
/// whenever the snapshot is replaced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodePath(SmallVec<[u32; 8]>);

impl NodePath {
    /// Returns the child-index segments, root first.
    #[must_use]
    pub fn segments(&self) -> &[u32] {
        &self.0
    }

    /// Nesting depth of the addressed node (root nodes have depth 0).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }
}

/// Resolves a [`NodePath`] against a snapshot forest.
///
/// Returns `None` for the empty path or when any segment is out of bounds
/// (for example a path built from an older snapshot).
#[must_use]
pub fn node_at<'t, K>(roots: &'t [TreeNode<K>], path: &NodePath) -> Option<&'t TreeNode<K>> {
    let (&first, rest) = path.segments().split_first()?;
    let mut node = roots.get(first as usize)?;
    for &seg in rest {
        node = node.children.get(seg as usize)?;
    }
    Some(node)
}

/// Builds a key → [`NodePath`] index over a whole snapshot forest.
///
/// One walk over every node, independent of expansion state. With duplicate
/// keys the last occurrence wins, consistent with the caller contract that
/// keys are unique.
#[must_use]
pub fn index_paths<K: Copy + Eq + Hash>(roots: &[TreeNode<K>]) -> HashMap<K, NodePath> {
    fn walk<K: Copy + Eq + Hash>(
        nodes: &[TreeNode<K>],
        prefix: &mut SmallVec<[u32; 8]>,
        out: &mut HashMap<K, NodePath>,
    ) {
        for (i, node) in nodes.iter().enumerate() {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Sibling counts beyond u32::MAX are far outside this engine's scale"
            )]
            prefix.push(i as u32);
            out.insert(node.key, NodePath(prefix.clone()));
            walk(&node.children, prefix, out);
            prefix.pop();
        }
    }

    let mut out = HashMap::new();
    let mut prefix = SmallVec::new();
    walk(roots, &mut prefix, &mut out);
    out
}
