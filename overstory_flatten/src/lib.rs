// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=overstory_flatten --heading-base-level=0

//! Overstory Flatten: tree snapshot model and visible-row flattening.
//!
//! This crate provides the caller-facing data model for a virtualized tree
//! view and the pure functions that project it into a linear row order. It
//! knows nothing about pixels, viewports, or widgets; those live in the
//! sibling Overstory crates.
//!
//! The core concepts are:
//!
//! - [`TreeNode`]: one node of a caller-owned snapshot forest. The caller
//!   owns and mutates the canonical tree; the engine only ever receives
//!   immutable snapshots of it.
//! - [`ExpansionState`]: the set of keys whose children are currently shown.
//! - [`flatten_into`]: a depth-first pre-order walk producing one
//!   [`FlatRow`] per visible node, descending into a node's children only
//!   when that node is expanded.
//! - [`NodePath`] / [`index_paths`] / [`node_at`]: child-index addressing so
//!   hosts can resolve a row key back to its snapshot payload without
//!   cloning node data into every row.
//!
//! Keys are a caller-chosen `K: Copy + Eq + Hash` and must be unique across
//! the whole snapshot (not just among siblings). A snapshot violating key
//! uniqueness is a caller contract violation: lookups silently resolve to
//! one of the duplicates rather than reporting an error.
//!
//! ## Minimal example
//!
//! Flatten a two-root forest where only the second root is expanded:
//!
//! ```rust
//! use overstory_flatten::{ExpansionState, TreeNode, flatten_into};
//!
//! let roots = vec![
//!     TreeNode::branch('a', "alpha", vec![TreeNode::leaf('b', "beta")]),
//!     TreeNode::branch('c', "gamma", vec![TreeNode::leaf('d', "delta")]),
//! ];
//!
//! let mut expanded = ExpansionState::new();
//! expanded.insert('c');
//!
//! let mut rows = Vec::new();
//! flatten_into(&roots, &expanded, &mut rows);
//!
//! // 'b' is hidden because 'a' is collapsed; 'd' is visible under 'c'.
//! let keys: Vec<char> = rows.iter().map(|r| r.key).collect();
//! assert_eq!(keys, vec!['a', 'c', 'd']);
//! assert_eq!(rows[2].depth, 1);
//! ```
//!
//! The same snapshot and expansion state always produce the same row order;
//! hosts re-run the walk whenever either input changes.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod expansion;
mod flatten;
mod node;

pub use expansion::ExpansionState;
pub use flatten::{FlatRow, RowFlags, collect_branch_keys, flatten_into};
pub use node::{IconSymbol, NodePath, TreeNode, index_paths, node_at};
