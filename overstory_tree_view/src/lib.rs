// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=overstory_tree_view --heading-base-level=0

//! Overstory Tree View: the virtualized tree-view engine.
//!
//! This crate composes the Overstory building blocks — flattening
//! ([`overstory_flatten`]), row layout and windowing
//! ([`overstory_row_layout`]), and the drag session machine
//! ([`overstory_drag_state`]) — into a single controller, [`TreeView`],
//! plus the row renderer model in [`row`].
//!
//! The engine owns expansion state, measured heights, the flattened row
//! order, cumulative positions, viewport geometry, and the drag session. It
//! does **not** own the tree: the caller feeds immutable snapshots in and
//! receives [`TreeIntent`] values back (expand changes, node clicks, drop
//! proposals), then mutates its canonical tree and hands over the next
//! snapshot. Host frameworks are responsible for:
//!
//! - Owning the data and the actual view/widget instances.
//! - Forwarding ambient scroll notifications via [`TreeView::set_scroll`]
//!   (install the listener on mount, remove it on teardown).
//! - Drawing exactly the rows [`TreeView::visible_rows`] yields and
//!   reporting each row's rendered height via [`TreeView::update_height`]
//!   (initial paint plus a continuous size observer).
//! - Translating pointer events into [`RowEvent`] values and honoring the
//!   returned propagation [`Outcome`].
//!
//! ## Minimal example
//!
//! ```rust
//! use overstory_flatten::TreeNode;
//! use overstory_tree_view::{TreeView, TreeViewConfig};
//!
//! let mut view: TreeView<u32> = TreeView::new(TreeViewConfig::default());
//! view.set_tree(vec![TreeNode::branch(
//!     1,
//!     "root",
//!     vec![TreeNode::leaf(2, "child")],
//! )]);
//! assert_eq!(view.row_count(), 1);
//!
//! // Expanding reveals the child and reports the change for the caller.
//! let change = view.toggle_expand(1).unwrap();
//! assert!(change.expanded);
//! assert_eq!(view.row_count(), 2);
//!
//! // Layout is optimistic with the configured minimum until rows report
//! // their real heights.
//! assert_eq!(view.total_height(), 64.0);
//! view.update_height(2, 48.0);
//! assert_eq!(view.total_height(), 80.0);
//!
//! // Scroll notifications drive which rows are realized at all.
//! view.set_scroll(0.0, 600.0);
//! let titles: Vec<&str> = view.visible_rows().map(|r| r.title).collect();
//! assert_eq!(titles, vec!["root", "child"]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`; enable the `std` or `libm`
//! feature to satisfy `kurbo`'s float-math requirements in your build.

#![no_std]

extern crate alloc;

mod config;
pub mod row;
mod view;

pub use config::TreeViewConfig;
pub use row::{ExpandChange, Outcome, RowEvent, RowModel, RowResponse, TreeIntent};
pub use view::TreeView;

// Vocabulary types that appear in this crate's public API.
pub use overstory_drag_state::{DragSession, DragState, DropIntent, DropPosition, Hover};
pub use overstory_flatten::{ExpansionState, IconSymbol, TreeNode};
pub use overstory_row_layout::{RowWindow, ScrollAlign};
