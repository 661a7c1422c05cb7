// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row renderer model: everything a host needs to draw one visible row.
//!
//! ## Overview
//!
//! The engine realizes rows; the host draws them. A [`RowModel`] describes a
//! single realized row — indentation, expand/collapse affordance, icon, and
//! its layout slot — with payload borrowed straight from the snapshot. The
//! host translates its framework's pointer events into [`RowEvent`] values
//! and feeds them to [`TreeView::handle_row_event`](crate::TreeView::handle_row_event),
//! which answers with a [`RowResponse`]: an optional [`TreeIntent`] for the
//! caller that owns the tree, plus an [`Outcome`] telling the host whether
//! the event should keep propagating to ancestor handlers.
//!
//! ## Height feedback
//!
//! Hosts measure each rendered row after layout (initial paint plus a
//! continuous size observer, so font loads and dynamic content are caught
//! live) and report through
//! [`TreeView::update_height`](crate::TreeView::update_height). Reporting an
//! unchanged height is free, which is what keeps the render → measure →
//! relayout loop to a single extra pass per newly revealed row.

use kurbo::Point;

use overstory_drag_state::DropIntent;
use overstory_flatten::{FlatRow, IconSymbol, TreeNode};
use overstory_row_layout::RowSlot;

use crate::TreeViewConfig;

/// The expand/collapse affordance of a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleAffordance {
    /// Interactive: activating it toggles expansion.
    Toggle,
    /// Inert spacer for leaf rows, preserving indentation alignment.
    Placeholder,
}

/// Icon the host should render for a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowIcon {
    /// The node supplied an explicit icon; it takes priority.
    Custom(IconSymbol),
    /// Expanded branch.
    FolderOpen,
    /// Collapsed branch.
    FolderClosed,
    /// Leaf.
    File,
}

/// Renderable description of one realized row.
///
/// Payload fields borrow from the engine's snapshot, so a model is consumed
/// during the render pass that requested it.
#[derive(Clone, Copy, Debug)]
pub struct RowModel<'t, K> {
    /// Key of the underlying node.
    pub key: K,
    /// Key of the parent node, `None` for roots.
    pub parent: Option<K>,
    /// Nesting level; roots are 0.
    pub depth: usize,
    /// Whether the underlying node is a branch.
    pub has_children: bool,
    /// Whether the underlying node is expanded.
    pub expanded: bool,
    /// Top edge offset from the content top.
    pub top: f64,
    /// Row height used by the current layout (measured or fallback).
    pub height: f64,
    /// Left indentation: depth × configured indent width.
    pub indent: f64,
    /// Display label.
    pub title: &'t str,
    /// Optional trailing decoration.
    pub extra: Option<&'t str>,
    /// Icon choice.
    pub icon: RowIcon,
    /// Expand/collapse affordance.
    pub affordance: ToggleAffordance,
}

/// Builds the renderable model for one flattened row.
pub(crate) fn model<'t, K: Copy>(
    row: &FlatRow<K>,
    slot: RowSlot,
    node: &'t TreeNode<K>,
    config: &TreeViewConfig,
) -> RowModel<'t, K> {
    let has_children = row.has_children();
    let expanded = row.is_expanded();
    let icon = match node.icon {
        Some(symbol) => RowIcon::Custom(symbol),
        None if has_children && expanded => RowIcon::FolderOpen,
        None if has_children => RowIcon::FolderClosed,
        None => RowIcon::File,
    };
    RowModel {
        key: row.key,
        parent: row.parent,
        depth: row.depth,
        has_children,
        expanded,
        top: slot.top,
        height: slot.height,
        indent: row.depth as f64 * config.indent_width,
        title: &node.title,
        extra: node.extra.as_deref(),
        icon,
        affordance: if has_children {
            ToggleAffordance::Toggle
        } else {
            ToggleAffordance::Placeholder
        },
    }
}

/// A pointer event on a realized row, translated by the host.
///
/// Points are **row-local**: the pointer position relative to the row's
/// top-left corner. The engine combines them with the row's layout slot to
/// classify drop positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RowEvent {
    /// The expand/collapse affordance was activated.
    ToggleActivate,
    /// The row body was clicked.
    Activate,
    /// A drag gesture started on this row.
    DragStart(Point),
    /// A dragged row moved over this row.
    DragOver(Point),
    /// A dragged row left this row.
    DragLeave,
    /// A dragged row was released over this row.
    Drop(Point),
    /// The drag gesture ended without a drop on any row.
    DragEnd,
}

/// Whether an event keeps propagating to ancestor handlers after the row
/// handled it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Let ancestors see the event too.
    Continue,
    /// Consume the event at this row.
    Stop,
}

/// Notification that a key's expansion flag changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpandChange<K> {
    /// The toggled key.
    pub key: K,
    /// Its new expanded flag.
    pub expanded: bool,
}

/// A user intent the engine reports to the caller that owns the tree.
///
/// The engine never mutates tree structure; applying (and validating) these
/// is entirely the caller's job.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeIntent<K> {
    /// A row body was clicked.
    NodeClick(K),
    /// A row's expansion flag changed.
    Expand(ExpandChange<K>),
    /// A completed drag proposes a move. The caller must reject targets
    /// that are descendants of the dragged node before applying it.
    Drop(DropIntent<K>),
}

/// Result of handling a [`RowEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowResponse<K> {
    /// Intent for the caller, if the event produced one.
    pub intent: Option<TreeIntent<K>>,
    /// Propagation decision for the host's event system. Clicks consume
    /// their event — toggling never also fires a node click, and row clicks
    /// never reach ancestor rows.
    pub outcome: Outcome,
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use overstory_flatten::{ExpansionState, IconSymbol, TreeNode, flatten_into};
    use overstory_row_layout::RowSlot;

    use super::{RowIcon, ToggleAffordance, model};
    use crate::TreeViewConfig;

    fn slot() -> RowSlot {
        RowSlot {
            top: 64.0,
            height: 32.0,
        }
    }

    #[test]
    fn branch_icon_follows_expansion() {
        let roots = vec![TreeNode::branch('a', "a", vec![TreeNode::leaf('b', "b")])];
        let config = TreeViewConfig::default();

        let mut expanded = ExpansionState::new();
        let mut rows = vec![];
        flatten_into(&roots, &expanded, &mut rows);
        let closed = model(&rows[0], slot(), &roots[0], &config);
        assert_eq!(closed.icon, RowIcon::FolderClosed);
        assert_eq!(closed.affordance, ToggleAffordance::Toggle);

        expanded.insert('a');
        flatten_into(&roots, &expanded, &mut rows);
        let open = model(&rows[0], slot(), &roots[0], &config);
        assert_eq!(open.icon, RowIcon::FolderOpen);

        let leaf = model(&rows[1], slot(), &roots[0].children[0], &config);
        assert_eq!(leaf.icon, RowIcon::File);
        assert_eq!(leaf.affordance, ToggleAffordance::Placeholder);
    }

    #[test]
    fn explicit_icon_takes_priority() {
        let roots = vec![TreeNode::branch(
            'a',
            "a",
            vec![TreeNode::leaf('b', "b")],
        )
        .with_icon(IconSymbol(3))];
        let mut rows = vec![];
        flatten_into(&roots, &ExpansionState::new(), &mut rows);

        let m = model(&rows[0], slot(), &roots[0], &TreeViewConfig::default());
        assert_eq!(m.icon, RowIcon::Custom(IconSymbol(3)));
    }

    #[test]
    fn indent_scales_with_depth() {
        let roots = vec![TreeNode::branch(
            'a',
            "a",
            vec![TreeNode::branch('b', "b", vec![TreeNode::leaf('c', "c")])],
        )];
        let mut expanded = ExpansionState::new();
        expanded.insert('a');
        expanded.insert('b');
        let mut rows = vec![];
        flatten_into(&roots, &expanded, &mut rows);

        let config = TreeViewConfig::default();
        let node_c = &roots[0].children[0].children[0];
        let m = model(&rows[2], slot(), node_c, &config);
        assert_eq!(m.depth, 2);
        assert_eq!(m.indent, 2.0 * config.indent_width);
        assert_eq!(m.title, "c");
    }
}
