// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration.

/// Construction-time configuration of a [`TreeView`](crate::TreeView).
///
/// All values are plain data; the caller owns policy. Reconstruct the view
/// to change them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeViewConfig {
    /// Height assumed for rows that have not reported a measurement yet.
    pub min_row_height: f64,
    /// Extra rows realized beyond each viewport edge to reduce popping
    /// during fast scrolling.
    pub overscan_rows: usize,
    /// Horizontal indentation per nesting level, in the same logical pixels
    /// as row heights.
    pub indent_width: f64,
    /// Whether rows may be dragged at all. When `false` the whole
    /// drag-and-drop surface is a no-op.
    pub draggable: bool,
}

impl Default for TreeViewConfig {
    fn default() -> Self {
        Self {
            min_row_height: 32.0,
            overscan_rows: 2,
            indent_width: 24.0,
            draggable: false,
        }
    }
}
