// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport intersection: which rows to realize, with overscan.

use crate::PositionTable;

/// Upper bound of the bootstrap window used before the host reports
/// viewport geometry.
pub const BOOTSTRAP_ROWS: usize = 20;

/// Inclusive index range of rows to realize.
///
/// Rows outside `start..=end` are absent from engine output entirely (not
/// merely hidden), which is what bounds render cost to overscan plus the
/// rows the viewport can show, independent of total tree size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowWindow {
    /// First realized row index.
    pub start: usize,
    /// Last realized row index (inclusive).
    pub end: usize,
}

impl RowWindow {
    /// Number of realized rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// A realized window always has at least one row.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterates the realized indices in order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + use<> {
        self.start..=self.end
    }

    /// Returns `true` if `index` is inside the window.
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }
}

/// Computes the viewport-intersecting row range.
///
/// - `start` is the first row whose bottom edge reaches `viewport_top`,
///   pulled back by `overscan` rows (clamped at the first row).
/// - `end` is found by scanning forward for the first row whose top edge
///   exceeds the viewport bottom, pushed forward by `overscan` rows
///   (clamped at the last row); when every remaining row starts inside the
///   viewport, `end` is the last row.
///
/// Returns `None` for an empty table. Recompute on every scroll
/// notification and on every layout change.
#[must_use]
pub fn compute_row_window(
    positions: &PositionTable,
    viewport_top: f64,
    viewport_height: f64,
    overscan: usize,
) -> Option<RowWindow> {
    let count = positions.len();
    if count == 0 {
        return None;
    }

    let top = viewport_top.max(0.0);
    let bottom = top + viewport_height.max(0.0);
    let slots = positions.slots();

    // Bottom edges are monotone, so the first intersecting row is a
    // partition point. Scrolling past the content clamps to the last row.
    let hit = slots.partition_point(|s| s.bottom() < top).min(count - 1);
    let start = hit.saturating_sub(overscan);

    let mut end = count - 1;
    for (i, slot) in slots.iter().enumerate().skip(start) {
        if slot.top > bottom {
            end = i;
            break;
        }
    }
    end = (end + overscan).min(count - 1);

    Some(RowWindow { start, end })
}

/// The window used while the viewport is still unmeasured.
///
/// The first `min(BOOTSTRAP_ROWS, count - 1)` rows are realized so the
/// initial paint is never blank; the first real scroll notification
/// replaces this with a measured window.
#[must_use]
pub fn bootstrap_window(count: usize) -> Option<RowWindow> {
    if count == 0 {
        return None;
    }
    Some(RowWindow {
        start: 0,
        end: BOOTSTRAP_ROWS.min(count - 1),
    })
}

/// Alignment mode when computing the scroll offset for a specific row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAlign {
    /// Align the row's top edge with the viewport top.
    Start,
    /// Center the row within the viewport.
    Center,
    /// Align the row's bottom edge with the viewport bottom.
    End,
    /// Move just enough to make the row fully visible, preferring the
    /// smallest change from the current offset.
    Nearest,
}

/// Computes the scroll offset that brings row `index` into view.
///
/// The engine never scrolls the ambient surface itself; callers apply the
/// returned offset to whatever owns scrolling. Returns `None` for an empty
/// table; out-of-range indices clamp to the last row.
#[must_use]
pub fn scroll_offset_for(
    positions: &PositionTable,
    index: usize,
    current_top: f64,
    viewport_height: f64,
    align: ScrollAlign,
) -> Option<f64> {
    if positions.is_empty() {
        return None;
    }
    let slot = positions.slot(index.min(positions.len() - 1))?;
    let item_start = slot.top;
    let item_end = slot.bottom();
    let viewport = viewport_height.max(0.0);

    let offset = match align {
        ScrollAlign::Start => item_start,
        ScrollAlign::End => (item_end - viewport).max(0.0),
        ScrollAlign::Center => ((item_start + item_end) / 2.0 - viewport / 2.0).max(0.0),
        ScrollAlign::Nearest => {
            let view_start = current_top.max(0.0);
            let view_end = view_start + viewport;
            if item_start >= view_start && item_end <= view_end {
                view_start
            } else if item_start < view_start {
                item_start
            } else {
                (item_end - viewport).max(0.0)
            }
        }
    };
    Some(offset)
}
