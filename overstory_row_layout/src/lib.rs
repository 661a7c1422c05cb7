// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=overstory_row_layout --heading-base-level=0

//! Overstory Row Layout: measured heights, cumulative offsets, windowing.
//!
//! This crate provides the 1D layout side of a virtualized tree view: it
//! turns an ordered sequence of row heights into cumulative vertical
//! positions and answers the question "which rows intersect the viewport?".
//! It is deliberately ignorant of trees, keys' meaning, and widgets.
//!
//! The core concepts are:
//!
//! - [`HeightCache`]: last-measured pixel height per row key, fed back
//!   asynchronously by the host after each row paints. Updates are
//!   idempotent so the render → measure → relayout feedback loop settles
//!   after one extra pass per newly revealed row.
//! - [`PositionTable`]: per-row `{top, height}` slots built by a single
//!   forward scan, plus the total content height.
//! - [`Viewport`]: the engine-side record of the ambient scrollable surface
//!   (offset past the container's top, viewport height, and whether the
//!   host has reported geometry at all yet).
//! - [`compute_row_window`] / [`bootstrap_window`]: the inclusive index
//!   range of rows to realize, with overscan; everything outside the range
//!   is absent from output entirely, bounding render cost by viewport size.
//! - [`ScrollAlign`] / [`scroll_offset_for`]: offsets that bring a given
//!   row into view, for hosts that drive the ambient surface.
//!
//! All extents and offsets are `f64` logical pixels and are expected to be
//! finite and non-negative; negative inputs are clamped and non-finite ones
//! are a debug-assert misuse.
//!
//! ## Minimal example
//!
//! ```rust
//! use overstory_row_layout::{PositionTable, Viewport, compute_row_window};
//!
//! let mut positions = PositionTable::new();
//! positions.rebuild([32.0, 40.0, 32.0]);
//! assert_eq!(positions.total_height(), 104.0);
//!
//! let mut viewport = Viewport::new();
//! // Container top sits 30px above the viewport top: scrolled 30px past it.
//! viewport.set_from_container(-30.0, 50.0);
//!
//! let window = compute_row_window(&positions, viewport.top(), viewport.height(), 0).unwrap();
//! assert_eq!((window.start, window.end), (0, 2));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod heights;
mod positions;
mod viewport;
mod window;

pub use heights::HeightCache;
pub use positions::{PositionTable, RowSlot};
pub use viewport::Viewport;
pub use window::{
    BOOTSTRAP_ROWS, RowWindow, ScrollAlign, bootstrap_window, compute_row_window,
    scroll_offset_for,
};
