// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=overstory_drag_state --heading-base-level=0

//! Overstory Drag State: the drag-and-drop session state machine.
//!
//! This crate tracks exactly one transient thing: whether a tree row is
//! being dragged, and which row the pointer currently proposes to drop it
//! on. It never mutates any tree — a completed drop produces a
//! [`DropIntent`] value for the host, which owns the canonical tree and is
//! solely responsible for validating the move (including rejecting drops
//! onto a descendant of the dragged node) before applying it.
//!
//! The machine has two states, `Idle` and `Dragging`, and every terminal
//! event returns it to `Idle`:
//!
//! - [`DragState::on_start`]: `Idle → Dragging`, recording the source row.
//! - [`DragState::on_over`]: while dragging, classifies the pointer's
//!   vertical position within the hovered row into a [`DropPosition`] —
//!   top quartile [`DropPosition::Before`], bottom quartile
//!   [`DropPosition::After`], middle half [`DropPosition::Inside`] — and
//!   records it as hover feedback. Cursor feedback only; nothing else
//!   changes.
//! - [`DragState::on_leave`]: clears hover feedback, stays `Dragging`.
//! - [`DragState::on_drop`]: terminal. Dropping a row onto itself is a
//!   silent no-op; any other target yields `Some(DropIntent)`.
//! - [`DragState::on_end`]: unconditional reset, covering cancellation
//!   (for example a drag released outside any valid target).
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use overstory_drag_state::{DragState, DropPosition};
//!
//! let mut drag: DragState<u32> = DragState::new();
//! assert!(drag.on_start(7, Point::new(4.0, 90.0)));
//!
//! // Pointer sits 3px into a 32px row: top quartile, drop before.
//! let hover = drag.on_over(2, Point::new(10.0, 51.0), 48.0, 32.0).unwrap();
//! assert_eq!(hover.position, DropPosition::Before);
//!
//! let intent = drag.on_drop(2, hover.position).unwrap();
//! assert_eq!((intent.source, intent.target), (7, 2));
//! assert!(!drag.is_dragging());
//! ```
//!
//! A disabled machine (see [`DragState::disabled`]) refuses to start a
//! session, which turns the whole surface into no-ops — the host exposes
//! this as its "dragging enabled" configuration flag.
//!
//! This crate is `no_std`; enable the `std` or `libm` feature to satisfy
//! `kurbo`'s float-math requirements in your build.

#![no_std]

mod session;

pub use session::{DragSession, DragState, DropIntent, DropPosition, Hover};
