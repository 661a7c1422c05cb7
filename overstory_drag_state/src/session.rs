// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Session types and the state machine itself.

use kurbo::Point;

/// Requested placement of a dragged row relative to the drop target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropPosition {
    /// Insert as the target's preceding sibling.
    Before,
    /// Insert as the target's following sibling.
    After,
    /// Reparent under the target.
    Inside,
}

impl DropPosition {
    /// Classifies a pointer's vertical offset within a row.
    ///
    /// Top quartile is [`Self::Before`], bottom quartile [`Self::After`],
    /// the middle half [`Self::Inside`]. Degenerate rows (zero or negative
    /// extent) classify as [`Self::Inside`].
    #[must_use]
    pub fn classify(offset_in_row: f64, row_extent: f64) -> Self {
        if row_extent <= 0.0 {
            return Self::Inside;
        }
        let fraction = offset_in_row / row_extent;
        if fraction < 0.25 {
            Self::Before
        } else if fraction > 0.75 {
            Self::After
        } else {
            Self::Inside
        }
    }
}

/// The drop proposal emitted to the host when a drag completes.
///
/// The host must validate the move against its canonical tree — in
/// particular reject targets that are descendants of `source` — before
/// mutating anything; the state machine cannot see tree structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropIntent<K> {
    /// Row being dragged.
    pub source: K,
    /// Row it was dropped on.
    pub target: K,
    /// Placement relative to `target`.
    pub position: DropPosition,
}

/// Hover feedback recorded while dragging: the row under the pointer and
/// the placement the pointer currently proposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hover<K> {
    /// Row currently under the pointer.
    pub target: K,
    /// Proposed placement.
    pub position: DropPosition,
}

/// An active drag.
#[derive(Clone, Copy, Debug)]
pub struct DragSession<K> {
    /// Row the drag started on.
    pub source: K,
    /// Pointer position at drag start.
    pub origin: Point,
    /// Current hover feedback, if the pointer is over a row.
    pub hover: Option<Hover<K>>,
}

/// Drag-and-drop state machine over at most one [`DragSession`].
#[derive(Clone, Debug)]
pub struct DragState<K> {
    enabled: bool,
    session: Option<DragSession<K>>,
}

impl<K: Copy + PartialEq> DragState<K> {
    /// Creates an enabled machine in the `Idle` state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            enabled: true,
            session: None,
        }
    }

    /// Creates a disabled machine; every operation is a no-op until
    /// [`Self::set_enabled`] turns it on.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            session: None,
        }
    }

    /// Enables or disables dragging. Disabling cancels any active session.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.session = None;
        }
    }

    /// Returns `true` if the machine accepts new sessions.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Starts a session: `Idle → Dragging`.
    ///
    /// Returns `false` (and changes nothing) when disabled or when a
    /// session is already active.
    pub fn on_start(&mut self, source: K, origin: Point) -> bool {
        if !self.enabled || self.session.is_some() {
            return false;
        }
        self.session = Some(DragSession {
            source,
            origin,
            hover: None,
        });
        true
    }

    /// Records hover feedback while dragging.
    ///
    /// `row_top` and `row_extent` locate the hovered row in the same
    /// coordinate space as `position`; the pointer's offset within the row
    /// drives the [`DropPosition`] classification. Returns the updated
    /// feedback, or `None` when no drag is active. No tree state changes
    /// here — this is cursor feedback only.
    pub fn on_over(
        &mut self,
        target: K,
        position: Point,
        row_top: f64,
        row_extent: f64,
    ) -> Option<Hover<K>> {
        let session = self.session.as_mut()?;
        let hover = Hover {
            target,
            position: DropPosition::classify(position.y - row_top, row_extent),
        };
        session.hover = Some(hover);
        Some(hover)
    }

    /// Clears hover feedback while remaining in `Dragging`.
    pub fn on_leave(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.hover = None;
        }
    }

    /// Completes the drag: terminal, always returns to `Idle`.
    ///
    /// Dropping a row onto itself is a silent no-op (`None`); otherwise the
    /// returned [`DropIntent`] is the host's cue to validate and apply the
    /// move.
    pub fn on_drop(&mut self, target: K, position: DropPosition) -> Option<DropIntent<K>> {
        let session = self.session.take()?;
        if session.source == target {
            return None;
        }
        Some(DropIntent {
            source: session.source,
            target,
            position,
        })
    }

    /// Unconditionally resets to `Idle`; returns `true` if a session was
    /// active. Covers cancellation paths the host cannot classify.
    pub fn on_end(&mut self) -> bool {
        self.session.take().is_some()
    }

    /// Returns `true` while a session is active.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession<K>> {
        self.session.as_ref()
    }

    /// The dragged row, if a session is active.
    #[must_use]
    pub fn source(&self) -> Option<K> {
        self.session.as_ref().map(|s| s.source)
    }

    /// Current hover feedback, if any.
    #[must_use]
    pub fn hover(&self) -> Option<Hover<K>> {
        self.session.as_ref().and_then(|s| s.hover)
    }
}

impl<K: Copy + PartialEq> Default for DragState<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::{DragState, DropIntent, DropPosition};

    #[test]
    fn classification_follows_the_quartiles() {
        assert_eq!(DropPosition::classify(0.0, 32.0), DropPosition::Before);
        assert_eq!(DropPosition::classify(7.9, 32.0), DropPosition::Before);
        assert_eq!(DropPosition::classify(8.0, 32.0), DropPosition::Inside);
        assert_eq!(DropPosition::classify(24.0, 32.0), DropPosition::Inside);
        assert_eq!(DropPosition::classify(24.1, 32.0), DropPosition::After);
        assert_eq!(DropPosition::classify(31.9, 32.0), DropPosition::After);
        // Degenerate extent.
        assert_eq!(DropPosition::classify(5.0, 0.0), DropPosition::Inside);
    }

    #[test]
    fn drop_on_another_row_emits_one_intent_then_idles() {
        let mut drag: DragState<char> = DragState::new();
        assert!(drag.on_start('B', Point::new(0.0, 0.0)));

        let hover = drag.on_over('C', Point::new(5.0, 33.0), 32.0, 40.0).unwrap();
        assert_eq!(hover.position, DropPosition::Before);

        let intent = drag.on_drop('C', DropPosition::Before);
        assert_eq!(
            intent,
            Some(DropIntent {
                source: 'B',
                target: 'C',
                position: DropPosition::Before,
            })
        );
        assert!(!drag.is_dragging());
        // Terminal: a second drop has no session to complete.
        assert_eq!(drag.on_drop('C', DropPosition::Before), None);
    }

    #[test]
    fn self_drop_is_a_silent_no_op() {
        let mut drag: DragState<u32> = DragState::new();
        drag.on_start(7, Point::new(0.0, 0.0));
        assert_eq!(drag.on_drop(7, DropPosition::Inside), None);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn leave_clears_hover_but_keeps_dragging() {
        let mut drag: DragState<u32> = DragState::new();
        drag.on_start(1, Point::new(0.0, 0.0));
        drag.on_over(2, Point::new(0.0, 16.0), 0.0, 32.0);
        assert!(drag.hover().is_some());

        drag.on_leave();
        assert!(drag.hover().is_none());
        assert!(drag.is_dragging());
    }

    #[test]
    fn end_resets_from_any_state() {
        let mut drag: DragState<u32> = DragState::new();
        assert!(!drag.on_end());

        drag.on_start(1, Point::new(0.0, 0.0));
        drag.on_over(2, Point::new(0.0, 16.0), 0.0, 32.0);
        assert!(drag.on_end());
        assert!(!drag.is_dragging());
        assert!(drag.hover().is_none());
    }

    #[test]
    fn a_second_start_is_refused_while_dragging() {
        let mut drag: DragState<u32> = DragState::new();
        assert!(drag.on_start(1, Point::new(0.0, 0.0)));
        assert!(!drag.on_start(2, Point::new(0.0, 0.0)));
        assert_eq!(drag.source(), Some(1));
    }

    #[test]
    fn disabled_machine_refuses_everything() {
        let mut drag: DragState<u32> = DragState::disabled();
        assert!(!drag.on_start(1, Point::new(0.0, 0.0)));
        assert!(drag.on_over(2, Point::new(0.0, 0.0), 0.0, 32.0).is_none());
        assert_eq!(drag.on_drop(2, DropPosition::Inside), None);
        assert!(!drag.on_end());
    }

    #[test]
    fn disabling_cancels_the_active_session() {
        let mut drag: DragState<u32> = DragState::new();
        drag.on_start(1, Point::new(0.0, 0.0));
        drag.set_enabled(false);
        assert!(!drag.is_dragging());
        drag.set_enabled(true);
        assert!(drag.on_start(3, Point::new(0.0, 0.0)));
    }

    #[test]
    fn over_without_a_session_reports_nothing() {
        let mut drag: DragState<u32> = DragState::new();
        assert!(drag.on_over(2, Point::new(0.0, 0.0), 0.0, 32.0).is_none());
    }
}
