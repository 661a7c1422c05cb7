// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The virtualization engine controller.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};

use overstory_drag_state::{DragState, DropPosition};
use overstory_flatten::{
    ExpansionState, FlatRow, NodePath, TreeNode, collect_branch_keys, flatten_into, index_paths,
    node_at,
};
use overstory_row_layout::{
    HeightCache, PositionTable, RowWindow, ScrollAlign, Viewport, bootstrap_window,
    compute_row_window, scroll_offset_for,
};

use crate::row::{self, ExpandChange, Outcome, RowEvent, RowModel, RowResponse, TreeIntent};
use crate::TreeViewConfig;

/// Virtualized tree-view engine.
///
/// Owns every piece of shared mutable state — expansion, measured heights,
/// the flattened row order, cumulative positions, viewport geometry, and the
/// drag session — and recomputes derived state eagerly whenever an input
/// changes. It never owns or mutates the caller's tree: snapshots come in
/// through [`TreeView::set_tree`], and user intents go back out as returned
/// [`TreeIntent`] values.
///
/// Flatten and relayout are O(total flattened nodes) per change; the
/// realized window bounds *render* cost to overscan plus what the viewport
/// can show, independent of tree size.
pub struct TreeView<K> {
    config: TreeViewConfig,
    roots: Vec<TreeNode<K>>,
    branch_keys: HashSet<K>,
    paths: HashMap<K, NodePath>,
    expanded: ExpansionState<K>,
    heights: HeightCache<K>,
    rows: Vec<FlatRow<K>>,
    index_of: HashMap<K, usize>,
    positions: PositionTable,
    layout_epoch: u64,
    viewport: Viewport,
    window: Option<RowWindow>,
    drag: DragState<K>,
}

impl<K: Copy + Eq + Hash> core::fmt::Debug for TreeView<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TreeView")
            .field("rows", &self.rows.len())
            .field("expanded", &self.expanded.len())
            .field("total_height", &self.positions.total_height())
            .field("layout_epoch", &self.layout_epoch)
            .field("window", &self.window)
            .field("dragging", &self.drag.is_dragging())
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Eq + Hash> TreeView<K> {
    /// Creates an engine with no snapshot.
    #[must_use]
    pub fn new(config: TreeViewConfig) -> Self {
        Self {
            config,
            roots: Vec::new(),
            branch_keys: HashSet::new(),
            paths: HashMap::new(),
            expanded: ExpansionState::new(),
            heights: HeightCache::new(),
            rows: Vec::new(),
            index_of: HashMap::new(),
            positions: PositionTable::new(),
            layout_epoch: 0,
            viewport: Viewport::new(),
            window: None,
            drag: if config.draggable {
                DragState::new()
            } else {
                DragState::disabled()
            },
        }
    }

    /// The configuration this engine was built with.
    #[must_use]
    pub const fn config(&self) -> &TreeViewConfig {
        &self.config
    }

    /// Replaces the snapshot wholesale.
    ///
    /// One walk rebuilds the branch-key set and the key → path index, then
    /// the flatten and layout passes rerun. Expansion state and measured
    /// heights survive the replacement; entries for keys that no longer
    /// exist are simply unused.
    pub fn set_tree(&mut self, roots: Vec<TreeNode<K>>) {
        self.roots = roots;
        collect_branch_keys(&self.roots, &mut self.branch_keys);
        self.paths = index_paths(&self.roots);
        self.reflatten();
    }

    // Expansion ------------------------------------------------------------

    /// Flips the expansion flag of `key` and reports the change.
    ///
    /// Keys without children are tolerated silently: nothing changes and
    /// `None` is returned, so stale or leaf keys never pollute the state.
    pub fn toggle_expand(&mut self, key: K) -> Option<ExpandChange<K>> {
        if !self.branch_keys.contains(&key) {
            return None;
        }
        let expanded = self.expanded.toggle(key);
        self.reflatten();
        Some(ExpandChange { key, expanded })
    }

    /// Expands `key`; reports the change if it was collapsed.
    ///
    /// Also the seeding surface: call repeatedly before the first paint to
    /// start with a caller-chosen expansion state.
    pub fn expand(&mut self, key: K) -> Option<ExpandChange<K>> {
        if !self.branch_keys.contains(&key) || !self.expanded.insert(key) {
            return None;
        }
        self.reflatten();
        Some(ExpandChange {
            key,
            expanded: true,
        })
    }

    /// Collapses `key`; reports the change if it was expanded.
    pub fn collapse(&mut self, key: K) -> Option<ExpandChange<K>> {
        if !self.expanded.remove(key) {
            return None;
        }
        self.reflatten();
        Some(ExpandChange {
            key,
            expanded: false,
        })
    }

    /// Expands exactly the branch nodes of the current snapshot.
    ///
    /// Leaf keys are never members of the resulting state.
    pub fn expand_all(&mut self) {
        self.expanded.set_exactly(self.branch_keys.iter().copied());
        self.reflatten();
    }

    /// Collapses everything.
    pub fn collapse_all(&mut self) {
        self.expanded.clear();
        self.reflatten();
    }

    /// Read access to the expansion state.
    #[must_use]
    pub const fn expansion(&self) -> &ExpansionState<K> {
        &self.expanded
    }

    // Layout ---------------------------------------------------------------

    /// Records a row's measured height.
    ///
    /// Idempotent: reporting the value already stored changes nothing and
    /// returns `false`, which bounds the render → measure → relayout
    /// feedback loop. A changed value triggers one relayout and a window
    /// refresh, and returns `true`.
    pub fn update_height(&mut self, key: K, height: f64) -> bool {
        if !self.heights.update(key, height) {
            return false;
        }
        self.relayout();
        true
    }

    /// Total content height under the current layout.
    #[must_use]
    pub fn total_height(&self) -> f64 {
        self.positions.total_height()
    }

    /// Number of flattened (visible-order) rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Counter that advances once per layout recomputation.
    ///
    /// Lets hosts (and tests) observe that redundant height reports did
    /// *not* relayout.
    #[must_use]
    pub const fn layout_epoch(&self) -> u64 {
        self.layout_epoch
    }

    // Scrolling ------------------------------------------------------------

    /// Forwards a scroll/geometry notification from the ambient surface.
    ///
    /// `container_top` is the container's top edge in viewport coordinates
    /// (negative once scrolled past). Recomputes the realized window; call
    /// this from the host's scroll listener, which the host installs on
    /// mount and removes on teardown.
    pub fn set_scroll(&mut self, container_top: f64, viewport_height: f64) {
        self.viewport.set_from_container(container_top, viewport_height);
        self.refresh_window();
    }

    /// The realized row range, or `None` while the tree is empty.
    ///
    /// Before the first scroll notification this is the bootstrap window
    /// (the leading rows), so the initial paint is never blank.
    #[must_use]
    pub const fn window(&self) -> Option<RowWindow> {
        self.window
    }

    /// Scroll offset that brings `key`'s row into view.
    ///
    /// The caller applies the offset to whatever owns scrolling; the engine
    /// never scrolls. `None` when the key has no realized row order entry.
    #[must_use]
    pub fn scroll_offset_for(&self, key: K, align: ScrollAlign) -> Option<f64> {
        let index = *self.index_of.get(&key)?;
        scroll_offset_for(
            &self.positions,
            index,
            self.viewport.top(),
            self.viewport.height(),
            align,
        )
    }

    /// Returns `true` if `key`'s row lies entirely inside the viewport.
    #[must_use]
    pub fn is_row_fully_visible(&self, key: K) -> bool {
        if !self.viewport.is_measured() {
            return false;
        }
        let Some(slot) = self.index_of.get(&key).and_then(|&i| self.positions.slot(i)) else {
            return false;
        };
        slot.top >= self.viewport.top() && slot.bottom() <= self.viewport.bottom()
    }

    /// Returns `true` if `key`'s row overlaps the viewport at all.
    #[must_use]
    pub fn is_row_partially_visible(&self, key: K) -> bool {
        if !self.viewport.is_measured() {
            return false;
        }
        let Some(slot) = self.index_of.get(&key).and_then(|&i| self.positions.slot(i)) else {
            return false;
        };
        slot.bottom() > self.viewport.top() && slot.top < self.viewport.bottom()
    }

    // Rows -----------------------------------------------------------------

    /// Iterates the realized rows, in order, as renderable models.
    ///
    /// Rows outside the window are absent, not hidden: the host's render
    /// tree only ever contains what this yields.
    pub fn visible_rows(&self) -> impl Iterator<Item = RowModel<'_, K>> + '_ {
        self.window
            .into_iter()
            .flat_map(|w| w.indices())
            .filter_map(move |i| self.row_model(i))
    }

    /// Renderable model of the row at `index` in flattened order.
    #[must_use]
    pub fn row_model(&self, index: usize) -> Option<RowModel<'_, K>> {
        let flat = self.rows.get(index)?;
        let slot = self.positions.slot(index)?;
        let node = node_at(&self.roots, self.paths.get(&flat.key)?)?;
        Some(row::model(flat, slot, node, &self.config))
    }

    /// Flattened index of `key`'s row, if it is in the current visible order.
    #[must_use]
    pub fn row_index(&self, key: K) -> Option<usize> {
        self.index_of.get(&key).copied()
    }

    // Drag and drop --------------------------------------------------------

    /// Read access to the drag session, for hover feedback rendering.
    #[must_use]
    pub const fn drag(&self) -> &DragState<K> {
        &self.drag
    }

    /// Handles a pointer event the host translated for the row at `key`.
    ///
    /// Click events consume their propagation ([`Outcome::Stop`]); drag
    /// events continue. Any resulting [`TreeIntent`] is the caller's to
    /// validate and apply.
    pub fn handle_row_event(&mut self, key: K, event: RowEvent) -> RowResponse<K> {
        match event {
            RowEvent::ToggleActivate => RowResponse {
                intent: self.toggle_expand(key).map(TreeIntent::Expand),
                outcome: Outcome::Stop,
            },
            RowEvent::Activate => RowResponse {
                intent: Some(TreeIntent::NodeClick(key)),
                outcome: Outcome::Stop,
            },
            RowEvent::DragStart(origin) => {
                self.drag.on_start(key, origin);
                RowResponse {
                    intent: None,
                    outcome: Outcome::Continue,
                }
            }
            RowEvent::DragOver(position) => {
                // Row-local pointer, so the row's own top is zero here.
                self.drag
                    .on_over(key, position, 0.0, self.row_extent(key));
                RowResponse {
                    intent: None,
                    outcome: Outcome::Continue,
                }
            }
            RowEvent::DragLeave => {
                self.drag.on_leave();
                RowResponse {
                    intent: None,
                    outcome: Outcome::Continue,
                }
            }
            RowEvent::Drop(position) => {
                let drop_position = DropPosition::classify(position.y, self.row_extent(key));
                RowResponse {
                    intent: self.drag.on_drop(key, drop_position).map(TreeIntent::Drop),
                    outcome: Outcome::Continue,
                }
            }
            RowEvent::DragEnd => {
                self.drag.on_end();
                RowResponse {
                    intent: None,
                    outcome: Outcome::Continue,
                }
            }
        }
    }

    // Internals ------------------------------------------------------------

    fn row_extent(&self, key: K) -> f64 {
        self.index_of
            .get(&key)
            .and_then(|&i| self.positions.slot(i))
            .map_or(self.config.min_row_height, |slot| slot.height)
    }

    fn reflatten(&mut self) {
        flatten_into(&self.roots, &self.expanded, &mut self.rows);
        self.index_of.clear();
        for (i, row) in self.rows.iter().enumerate() {
            self.index_of.insert(row.key, i);
        }
        self.relayout();
    }

    fn relayout(&mut self) {
        let heights = &self.heights;
        let fallback = self.config.min_row_height;
        self.positions
            .rebuild(self.rows.iter().map(|r| heights.height_or(r.key, fallback)));
        self.layout_epoch += 1;
        self.refresh_window();
    }

    fn refresh_window(&mut self) {
        self.window = if self.viewport.is_measured() {
            compute_row_window(
                &self.positions,
                self.viewport.top(),
                self.viewport.height(),
                self.config.overscan_rows,
            )
        } else {
            bootstrap_window(self.positions.len())
        };
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use kurbo::Point;

    use overstory_drag_state::{DropIntent, DropPosition};
    use overstory_flatten::TreeNode;
    use overstory_row_layout::{BOOTSTRAP_ROWS, ScrollAlign};

    use super::TreeView;
    use crate::row::{Outcome, RowEvent, TreeIntent};
    use crate::TreeViewConfig;

    fn forest() -> Vec<TreeNode<char>> {
        vec![
            TreeNode::branch('A', "A", vec![TreeNode::leaf('B', "B")]),
            TreeNode::branch('C', "C", vec![TreeNode::leaf('D', "D")]),
        ]
    }

    fn config() -> TreeViewConfig {
        TreeViewConfig {
            min_row_height: 32.0,
            overscan_rows: 0,
            indent_width: 24.0,
            draggable: true,
        }
    }

    fn view() -> TreeView<char> {
        let mut view = TreeView::new(config());
        view.set_tree(forest());
        view
    }

    #[test]
    fn snapshot_replacement_reflattens() {
        let mut view = view();
        assert_eq!(view.row_count(), 2);

        view.toggle_expand('C');
        let keys: Vec<char> = view.visible_rows().map(|r| r.key).collect();
        assert_eq!(keys, vec!['A', 'C', 'D']);
        let depths: Vec<usize> = view.visible_rows().map(|r| r.depth).collect();
        assert_eq!(depths, vec![0, 0, 1]);

        // Replacing the snapshot reruns the walk against surviving state.
        view.set_tree(vec![TreeNode::branch(
            'C',
            "C",
            vec![TreeNode::leaf('E', "E")],
        )]);
        let keys: Vec<char> = view.visible_rows().map(|r| r.key).collect();
        assert_eq!(keys, vec!['C', 'E']);
    }

    #[test]
    fn toggle_on_a_leaf_is_tolerated_silently() {
        let mut view = view();
        let epoch = view.layout_epoch();
        assert_eq!(view.toggle_expand('B'), None);
        assert_eq!(view.toggle_expand('Z'), None);
        assert_eq!(view.layout_epoch(), epoch);
    }

    #[test]
    fn toggle_reports_the_new_flag() {
        let mut view = view();
        let change = view.toggle_expand('A').unwrap();
        assert!(change.expanded);
        let change = view.toggle_expand('A').unwrap();
        assert!(!change.expanded);
    }

    #[test]
    fn expand_all_holds_exactly_the_branch_keys() {
        let mut view = view();
        view.expand_all();

        let expanded: Vec<char> = {
            let mut keys: Vec<char> = view.expansion().iter().collect();
            keys.sort_unstable();
            keys
        };
        assert_eq!(expanded, vec!['A', 'C']);
        assert_eq!(view.row_count(), 4);

        view.collapse_all();
        assert!(view.expansion().is_empty());
        assert_eq!(view.row_count(), 2);
    }

    #[test]
    fn expand_and_collapse_report_only_real_changes() {
        let mut view = view();
        assert!(view.expand('A').is_some());
        assert!(view.expand('A').is_none());
        assert!(view.expand('B').is_none());
        assert!(view.collapse('A').is_some());
        assert!(view.collapse('A').is_none());
    }

    #[test]
    fn layout_uses_measured_heights_over_the_fallback() {
        let mut view = view();
        view.toggle_expand('C'); // rows: A, C, D

        view.update_height('A', 32.0);
        view.update_height('C', 40.0);
        view.update_height('D', 32.0);

        let tops: Vec<f64> = view.visible_rows().map(|r| r.top).collect();
        assert_eq!(tops, vec![0.0, 32.0, 72.0]);
        assert_eq!(view.total_height(), 104.0);
    }

    #[test]
    fn redundant_height_reports_do_not_relayout() {
        let mut view = view();
        assert!(view.update_height('A', 40.0));
        let epoch = view.layout_epoch();
        assert!(!view.update_height('A', 40.0));
        assert_eq!(view.layout_epoch(), epoch);
        assert!(view.update_height('A', 44.0));
        assert_eq!(view.layout_epoch(), epoch + 1);
    }

    #[test]
    fn bootstrap_window_appears_before_any_scroll_notification() {
        let view: TreeView<u32> = TreeView::new(config());
        assert_eq!(view.window(), None);

        let children: Vec<TreeNode<u32>> =
            (1..100).map(|i| TreeNode::leaf(i, "n")).collect();
        let mut view = TreeView::new(config());
        view.set_tree(vec![TreeNode::branch(0, "root", children)]);
        view.expand_all();

        let window = view.window().unwrap();
        assert_eq!((window.start, window.end), (0, BOOTSTRAP_ROWS));
    }

    #[test]
    fn scroll_notifications_drive_the_window() {
        let mut view = TreeView::new(config());
        view.set_tree((0..50_u32).map(|i| TreeNode::leaf(i, "n")).collect());

        // 32px rows; container scrolled 64px past, viewport 96px tall.
        view.set_scroll(-64.0, 96.0);
        let window = view.window().unwrap();
        // Row 1 ends exactly at the viewport top and is still realized.
        assert_eq!(window.start, 1);
        let keys: Vec<u32> = view.visible_rows().map(|r| r.key).collect();
        assert_eq!(keys.first(), Some(&1));
        assert!(keys.len() < 10);

        // Scrolling further never moves the start backwards.
        view.set_scroll(-128.0, 96.0);
        assert!(view.window().unwrap().start >= window.start);
    }

    #[test]
    fn visibility_queries_track_the_viewport() {
        let mut view = TreeView::new(config());
        view.set_tree((0..10_u32).map(|i| TreeNode::leaf(i, "n")).collect());
        assert!(!view.is_row_partially_visible(0));

        view.set_scroll(0.0, 64.0); // viewport 0..64 over 32px rows
        assert!(view.is_row_fully_visible(0));
        assert!(view.is_row_fully_visible(1));
        assert!(!view.is_row_fully_visible(2));
        assert!(!view.is_row_partially_visible(3));

        view.set_scroll(-16.0, 64.0); // viewport 16..80
        assert!(!view.is_row_fully_visible(0));
        assert!(view.is_row_partially_visible(0));
        assert!(view.is_row_fully_visible(1));
    }

    #[test]
    fn scroll_offsets_resolve_by_key() {
        let mut view = TreeView::new(config());
        view.set_tree((0..10_u32).map(|i| TreeNode::leaf(i, "n")).collect());
        view.set_scroll(0.0, 96.0);

        assert_eq!(view.scroll_offset_for(5, ScrollAlign::Start), Some(160.0));
        assert_eq!(view.scroll_offset_for(5, ScrollAlign::End), Some(96.0));
        assert_eq!(view.scroll_offset_for(99, ScrollAlign::Start), None);
    }

    #[test]
    fn click_events_stop_propagation_and_report_intents() {
        let mut view = view();

        let response = view.handle_row_event('A', RowEvent::ToggleActivate);
        assert_eq!(response.outcome, Outcome::Stop);
        match response.intent {
            Some(TreeIntent::Expand(change)) => {
                assert_eq!(change.key, 'A');
                assert!(change.expanded);
            }
            other => panic!("expected expand intent, got {other:?}"),
        }

        let response = view.handle_row_event('B', RowEvent::Activate);
        assert_eq!(response.outcome, Outcome::Stop);
        assert_eq!(response.intent, Some(TreeIntent::NodeClick('B')));

        // Toggling a leaf still consumes the click, intent or not.
        let response = view.handle_row_event('B', RowEvent::ToggleActivate);
        assert_eq!(response.outcome, Outcome::Stop);
        assert_eq!(response.intent, None);
    }

    #[test]
    fn drag_round_trip_emits_one_drop_intent() {
        let mut view = view();
        view.toggle_expand('A'); // rows: A, B, C
        view.update_height('C', 40.0);

        view.handle_row_event('B', RowEvent::DragStart(Point::new(2.0, 4.0)));
        assert!(view.drag().is_dragging());

        // Pointer 4px into C's 40px row: top quartile.
        view.handle_row_event('C', RowEvent::DragOver(Point::new(6.0, 4.0)));
        assert_eq!(view.drag().hover().unwrap().position, DropPosition::Before);

        let response = view.handle_row_event('C', RowEvent::Drop(Point::new(6.0, 4.0)));
        assert_eq!(
            response.intent,
            Some(TreeIntent::Drop(DropIntent {
                source: 'B',
                target: 'C',
                position: DropPosition::Before,
            }))
        );
        assert_eq!(response.outcome, Outcome::Continue);
        assert!(!view.drag().is_dragging());

        // Terminal: the session is gone.
        let response = view.handle_row_event('C', RowEvent::Drop(Point::new(6.0, 4.0)));
        assert_eq!(response.intent, None);
    }

    #[test]
    fn self_drop_produces_no_intent_and_resets() {
        let mut view = view();
        view.handle_row_event('A', RowEvent::DragStart(Point::new(0.0, 0.0)));
        let response = view.handle_row_event('A', RowEvent::Drop(Point::new(0.0, 16.0)));
        assert_eq!(response.intent, None);
        assert!(!view.drag().is_dragging());
    }

    #[test]
    fn drag_leave_and_end_cover_cancellation() {
        let mut view = view();
        view.handle_row_event('A', RowEvent::DragStart(Point::new(0.0, 0.0)));
        view.handle_row_event('C', RowEvent::DragOver(Point::new(0.0, 16.0)));
        view.handle_row_event('C', RowEvent::DragLeave);
        assert!(view.drag().is_dragging());
        assert!(view.drag().hover().is_none());

        view.handle_row_event('A', RowEvent::DragEnd);
        assert!(!view.drag().is_dragging());
    }

    #[test]
    fn disabled_dragging_makes_the_surface_inert() {
        let mut view = TreeView::new(TreeViewConfig {
            draggable: false,
            ..config()
        });
        view.set_tree(forest());

        view.handle_row_event('A', RowEvent::DragStart(Point::new(0.0, 0.0)));
        assert!(!view.drag().is_dragging());
        let response = view.handle_row_event('C', RowEvent::Drop(Point::new(0.0, 0.0)));
        assert_eq!(response.intent, None);
    }

    #[test]
    fn empty_tree_yields_no_window_and_no_rows() {
        let mut view: TreeView<char> = TreeView::new(config());
        view.set_tree(Vec::new());
        view.set_scroll(0.0, 100.0);
        assert_eq!(view.window(), None);
        assert_eq!(view.visible_rows().count(), 0);
        assert_eq!(view.total_height(), 0.0);
    }
}
