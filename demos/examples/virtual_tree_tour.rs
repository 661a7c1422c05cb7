// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tour of the virtualized tree-view engine.
//!
//! This example plays the host: it owns the canonical tree, feeds the
//! engine snapshots, forwards scroll notifications and pointer events, and
//! applies the intents the engine reports back — including the caller-side
//! descendant check that the engine deliberately leaves to the tree owner.
//!
//! Run:
//! - `cargo run -p overstory_demos --example virtual_tree_tour`

use kurbo::Point;
use overstory_flatten::TreeNode;
use overstory_tree_view::{
    DropIntent, DropPosition, RowEvent, ScrollAlign, TreeIntent, TreeView, TreeViewConfig,
};

/// Builds a forest of `groups` branches with `per_group` leaves each.
fn generate(groups: u32, per_group: u32) -> Vec<TreeNode<u32>> {
    (0..groups)
        .map(|g| {
            let children = (0..per_group)
                .map(|i| {
                    let key = (g + 1) * 1000 + i;
                    TreeNode::leaf(key, format!("item {g}-{i}"))
                })
                .collect();
            TreeNode::branch(g, format!("group {g}"), children)
        })
        .collect()
}

/// Removes the node with `key` from the forest, returning it.
fn remove_node(nodes: &mut Vec<TreeNode<u32>>, key: u32) -> Option<TreeNode<u32>> {
    if let Some(i) = nodes.iter().position(|n| n.key == key) {
        return Some(nodes.remove(i));
    }
    nodes.iter_mut().find_map(|n| remove_node(&mut n.children, key))
}

/// Returns `true` if `key` lives anywhere under `node`.
fn contains(node: &TreeNode<u32>, key: u32) -> bool {
    node.children.iter().any(|c| c.key == key || contains(c, key))
}

/// Applies a drop intent to the canonical tree.
///
/// The engine cannot see tree structure, so rejecting cycle-forming moves
/// (dropping a node into its own subtree) happens here, in the owner.
fn apply_drop(roots: &mut Vec<TreeNode<u32>>, intent: &DropIntent<u32>) -> bool {
    let Some(dragged) = remove_node(roots, intent.source) else {
        return false;
    };
    if contains(&dragged, intent.target) {
        // Would re-parent an ancestor under its own descendant; put it back.
        roots.push(dragged);
        return false;
    }

    fn insert(
        nodes: &mut Vec<TreeNode<u32>>,
        target: u32,
        position: DropPosition,
        dragged: TreeNode<u32>,
    ) -> Option<TreeNode<u32>> {
        if let Some(i) = nodes.iter().position(|n| n.key == target) {
            match position {
                DropPosition::Before => nodes.insert(i, dragged),
                DropPosition::After => nodes.insert(i + 1, dragged),
                DropPosition::Inside => nodes[i].children.push(dragged),
            }
            return None;
        }
        let mut dragged = Some(dragged);
        for node in nodes.iter_mut() {
            let taken = dragged.take().expect("dragged node is present until inserted");
            match insert(&mut node.children, target, position, taken) {
                None => return None,
                Some(back) => dragged = Some(back),
            }
        }
        dragged
    }

    match insert(roots, intent.target, intent.position, dragged) {
        None => true,
        // Target vanished between intent and apply; restore the node.
        Some(back) => {
            roots.push(back);
            false
        }
    }
}

fn main() {
    let mut roots = generate(40, 25);

    let mut view: TreeView<u32> = TreeView::new(TreeViewConfig {
        draggable: true,
        ..TreeViewConfig::default()
    });
    view.set_tree(roots.clone());

    // Before any scroll notification the bootstrap window paints the
    // leading rows.
    println!("collapsed rows: {}", view.row_count());
    let window = view.window().expect("forest is non-empty");
    println!("bootstrap window: rows {}..={}", window.start, window.end);

    // Expand everything and scroll 400px into a 600px-tall viewport.
    view.expand_all();
    view.set_scroll(-400.0, 600.0);
    println!(
        "expanded rows: {} (total height {}px)",
        view.row_count(),
        view.total_height()
    );

    // Render loop: draw what the engine realizes, then report measured
    // heights back (here: branches render taller than leaves).
    let realized: Vec<(u32, f64)> = view
        .visible_rows()
        .map(|row| (row.key, if row.has_children { 40.0 } else { 28.0 }))
        .collect();
    println!("realized rows this frame: {}", realized.len());
    for (key, measured) in realized {
        view.update_height(key, measured);
    }
    println!("total height after measurement: {}px", view.total_height());

    // The caller can ask where a row lives and drive its own scrollbar.
    let offset = view
        .scroll_offset_for(5, ScrollAlign::Start)
        .expect("group 5 exists");
    println!("scroll offset aligning group 5 to the top: {offset}px");

    // Drag leaf 1000 onto group 3: the engine reports an intent, the owner
    // validates and applies it, then feeds back a fresh snapshot.
    view.handle_row_event(1000, RowEvent::DragStart(Point::new(4.0, 10.0)));
    view.handle_row_event(3, RowEvent::DragOver(Point::new(4.0, 20.0)));
    let response = view.handle_row_event(3, RowEvent::Drop(Point::new(4.0, 20.0)));
    if let Some(TreeIntent::Drop(intent)) = response.intent {
        println!(
            "drop intent: {} onto {} ({:?})",
            intent.source, intent.target, intent.position
        );
        if apply_drop(&mut roots, &intent) {
            view.set_tree(roots.clone());
            println!("applied; rows now: {}", view.row_count());
        }
    }

    // A cycle-forming drop is refused by the owner, not the engine.
    view.handle_row_event(3, RowEvent::DragStart(Point::new(0.0, 0.0)));
    let response = view.handle_row_event(1000, RowEvent::Drop(Point::new(0.0, 20.0)));
    if let Some(TreeIntent::Drop(intent)) = response.intent {
        let applied = apply_drop(&mut roots, &intent);
        println!("dropping group 3 into its own subtree applied: {applied}");
    }
}
