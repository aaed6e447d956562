//! Notion-style workspace partition tests: orientation auto-selection from
//! the monitor aspect ratio, window distribution into two accordion regions,
//! and placeholder reservation for regions left without content.

mod common;

use common::{
    attach_windows, engine_with_overlay, portrait_engine_with_overlay, window_ids_left_to_right,
};
use tiletree::{Engine, LayoutMode, NodeId, Orientation};

/// The two region containers created by a notion split, in child order.
fn regions(engine: &Engine) -> (NodeId, NodeId) {
    let tree = engine.tree();
    let root = engine.workspace().root_container();
    let containers: Vec<NodeId> = tree
        .children(root)
        .iter()
        .copied()
        .filter(|&c| tree.is_container(c))
        .collect();
    assert_eq!(containers.len(), 2, "expected exactly two region containers");
    (containers[0], containers[1])
}

#[test]
fn test_landscape_monitor_selects_horizontal_root() {
    let (mut engine, overlay) = engine_with_overlay();
    attach_windows(&mut engine, &overlay, 2);
    engine.notion_split(None).unwrap();

    let tree = engine.tree();
    let root = engine.workspace().root_container();
    assert_eq!(tree.orientation(root), Orientation::Horizontal);
    let (first, second) = regions(&engine);
    // Regions run opposite to the root and stack content as accordions.
    for region in [first, second] {
        assert_eq!(tree.orientation(region), Orientation::Vertical);
        assert_eq!(tree.layout_mode(region), LayoutMode::Accordion);
    }
}

#[test]
fn test_portrait_monitor_selects_vertical_root() {
    let (mut engine, overlay) = portrait_engine_with_overlay();
    overlay.set_frame(1, tiletree::Rect::new(0.0, 0.0, 1080.0, 1920.0));
    engine.attach_window(1);
    engine.notion_split(None).unwrap();

    let tree = engine.tree();
    let root = engine.workspace().root_container();
    assert_eq!(tree.orientation(root), Orientation::Vertical);
    let (first, _) = regions(&engine);
    assert_eq!(tree.orientation(first), Orientation::Horizontal);
}

#[test]
fn test_explicit_orientation_overrides_auto_selection() {
    let (mut engine, overlay) = engine_with_overlay();
    attach_windows(&mut engine, &overlay, 2);
    engine.notion_split(Some(Orientation::Vertical)).unwrap();
    let root = engine.workspace().root_container();
    assert_eq!(engine.tree().orientation(root), Orientation::Vertical);
}

#[test]
fn test_windows_distribute_half_and_half() {
    let (mut engine, overlay) = engine_with_overlay();
    attach_windows(&mut engine, &overlay, 4);
    engine.notion_split(None).unwrap();

    let tree = engine.tree();
    let (first, second) = regions(&engine);
    assert_eq!(tree.children(first).len(), 2);
    assert_eq!(tree.children(second).len(), 2);
    assert_eq!(window_ids_left_to_right(&engine), vec![1, 2, 3, 4]);
    // No placeholders needed: both regions have content.
    let root = engine.workspace().root_container();
    assert!(tree.all_empty_splits_recursive(root).is_empty());
}

#[test]
fn test_single_window_leaves_placeholder_in_second_region() {
    let (mut engine, overlay) = engine_with_overlay();
    attach_windows(&mut engine, &overlay, 1);
    engine.notion_split(None).unwrap();

    let tree = engine.tree();
    let (first, second) = regions(&engine);
    // The lone window stays in the first region; the second is reserved with
    // a real placeholder so normalization never sees an empty container.
    assert_eq!(tree.children(first).len(), 1);
    assert!(tree.is_window(tree.children(first)[0]));
    assert_eq!(tree.children(second).len(), 1);
    assert!(tree.is_empty_split(tree.children(second)[0]));
}

#[test]
fn test_second_region_becomes_most_recent() {
    let (mut engine, overlay) = engine_with_overlay();
    attach_windows(&mut engine, &overlay, 1);
    engine.notion_split(None).unwrap();

    let tree = engine.tree();
    let root = engine.workspace().root_container();
    let (_, second) = regions(&engine);
    assert_eq!(tree.most_recent_child(root), Some(second));

    // The next attached window therefore fulfils the second region's
    // placeholder instead of piling onto the first region.
    overlay.set_frame(2, common::MONITOR);
    engine.attach_window(2);
    assert_eq!(tree_children_window_ids(&engine, second), vec![2]);
    assert!(
        engine
            .tree()
            .all_empty_splits_recursive(root)
            .is_empty()
    );
}

#[test]
fn test_empty_workspace_gets_two_placeholders_and_focus() {
    let (mut engine, _overlay) = engine_with_overlay();
    engine.notion_split(None).unwrap();

    let tree = engine.tree();
    let root = engine.workspace().root_container();
    assert_eq!(tree.all_empty_splits_recursive(root).len(), 2);

    // Nothing was focused, so focus lands on the second region's placeholder
    // and its visual resource is live.
    let focused = engine.focused().expect("placeholder should take focus");
    assert!(tree.is_empty_split(focused));
    let (_, second) = regions(&engine);
    assert_eq!(tree.parent(focused), Some(second));
    let id = tree.empty_split_id(focused).unwrap();
    assert!(engine.border().has_empty_split_visual(id));
}

#[test]
fn test_focused_window_keeps_focus_across_partition() {
    let (mut engine, overlay) = engine_with_overlay();
    let nodes = attach_windows(&mut engine, &overlay, 3);
    engine.focus_node(nodes[0]);
    engine.notion_split(None).unwrap();
    assert_eq!(engine.focused(), Some(nodes[0]));
}

fn tree_children_window_ids(engine: &Engine, container: NodeId) -> Vec<u32> {
    let tree = engine.tree();
    tree.children(container)
        .iter()
        .filter_map(|&c| tree.window_id(c))
        .collect()
}
