//! Layout snapshot tests: freezing a live workspace, thawing it into a fresh
//! tree, and round-tripping through the on-disk JSON format.

mod common;

use common::{attach_windows, engine_with_overlay, window_ids_left_to_right};
use tiletree::{
    BindIndex, FrozenNode, LayoutMode, Orientation, SnapshotError, SplitArg, Tree, Workspace,
};

/// Frozen shape of a nested layout: [w1, C(vertical)[w2, w3]].
fn nested_engine() -> tiletree::Engine {
    let (mut engine, overlay) = engine_with_overlay();
    attach_windows(&mut engine, &overlay, 2);
    engine.split(SplitArg::Vertical).unwrap();
    overlay.set_frame(3, common::MONITOR);
    engine.attach_window(3);
    engine
}

#[test]
fn test_freeze_captures_nested_shape() {
    let engine = nested_engine();
    let frozen = engine.freeze_root();

    let FrozenNode::Container {
        children,
        orientation,
        layout,
        ..
    } = &frozen
    else {
        panic!("root snapshot must be a container");
    };
    assert_eq!(*orientation, Orientation::Horizontal);
    assert_eq!(*layout, LayoutMode::Tiles);
    assert_eq!(children.len(), 2);
    assert!(matches!(children[0], FrozenNode::Window { id: 1, .. }));
    let FrozenNode::Container {
        children: inner,
        orientation: inner_orientation,
        ..
    } = &children[1]
    else {
        panic!("second child must be the wrapper container");
    };
    assert_eq!(*inner_orientation, Orientation::Vertical);
    assert_eq!(inner.len(), 2);
}

#[test]
fn test_thaw_rebuilds_equivalent_tree() {
    let engine = nested_engine();
    let frozen = engine.freeze_root();

    let mut tree = Tree::new();
    let ws = Workspace::create(&mut tree, "restored");
    let restored = frozen.thaw(&mut tree, ws.root_container(), BindIndex::Append);

    // Same shape, same window ids, same depth-first order.
    assert_eq!(tree.orientation(restored), Orientation::Horizontal);
    let ids: Vec<_> = tree
        .all_windows_recursive(restored)
        .iter()
        .map(|&n| tree.window_id(n).unwrap())
        .collect();
    assert_eq!(ids, window_ids_left_to_right(&engine));
    // Refreezing the thawed subtree reproduces the snapshot exactly.
    assert_eq!(FrozenNode::freeze(&tree, restored), frozen);
}

#[test]
fn test_snapshot_survives_disk_round_trip() {
    let engine = nested_engine();
    let frozen = engine.freeze_root();

    let dir = tempfile::TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("layout.json");
    frozen.save_to_path(&path).unwrap();
    let loaded = FrozenNode::load_from_path(&path).unwrap();
    assert_eq!(loaded, frozen);
}

#[test]
fn test_snapshot_preserves_placeholders() {
    let (mut engine, _overlay) = engine_with_overlay();
    let root = engine.workspace().root_container();
    let es = engine.create_empty_split(root, BindIndex::Append).unwrap();
    let id = engine.tree().empty_split_id(es).unwrap();

    let frozen = engine.freeze_root();
    let FrozenNode::Container { children, .. } = &frozen else {
        panic!("root snapshot must be a container");
    };
    // Placeholders persist with their stable id, so a restored layout can
    // keep routing windows into reserved regions.
    assert!(matches!(
        children[0],
        FrozenNode::EmptySplit { id: frozen_id, .. } if frozen_id == id
    ));
}

#[test]
fn test_load_missing_file_reports_path() {
    let dir = tempfile::TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("absent.json");
    let err = FrozenNode::load_from_path(&path).unwrap_err();
    match err {
        SnapshotError::Io { path: p, .. } => assert!(p.ends_with("absent.json")),
        other => panic!("expected I/O error, got {other:?}"),
    }
}

#[test]
fn test_load_rejects_malformed_json() {
    let dir = tempfile::TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = FrozenNode::load_from_path(&path).unwrap_err();
    assert!(matches!(err, SnapshotError::Json(_)));
}
