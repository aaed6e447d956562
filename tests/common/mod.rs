//! Shared integration test helpers for tiletree.
//!
//! This module provides canonical factory functions used across the `tests/`
//! integration test suite.
//!
//! # Usage
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{engine_with_overlay, window_ids_left_to_right};
//! ```
//!
//! Note: Rust integration tests use `mod common;` (not `use`) to bring in
//! helpers from `tests/common/mod.rs`. The `#[allow(dead_code)]` attributes
//! suppress warnings when only a subset of helpers are used per file.

#![allow(dead_code)]

use tiletree::{Engine, NodeId, Rect, RecordingOverlay, WindowId};

/// Monitor rect used by every suite: landscape 1920x1080 at the origin.
pub const MONITOR: Rect = Rect {
    x: 0.0,
    y: 0.0,
    width: 1920.0,
    height: 1080.0,
};

/// Engine over a recording overlay with a landscape monitor. The overlay
/// clone shares the recorded call log with the boundary the engine owns.
pub fn engine_with_overlay() -> (Engine, RecordingOverlay) {
    let overlay = RecordingOverlay::new(MONITOR);
    let engine = Engine::new(Box::new(overlay.clone()), "main");
    (engine, overlay)
}

/// Portrait-monitor variant, for orientation auto-selection tests.
pub fn portrait_engine_with_overlay() -> (Engine, RecordingOverlay) {
    let overlay = RecordingOverlay::new(Rect::new(0.0, 0.0, 1080.0, 1920.0));
    let engine = Engine::new(Box::new(overlay.clone()), "main");
    (engine, overlay)
}

/// Attach `n` tiled windows with ids 1..=n, registering each frame with the
/// overlay so border sync can query them. Returns the node ids in attach
/// order.
pub fn attach_windows(engine: &mut Engine, overlay: &RecordingOverlay, n: u32) -> Vec<NodeId> {
    (1..=n)
        .map(|id| {
            // Frames registered up front; re-registered below from the layout.
            overlay.set_frame(id, MONITOR);
            let node = engine.attach_window(id);
            sync_frames_to_layout(engine, overlay);
            node
        })
        .collect()
}

/// Mirror every window's last layout rect into the overlay's frame table,
/// simulating an OS that applied the layout verbatim.
pub fn sync_frames_to_layout(engine: &Engine, overlay: &RecordingOverlay) {
    let tree = engine.tree();
    for node in tree.all_windows_recursive(engine.workspace().root_container()) {
        let id = tree.window_id(node).unwrap();
        if let Some(rect) = tree.node(node).last_applied_rect() {
            overlay.set_frame(id, rect);
        }
    }
}

/// Window ids of the root container's children, in child order. Containers
/// are flattened depth-first so nesting shows up as ordering.
pub fn window_ids_left_to_right(engine: &Engine) -> Vec<WindowId> {
    let tree = engine.tree();
    tree.all_windows_recursive(engine.workspace().root_container())
        .iter()
        .map(|&n| tree.window_id(n).unwrap())
        .collect()
}
