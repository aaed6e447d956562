//! Engine-level border synchronization tests: active/inactive border
//! derivation from the tree, real-frame queries with miss-skipping, the
//! whole-workspace fallback border, and the enable/disable surface.

mod common;

use common::{attach_windows, engine_with_overlay, MONITOR};
use tiletree::{BorderKind, OverlayCall, Rect, Reject, TargetState};

#[test]
fn test_single_window_gets_active_border_only() {
    let (mut engine, overlay) = engine_with_overlay();
    overlay.clear_calls();
    attach_windows(&mut engine, &overlay, 1);
    engine.focus_node(engine.focused().unwrap());

    let shows: Vec<_> = overlay
        .calls()
        .into_iter()
        .filter(|c| matches!(c, OverlayCall::Show(..)))
        .collect();
    assert!(
        shows
            .iter()
            .all(|c| matches!(c, OverlayCall::Show(BorderKind::Active, _)))
    );
    assert!(!shows.is_empty());
}

#[test]
fn test_siblings_get_inactive_borders() {
    let (mut engine, overlay) = engine_with_overlay();
    let nodes = attach_windows(&mut engine, &overlay, 2);
    overlay.clear_calls();
    engine.focus_node(nodes[0]);

    let calls = overlay.calls();
    let left = Rect::new(0.0, 0.0, 960.0, 1080.0);
    let right = Rect::new(960.0, 0.0, 960.0, 1080.0);
    assert!(calls.contains(&OverlayCall::Show(BorderKind::Active, left)));
    assert!(calls.contains(&OverlayCall::Show(BorderKind::Inactive, right)));
}

#[test]
fn test_refocusing_same_window_issues_no_calls() {
    let (mut engine, overlay) = engine_with_overlay();
    let nodes = attach_windows(&mut engine, &overlay, 2);
    engine.focus_node(nodes[0]);
    let baseline = overlay.call_count();
    engine.focus_node(nodes[0]);
    assert_eq!(overlay.call_count(), baseline);
}

#[test]
fn test_closed_sibling_is_skipped_not_guessed() {
    let (mut engine, overlay) = engine_with_overlay();
    let nodes = attach_windows(&mut engine, &overlay, 2);
    engine.focus_node(nodes[0]);
    // Window 2 closes behind the engine's back: its frame query now misses.
    overlay.remove_frame(2);
    overlay.clear_calls();
    engine.focus_node(nodes[0]);

    // The stale sibling is dropped from the inactive set, never redrawn from
    // a cached rect.
    assert_eq!(overlay.calls(), vec![OverlayCall::Hide(BorderKind::Inactive)]);
}

#[test]
fn test_no_focusable_node_shows_workspace_border() {
    let (mut engine, overlay) = engine_with_overlay();
    let nodes = attach_windows(&mut engine, &overlay, 1);
    overlay.clear_calls();
    engine.detach_window(nodes[0]);
    assert!(
        overlay
            .calls()
            .contains(&OverlayCall::Show(BorderKind::Workspace, MONITOR))
    );
}

#[test]
fn test_placeholder_focus_draws_its_layout_rect() {
    let (mut engine, overlay) = engine_with_overlay();
    attach_windows(&mut engine, &overlay, 1);
    let root = engine.workspace().root_container();
    overlay.clear_calls();
    let es = engine
        .create_empty_split(root, tiletree::BindIndex::Append)
        .unwrap();

    // The placeholder has no OS window: its border comes from the layout.
    let rect = engine.tree().node(es).last_applied_rect().unwrap();
    assert!(
        overlay
            .calls()
            .contains(&OverlayCall::Show(BorderKind::Active, rect))
    );
}

#[test]
fn test_placeholder_visual_released_after_fulfilment() {
    let (mut engine, overlay) = engine_with_overlay();
    let root = engine.workspace().root_container();
    let es = engine
        .create_empty_split(root, tiletree::BindIndex::Append)
        .unwrap();
    let id = engine.tree().empty_split_id(es).unwrap();
    assert!(engine.border().has_empty_split_visual(id));

    overlay.set_frame(1, MONITOR);
    engine.attach_window(1);
    assert!(!engine.border().has_empty_split_visual(id));
}

// ============================================================================
// Enable / disable
// ============================================================================

#[test]
fn test_disable_hides_all_and_enable_refreshes() {
    let (mut engine, overlay) = engine_with_overlay();
    let nodes = attach_windows(&mut engine, &overlay, 2);
    engine.focus_node(nodes[0]);

    overlay.clear_calls();
    engine.set_border_enabled(TargetState::Off, false).unwrap();
    assert_eq!(overlay.calls(), vec![OverlayCall::HideAll]);

    // Mutations while disabled issue no overlay calls.
    engine.focus_node(nodes[1]);
    assert_eq!(overlay.calls(), vec![OverlayCall::HideAll]);

    // Re-enabling redraws from the current focus state.
    overlay.clear_calls();
    engine.set_border_enabled(TargetState::On, false).unwrap();
    assert!(
        overlay
            .calls()
            .iter()
            .any(|c| matches!(c, OverlayCall::Show(BorderKind::Active, _)))
    );
}

#[test]
fn test_enable_when_already_enabled_is_noop_convergence() {
    let (mut engine, _overlay) = engine_with_overlay();
    assert!(engine.set_border_enabled(TargetState::On, false).is_ok());
    let err = engine
        .set_border_enabled(TargetState::On, true)
        .unwrap_err();
    assert!(matches!(err, Reject::AlreadyInState(_)));
    assert!(err.is_noop());
}

// ============================================================================
// Scheduled default border
// ============================================================================

#[test]
fn test_scheduled_border_fires_on_quiet_startup() {
    let (mut engine, overlay) = engine_with_overlay();
    engine.schedule_default_border();
    overlay.clear_calls();
    assert!(engine.run_scheduled_border());
    assert!(
        overlay
            .calls()
            .contains(&OverlayCall::Show(BorderKind::Workspace, MONITOR))
    );
}

#[test]
fn test_scheduled_border_superseded_by_focus_event() {
    let (mut engine, overlay) = engine_with_overlay();
    engine.schedule_default_border();
    // A window arrives before the delay elapses: the attach's border sync
    // supersedes the scheduled show (last writer wins).
    attach_windows(&mut engine, &overlay, 1);
    overlay.clear_calls();
    assert!(!engine.run_scheduled_border());
    assert_eq!(overlay.call_count(), 0);
}
