//! Border synchronization between the tiling tree and the overlay renderer.
//!
//! This module provides the visual layer of the engine:
//! - `OverlayBoundary`: the narrow interface to the platform overlay renderer
//! - `BorderSync`: idempotent border state tracking and update requests
//! - `RecordingOverlay`: an in-process boundary that records calls, for tests
//!   and headless use
//!
//! There is exactly one `BorderSync` per engine, constructed explicitly and
//! called directly at the end of each mutation — no process-wide singletons
//! and no broadcast notifications.

mod recording;
mod sync;

pub use recording::{OverlayCall, RecordingOverlay};
pub use sync::BorderSync;

use crate::geometry::Rect;
use crate::tree::WindowId;

/// Which border a show/hide request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderKind {
    /// Whole-workspace border: "nothing focused, act here"
    Workspace,
    /// Border around the focused region
    Active,
    /// Border around a sibling region of the focused one
    Inactive,
}

/// Requested state for `BorderSync::set_enabled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    On,
    Off,
    Toggle,
}

/// The rendering boundary consumed by the engine.
///
/// Calls are fire-and-forget from the engine's perspective; the boundary is
/// responsible for actual drawing. Calls are synchronous round-trips and must
/// not re-enter the engine.
pub trait OverlayBoundary {
    /// Request a border of `kind` around `rect`. Multiple `Inactive` borders
    /// may be live at once; `hide_border(Inactive)` clears them all.
    fn show_border(&mut self, kind: BorderKind, rect: Rect);

    /// Hide every live border of `kind`.
    fn hide_border(&mut self, kind: BorderKind);

    /// Hide every border unconditionally.
    fn hide_all(&mut self);

    /// Current frame of a real window, or `None` if the window no longer
    /// exists. A miss is a skip, never a failure.
    fn query_frame(&self, window_id: WindowId) -> Option<Rect>;

    /// Monitor rectangle of the workspace. Used for orientation
    /// auto-selection and the whole-workspace border.
    fn monitor_rect(&self) -> Rect;
}
