//! `RecordingOverlay` — an overlay boundary that records every call.
//!
//! Used by the test suites and by headless embedders that want the border
//! protocol without a compositor.

use super::{BorderKind, OverlayBoundary};
use crate::geometry::Rect;
use crate::tree::WindowId;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// One recorded boundary call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayCall {
    Show(BorderKind, Rect),
    Hide(BorderKind),
    HideAll,
}

/// Records show/hide calls and answers frame queries from a fixed table.
///
/// Clone shares the underlying log and frame table, so a test can keep a
/// handle while the engine owns the boundary.
#[derive(Debug, Clone, Default)]
pub struct RecordingOverlay {
    calls: Rc<RefCell<Vec<OverlayCall>>>,
    frames: Rc<RefCell<HashMap<WindowId, Rect>>>,
    monitor: Rc<RefCell<Rect>>,
}

impl RecordingOverlay {
    pub fn new(monitor: Rect) -> Self {
        Self {
            calls: Rc::default(),
            frames: Rc::default(),
            monitor: Rc::new(RefCell::new(monitor)),
        }
    }

    /// Register the frame reported for `window_id` by `query_frame`.
    pub fn set_frame(&self, window_id: WindowId, rect: Rect) {
        self.frames.borrow_mut().insert(window_id, rect);
    }

    /// Forget a window, making subsequent queries miss (window closed).
    pub fn remove_frame(&self, window_id: WindowId) {
        self.frames.borrow_mut().remove(&window_id);
    }

    /// Calls recorded so far.
    pub fn calls(&self) -> Vec<OverlayCall> {
        self.calls.borrow().clone()
    }

    /// Number of calls recorded so far.
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Drop the recorded history (the frame table is kept).
    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl OverlayBoundary for RecordingOverlay {
    fn show_border(&mut self, kind: BorderKind, rect: Rect) {
        self.calls.borrow_mut().push(OverlayCall::Show(kind, rect));
    }

    fn hide_border(&mut self, kind: BorderKind) {
        self.calls.borrow_mut().push(OverlayCall::Hide(kind));
    }

    fn hide_all(&mut self) {
        self.calls.borrow_mut().push(OverlayCall::HideAll);
    }

    fn query_frame(&self, window_id: WindowId) -> Option<Rect> {
        self.frames.borrow().get(&window_id).copied()
    }

    fn monitor_rect(&self) -> Rect {
        *self.monitor.borrow()
    }
}
