//! `BorderSync` — idempotent border state tracking.

use super::{BorderKind, OverlayBoundary, TargetState};
use crate::error::{OpResult, Reject};
use crate::geometry::Rect;
use crate::tree::WindowId;
use std::collections::HashSet;
use uuid::Uuid;

/// Owns the rendering boundary and the last requested border state.
///
/// `update` is idempotent: called twice with the same focused/sibling
/// rectangles it issues no further boundary calls. Disabling hides every
/// border unconditionally.
pub struct BorderSync {
    boundary: Box<dyn OverlayBoundary>,
    enabled: bool,
    last_active: Option<Rect>,
    last_inactive: Vec<Rect>,
    workspace_border_visible: bool,
    /// Live visual resources, one per empty-split id. Release is idempotent;
    /// a resource is released on explicit hide or on node destruction, never
    /// both.
    empty_split_visuals: HashSet<Uuid>,
    /// Bumped on every update; supersedes any scheduled default border.
    generation: u64,
    scheduled_generation: Option<u64>,
}

impl BorderSync {
    pub fn new(boundary: Box<dyn OverlayBoundary>) -> Self {
        Self {
            boundary,
            enabled: true,
            last_active: None,
            last_inactive: Vec::new(),
            workspace_border_visible: false,
            empty_split_visuals: HashSet::new(),
            generation: 0,
            scheduled_generation: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current frame of a real window via the boundary. `None` means the
    /// window no longer exists and its contribution is skipped.
    pub fn query_frame(&self, window_id: WindowId) -> Option<Rect> {
        self.boundary.query_frame(window_id)
    }

    /// Monitor rect of the workspace, for orientation auto-selection.
    pub fn monitor_rect(&self) -> Rect {
        self.boundary.monitor_rect()
    }

    /// Enable or disable the whole border feature.
    ///
    /// Requesting the state that already holds is a no-op convergence:
    /// reported as `Ok` unless the caller opted into `fail_if_noop`.
    pub fn set_enabled(&mut self, target: TargetState, fail_if_noop: bool) -> OpResult {
        let new = match target {
            TargetState::On => true,
            TargetState::Off => false,
            TargetState::Toggle => !self.enabled,
        };
        if new == self.enabled {
            let msg = if new {
                "already enabled"
            } else {
                "already disabled"
            };
            log::info!("set_enabled: {msg}");
            return if fail_if_noop {
                Err(Reject::AlreadyInState(msg))
            } else {
                Ok(())
            };
        }
        self.enabled = new;
        if !new {
            self.boundary.hide_all();
            self.last_active = None;
            self.last_inactive.clear();
            self.workspace_border_visible = false;
        }
        log::info!("border feature {}", if new { "enabled" } else { "disabled" });
        Ok(())
    }

    /// Synchronize borders to the current focus state.
    ///
    /// `focused` is the rectangle of the focused window or empty split;
    /// `None` means no focusable node exists and the whole-workspace border
    /// is shown instead. `siblings` are the rectangles of the focused
    /// region's siblings (windows and empty splits); an empty set hides all
    /// inactive borders.
    pub fn update(&mut self, focused: Option<Rect>, siblings: &[Rect]) {
        self.generation += 1;
        if !self.enabled {
            return;
        }
        match focused {
            Some(rect) => {
                if self.workspace_border_visible {
                    self.boundary.hide_border(BorderKind::Workspace);
                    self.workspace_border_visible = false;
                }
                if self.last_active == Some(rect) && self.last_inactive == siblings {
                    return;
                }
                if self.last_active != Some(rect) {
                    self.boundary.show_border(BorderKind::Active, rect);
                    self.last_active = Some(rect);
                }
                if self.last_inactive != siblings {
                    if !self.last_inactive.is_empty() {
                        self.boundary.hide_border(BorderKind::Inactive);
                    }
                    for &s in siblings {
                        self.boundary.show_border(BorderKind::Inactive, s);
                    }
                    self.last_inactive = siblings.to_vec();
                }
            }
            None => {
                if self.last_active.is_some() {
                    self.boundary.hide_border(BorderKind::Active);
                    self.last_active = None;
                }
                if !self.last_inactive.is_empty() {
                    self.boundary.hide_border(BorderKind::Inactive);
                    self.last_inactive.clear();
                }
                if !self.workspace_border_visible {
                    let rect = self.boundary.monitor_rect();
                    self.boundary.show_border(BorderKind::Workspace, rect);
                    self.workspace_border_visible = true;
                }
            }
        }
    }

    // =======================================================================
    // Empty-split visual resources
    // =======================================================================

    /// Ensure a visual resource exists for `id`. Keyed by the empty split's
    /// stable id, one handle per id.
    pub fn ensure_empty_split_visual(&mut self, id: Uuid) {
        if self.empty_split_visuals.insert(id) {
            log::debug!("created empty-split visual {id}");
        }
    }

    /// Release the visual resource for `id`. Idempotent: returns true only
    /// for the call that actually released it.
    pub fn release_empty_split_visual(&mut self, id: Uuid) -> bool {
        let released = self.empty_split_visuals.remove(&id);
        if released {
            log::debug!("released empty-split visual {id}");
        }
        released
    }

    /// True while a visual resource is live for `id`.
    pub fn has_empty_split_visual(&self, id: Uuid) -> bool {
        self.empty_split_visuals.contains(&id)
    }

    // =======================================================================
    // Scheduled default border
    // =======================================================================

    /// Schedule a one-shot "show the whole-workspace border" action. Any
    /// intervening `update` supersedes it (last-writer-wins). The embedder
    /// fires `run_scheduled` when its delay elapses.
    pub fn schedule_default_border(&mut self) {
        self.scheduled_generation = Some(self.generation);
    }

    /// Fire the scheduled default border if nothing superseded it. Returns
    /// whether the workspace border was shown.
    pub fn run_scheduled(&mut self) -> bool {
        let Some(scheduled) = self.scheduled_generation.take() else {
            return false;
        };
        if scheduled != self.generation || !self.enabled {
            return false;
        }
        self.update(None, &[]);
        true
    }
}
