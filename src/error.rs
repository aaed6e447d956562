//! Typed rejection taxonomy for the tree mutation engine.
//!
//! This module provides structured error types so callers at the crate boundary
//! (the command layer) can match on specific rejection variants instead of
//! relying on opaque strings.
//!
//! Only *expected* outcomes live here: domain policy rejections and no-op
//! convergence. Structural invariant violations (binding an already-bound
//! node, an empty container surviving normalization, ...) are programmer
//! errors and panic instead — they must never be reported as a recoverable
//! `Reject`.

use crate::tree::{Direction, OsContainerKind};
use thiserror::Error;

/// Result alias used by all public engine operations.
///
/// No operation returns partial success: `Ok` means the tree mutated and the
/// border layer was synchronized, `Err` means nothing observable changed.
pub type OpResult<T = ()> = Result<T, Reject>;

/// A rejected operation, with a stable user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Reject {
    // -----------------------------------------------------------------------
    // Policy rejections: the target is outside the tiling model's authority
    // -----------------------------------------------------------------------
    /// The operation needs a focused window or empty split and none exists.
    #[error("no window is focused")]
    NoWindowFocused,

    /// Moving floating windows is not part of the tiling model.
    #[error("moving floating windows isn't supported")]
    MoveFloating,

    /// Splitting floating windows is not part of the tiling model.
    #[error("can't split floating windows")]
    SplitFloating,

    /// The target lives in an OS-reserved container (minimized, fullscreen,
    /// hidden-app, popup). Such containers are opaque to the mutation engine.
    #[error("windows in the OS-reserved {0} container can't be tiled")]
    OsReserved(OsContainerKind),

    /// A move-out walked through the workspace root without finding an
    /// ancestor container oriented along the requested direction.
    #[error("no ancestor container to move {0} into")]
    MoveOutBoundary(Direction),

    // -----------------------------------------------------------------------
    // No-op convergence: the requested state already holds
    // -----------------------------------------------------------------------
    /// Requested state already holds. Informational unless the caller opted
    /// into `fail_if_noop`.
    #[error("{0}")]
    AlreadyInState(&'static str),
}

impl Reject {
    /// True for no-op convergence results: the request was valid and the
    /// requested state already holds.
    pub fn is_noop(&self) -> bool {
        matches!(self, Reject::AlreadyInState(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_classification() {
        assert!(Reject::AlreadyInState("already enabled").is_noop());
        assert!(!Reject::NoWindowFocused.is_noop());
        assert!(!Reject::MoveFloating.is_noop());
    }

    #[test]
    fn test_messages_are_stable() {
        assert_eq!(Reject::NoWindowFocused.to_string(), "no window is focused");
        assert_eq!(
            Reject::MoveOutBoundary(Direction::Left).to_string(),
            "no ancestor container to move left into"
        );
    }
}
