//! Manual tiling tree engine with empty-split placeholders and focus border
//! synchronization.
//!
//! The crate is the core of a tiling-window-manager extension: a mutable,
//! typed tree of workspace → container → {container | window | empty-split},
//! the structural operations that move, split, swap, and re-parent nodes
//! while preserving tree invariants, and an idempotent border layer that
//! keeps an overlay renderer in sync with focus and split state.
//!
//! Platform pieces (overlay drawing, accessibility window control, command
//! parsing) are external collaborators behind the [`border::OverlayBoundary`]
//! trait.
//!
//! # Threading
//!
//! The engine is single-threaded cooperative: all mutation and border sync
//! run on the thread that constructed the [`engine::Engine`]. Access from any
//! other thread is a fault, not a recoverable error.

/// Crate version, for embedders that surface it in diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod border;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod tree;

pub use border::{BorderKind, BorderSync, OverlayBoundary, OverlayCall, RecordingOverlay, TargetState};
pub use engine::Engine;
pub use error::{OpResult, Reject};
pub use geometry::{Point, Rect, Size};
pub use tree::{
    BindData, BindIndex, Direction, FrozenNode, LayoutMode, NodeId, NodeKind, Orientation,
    OsContainerKind, SnapshotError, SplitArg, Tree, Weight, WindowId, Workspace,
};
