//! Node variants and the small shared enums of the tiling tree.
//!
//! The node family is a closed sum type (`NodeKind`) with exhaustive matching
//! at every operation site, so "operation not supported for this variant" is a
//! compile-time-checked case.

use crate::geometry::{Rect, Size};
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use std::fmt;
use uuid::Uuid;

new_key_type! {
    /// Arena key identifying a node. Stable for the node's lifetime; reuse of
    /// a freed slot yields a distinct key (generational).
    pub struct NodeId;
}

/// Platform window handle.
pub type WindowId = u32;

/// Axis along which a container arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Children are laid out left-to-right
    Horizontal,
    /// Children are laid out top-to-bottom
    Vertical,
}

impl Orientation {
    pub fn opposite(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// Layout mode of a tiling container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Children share the container rect along the orientation axis
    Tiles,
    /// Children are stacked; the most recent child is the visible one
    Accordion,
}

/// Cardinal direction of a `move` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Down,
    Up,
    Right,
}

impl Direction {
    /// The container orientation this direction travels along.
    pub fn orientation(self) -> Orientation {
        match self {
            Direction::Left | Direction::Right => Orientation::Horizontal,
            Direction::Up | Direction::Down => Orientation::Vertical,
        }
    }

    /// True for directions that increase the child index.
    pub fn is_positive(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }

    /// Sibling index offset: +1 or -1.
    pub fn offset(self) -> isize {
        if self.is_positive() { 1 } else { -1 }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Left => "left",
            Direction::Down => "down",
            Direction::Up => "up",
            Direction::Right => "right",
        };
        f.write_str(s)
    }
}

/// Orientation argument accepted by `split`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitArg {
    Horizontal,
    Vertical,
    /// Flip relative to the parent container's current orientation
    Opposite,
}

impl SplitArg {
    /// Resolve against the parent container's orientation.
    pub fn resolve(self, parent: Orientation) -> Orientation {
        match self {
            SplitArg::Horizontal => Orientation::Horizontal,
            SplitArg::Vertical => Orientation::Vertical,
            SplitArg::Opposite => parent.opposite(),
        }
    }
}

/// The OS-managed window classes that get fixed auxiliary containers per
/// workspace. Opaque to the mutation engine: operations targeting them are
/// rejected, not attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsContainerKind {
    Minimized,
    Fullscreen,
    HiddenApp,
    Popup,
}

impl fmt::Display for OsContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OsContainerKind::Minimized => "minimized",
            OsContainerKind::Fullscreen => "fullscreen",
            OsContainerKind::HiddenApp => "hidden-app",
            OsContainerKind::Popup => "popup",
        };
        f.write_str(s)
    }
}

/// A child's proportional share of its parent's main-axis space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Weight {
    /// Recalculated to an equal share on layout
    Auto,
    Fixed(f64),
}

impl Weight {
    /// Resolve to a concrete share. `Auto` resolves to 1.0 (equal share
    /// before normalization).
    pub fn resolve(self) -> f64 {
        match self {
            Weight::Auto => 1.0,
            Weight::Fixed(w) => w,
        }
    }
}

/// Where to insert a node in its new parent's child list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindIndex {
    /// Append after the current last child
    Append,
    At(usize),
}

/// Prior placement returned by `unbind`, reusable for a later `bind`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BindData {
    pub weight: Weight,
    pub index: usize,
}

/// Closed set of node variants.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// A real application window
    Window {
        window_id: WindowId,
        /// Geometry retained across tiling/floating transitions
        last_floating_size: Option<Size>,
    },
    /// Placeholder leaf reserving layout space for a future window
    EmptySplit {
        id: Uuid,
        /// Placeholder size hint when floating
        last_floating_size: Option<Size>,
    },
    /// Lays out its ordered children along one axis
    Container {
        orientation: Orientation,
        layout: LayoutMode,
        /// Weak focus-restoration reference, never ownership
        most_recent_child: Option<NodeId>,
    },
    /// Root of one tree. Windows bound directly under it are floating.
    Workspace { name: String },
    /// Fixed auxiliary container for an OS-managed window class
    OsContainer(OsContainerKind),
}

impl NodeKind {
    /// Short variant name for fault messages
    pub fn variant_name(&self) -> &'static str {
        match self {
            NodeKind::Window { .. } => "window",
            NodeKind::EmptySplit { .. } => "empty-split",
            NodeKind::Container { .. } => "container",
            NodeKind::Workspace { .. } => "workspace",
            NodeKind::OsContainer(_) => "os-container",
        }
    }
}

/// Per-node arena record. The parent back-reference is weak (a key); the
/// parent's `children` list is the owning side. The two are kept mutually
/// consistent by `Tree::bind`/`Tree::unbind`.
#[derive(Debug)]
pub struct NodeData {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) weight: Weight,
    /// Result of the last layout pass, read by the border sync layer
    pub(crate) last_applied_rect: Option<Rect>,
    pub(crate) kind: NodeKind,
}

impl NodeData {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            weight: Weight::Auto,
            last_applied_rect: None,
            kind,
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn last_applied_rect(&self) -> Option<Rect> {
        self.last_applied_rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_axis_and_sign() {
        assert_eq!(Direction::Left.orientation(), Orientation::Horizontal);
        assert_eq!(Direction::Down.orientation(), Orientation::Vertical);
        assert!(Direction::Right.is_positive());
        assert!(!Direction::Up.is_positive());
        assert_eq!(Direction::Left.offset(), -1);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
    }

    #[test]
    fn test_split_arg_resolution() {
        assert_eq!(
            SplitArg::Opposite.resolve(Orientation::Horizontal),
            Orientation::Vertical
        );
        assert_eq!(
            SplitArg::Vertical.resolve(Orientation::Vertical),
            Orientation::Vertical
        );
    }

    #[test]
    fn test_weight_resolution() {
        assert_eq!(Weight::Auto.resolve(), 1.0);
        assert_eq!(Weight::Fixed(2.5).resolve(), 2.5);
    }
}
