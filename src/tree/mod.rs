//! The tiling tree: node storage, structural primitives, and the layout pass.
//!
//! This module provides the tree infrastructure for the mutation engine:
//! - `NodeId` / `NodeKind` / `NodeData`: arena-keyed node variants
//! - `Tree`: the arena; bind/unbind primitives and traversal
//! - `Workspace` construction helpers
//! - `FrozenNode`: immutable serializable snapshot of a subtree
//!
//! Ownership model: children live in their parent's `children` list inside the
//! arena; the `parent` field is a weak back-reference used only for upward
//! traversal. `bind` and `unbind` are the only two places that touch either
//! side, which keeps the two directions mutually consistent.

mod frozen;
mod node;
mod workspace;

pub use frozen::{FrozenNode, SnapshotError};
pub use node::{
    BindData, BindIndex, Direction, LayoutMode, NodeData, NodeId, NodeKind, Orientation,
    OsContainerKind, SplitArg, Weight, WindowId,
};
pub use workspace::Workspace;

use crate::geometry::Rect;
use slotmap::SlotMap;
use uuid::Uuid;

/// Arena owning every node of every workspace tree in the process.
///
/// All structural operations go through `bind`/`unbind`; violating a
/// structural invariant (binding a bound node, unbinding a detached node,
/// indexing past the child list) is a programmer error and panics.
#[derive(Debug, Default)]
pub struct Tree {
    nodes: SlotMap<NodeId, NodeData>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached node. It must be bound before the operation that
    /// created it completes.
    pub fn mk_node(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.insert(NodeData::new(kind))
    }

    /// Borrow a node. Panics on a stale key (freed node) — a structural fault.
    pub fn node(&self, id: NodeId) -> &NodeData {
        self.nodes
            .get(id)
            .unwrap_or_else(|| panic!("stale node key: node was already destroyed"))
    }

    fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        self.nodes
            .get_mut(id)
            .unwrap_or_else(|| panic!("stale node key: node was already destroyed"))
    }

    /// True while the key refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Position of `id` in its parent's child list. Panics for detached nodes.
    pub fn own_index(&self, id: NodeId) -> usize {
        let parent = self
            .parent(id)
            .unwrap_or_else(|| panic!("own_index: node is detached"));
        self.children(parent)
            .iter()
            .position(|&c| c == id)
            .unwrap_or_else(|| panic!("own_index: parent/child lists are inconsistent"))
    }

    /// Ancestors of `id`, nearest first, not including `id` itself.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            out.push(p);
            cur = self.parent(p);
        }
        out
    }

    // =======================================================================
    // Bind / unbind
    // =======================================================================

    /// Attach `node` as a child of `to` at `index` with `weight`.
    ///
    /// Faults (panics): `node` is already bound; `to` is a leaf variant;
    /// `index` is past the end of the child list.
    pub fn bind(&mut self, node: NodeId, to: NodeId, weight: Weight, index: BindIndex) {
        assert!(
            self.node(node).parent.is_none(),
            "bind: node is already bound to a parent"
        );
        assert!(
            !matches!(
                self.node(to).kind,
                NodeKind::Window { .. } | NodeKind::EmptySplit { .. }
            ),
            "bind: can't bind into a {} leaf",
            self.node(to).kind.variant_name()
        );
        let len = self.node(to).children.len();
        let at = match index {
            BindIndex::Append => len,
            BindIndex::At(i) => {
                assert!(i <= len, "bind: index {i} out of bounds (len {len})");
                i
            }
        };
        self.node_mut(to).children.insert(at, node);
        let data = self.node_mut(node);
        data.parent = Some(to);
        data.weight = weight;
    }

    /// Detach `node` from its parent, returning its prior placement so callers
    /// can reuse it. Never fails for a bound node; panics for a detached one.
    ///
    /// The parent's most-recent-child reference is cleared if it pointed at
    /// `node`. The parent container may be left transiently empty; callers run
    /// `normalize` before the tree is considered stable again.
    pub fn unbind(&mut self, node: NodeId) -> BindData {
        let parent = self
            .node(node)
            .parent
            .unwrap_or_else(|| panic!("unbind: node is already detached"));
        let index = self.own_index(node);
        let weight = self.node(node).weight;
        self.node_mut(parent).children.remove(index);
        if let NodeKind::Container {
            most_recent_child, ..
        } = &mut self.node_mut(parent).kind
            && *most_recent_child == Some(node)
        {
            *most_recent_child = None;
        }
        let data = self.node_mut(node);
        data.parent = None;
        data.weight = Weight::Auto;
        BindData { weight, index }
    }

    /// Free a detached node and its (detached) subtree. Panics if still bound.
    pub fn free(&mut self, node: NodeId) {
        assert!(
            self.node(node).parent.is_none(),
            "free: node is still bound"
        );
        let children = std::mem::take(&mut self.node_mut(node).children);
        for child in children {
            self.node_mut(child).parent = None;
            self.free(child);
        }
        self.nodes.remove(node);
    }

    // =======================================================================
    // Kind accessors
    // =======================================================================

    /// Orientation of a container node. Panics for non-containers.
    pub fn orientation(&self, id: NodeId) -> Orientation {
        match self.node(id).kind {
            NodeKind::Container { orientation, .. } => orientation,
            ref k => panic!("orientation: {} is not a container", k.variant_name()),
        }
    }

    pub fn set_orientation(&mut self, id: NodeId, new: Orientation) {
        match &mut self.node_mut(id).kind {
            NodeKind::Container { orientation, .. } => *orientation = new,
            k => panic!("set_orientation: {} is not a container", k.variant_name()),
        }
    }

    /// Layout mode of a container node. Panics for non-containers.
    pub fn layout_mode(&self, id: NodeId) -> LayoutMode {
        match self.node(id).kind {
            NodeKind::Container { layout, .. } => layout,
            ref k => panic!("layout_mode: {} is not a container", k.variant_name()),
        }
    }

    pub fn most_recent_child(&self, id: NodeId) -> Option<NodeId> {
        match self.node(id).kind {
            NodeKind::Container {
                most_recent_child, ..
            } => most_recent_child
                .filter(|&c| self.nodes.get(c).is_some_and(|n| n.parent == Some(id))),
            _ => None,
        }
    }

    pub fn is_window(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Window { .. })
    }

    pub fn is_empty_split(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::EmptySplit { .. })
    }

    pub fn is_container(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Container { .. })
    }

    /// Window handle of a window node.
    pub fn window_id(&self, id: NodeId) -> Option<WindowId> {
        match self.node(id).kind {
            NodeKind::Window { window_id, .. } => Some(window_id),
            _ => None,
        }
    }

    /// Empty-split id of an empty-split node.
    pub fn empty_split_id(&self, id: NodeId) -> Option<Uuid> {
        match self.node(id).kind {
            NodeKind::EmptySplit { id: uuid, .. } => Some(uuid),
            _ => None,
        }
    }

    /// Mark `node` as the most-recently-used child along the whole ancestor
    /// chain. O(depth) pointer updates, the engine's focus primitive.
    pub fn mark_as_most_recent_child(&mut self, node: NodeId) {
        let mut child = node;
        while let Some(parent) = self.parent(child) {
            if let NodeKind::Container {
                most_recent_child, ..
            } = &mut self.node_mut(parent).kind
            {
                *most_recent_child = Some(child);
            }
            child = parent;
        }
    }

    // =======================================================================
    // Search
    // =======================================================================

    /// Depth-first: the first empty split in the subtree, if any.
    pub fn first_empty_split_recursive(&self, root: NodeId) -> Option<NodeId> {
        if self.is_empty_split(root) {
            return Some(root);
        }
        self.node(root)
            .children
            .iter()
            .find_map(|&c| self.first_empty_split_recursive(c))
    }

    /// All window leaves in the subtree, depth-first order.
    pub fn all_windows_recursive(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_windows(root, &mut out);
        out
    }

    fn collect_windows(&self, node: NodeId, out: &mut Vec<NodeId>) {
        if self.is_window(node) {
            out.push(node);
        }
        for &c in &self.node(node).children {
            self.collect_windows(c, out);
        }
    }

    /// All empty splits in the subtree, depth-first order.
    pub fn all_empty_splits_recursive(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_empty_splits(root, &mut out);
        out
    }

    fn collect_empty_splits(&self, node: NodeId, out: &mut Vec<NodeId>) {
        if self.is_empty_split(node) {
            out.push(node);
        }
        for &c in &self.node(node).children {
            self.collect_empty_splits(c, out);
        }
    }

    // =======================================================================
    // Normalization
    // =======================================================================

    /// Remove structurally redundant empty containers below `root`
    /// (post-order, so emptied parents cascade). `root` itself is kept even
    /// when empty — the workspace root container is always present.
    ///
    /// Returns the freed containers' ids (already stale keys) count, for
    /// logging.
    pub fn normalize(&mut self, root: NodeId) -> usize {
        let mut pruned = 0;
        let children: Vec<NodeId> = self.node(root).children.clone();
        for child in children {
            pruned += self.normalize_rec(child);
        }
        if pruned > 0 {
            log::debug!("normalize: pruned {pruned} empty container(s)");
        }
        pruned
    }

    fn normalize_rec(&mut self, node: NodeId) -> usize {
        let mut pruned = 0;
        let children: Vec<NodeId> = self.node(node).children.clone();
        for child in children {
            pruned += self.normalize_rec(child);
        }
        if self.is_container(node) && self.node(node).children.is_empty() {
            self.unbind(node);
            self.free(node);
            pruned += 1;
        }
        pruned
    }

    /// Debug check that no empty container survived normalization.
    pub(crate) fn assert_normalized(&self, root: NodeId) {
        debug_assert!(
            self.find_empty_container(root).is_none(),
            "empty container survived normalization"
        );
    }

    fn find_empty_container(&self, node: NodeId) -> Option<NodeId> {
        for &c in &self.node(node).children {
            if self.is_container(c) && self.node(c).children.is_empty() {
                return Some(c);
            }
            if let Some(found) = self.find_empty_container(c) {
                return Some(found);
            }
        }
        None
    }

    // =======================================================================
    // Layout pass
    // =======================================================================

    /// Recompute rectangles for the subtree rooted at `node`, caching the
    /// result on every node for the border sync layer.
    ///
    /// Tiles containers divide their rect along the orientation by normalized
    /// weights; accordion containers give every child the full rect (the
    /// most-recent child is the visible one). Leaves just record their rect.
    pub fn apply_layout(&mut self, node: NodeId, rect: Rect) {
        self.node_mut(node).last_applied_rect = Some(rect);
        let kind = self.node(node).kind.clone();
        match kind {
            NodeKind::Window { .. } | NodeKind::EmptySplit { .. } => {}
            NodeKind::Container {
                orientation,
                layout: LayoutMode::Tiles,
                ..
            } => {
                let children: Vec<NodeId> = self.node(node).children.clone();
                if children.is_empty() {
                    return;
                }
                let total: f64 = children
                    .iter()
                    .map(|&c| self.node(c).weight.resolve())
                    .sum();
                let mut offset = 0.0;
                for &child in &children {
                    let share = self.node(child).weight.resolve() / total;
                    let child_rect = match orientation {
                        Orientation::Horizontal => Rect::new(
                            rect.x + offset,
                            rect.y,
                            rect.width * share,
                            rect.height,
                        ),
                        Orientation::Vertical => Rect::new(
                            rect.x,
                            rect.y + offset,
                            rect.width,
                            rect.height * share,
                        ),
                    };
                    offset += match orientation {
                        Orientation::Horizontal => child_rect.width,
                        Orientation::Vertical => child_rect.height,
                    };
                    self.apply_layout(child, child_rect);
                }
            }
            NodeKind::Container {
                layout: LayoutMode::Accordion,
                ..
            } => {
                let children: Vec<NodeId> = self.node(node).children.clone();
                for child in children {
                    self.apply_layout(child, rect);
                }
            }
            NodeKind::Workspace { .. } | NodeKind::OsContainer(_) => {
                // Workspace layout is driven from the root tiling container;
                // OS-reserved containers are opaque to the layout pass.
            }
        }
    }
}
