//! Tree mutation engine coordinating structural operations within a workspace
//!
//! The `Engine` owns the node arena, one workspace, the focus state, and the
//! border synchronization layer:
//! - attaching and detaching windows
//! - focus transfer with most-recent-child restoration
//! - the mutation commands (move, split, notion split, empty splits) in the
//!   sibling modules
//!
//! Sub-modules:
//! - [`movement`]: directional move (swap, deep-move-in, move-out).
//! - [`split`]: split, empty-split creation, notion split, replacement.
//!
//! Every public entry point runs on the designated control thread; the engine
//! records the constructing thread and treats access from any other thread as
//! a fault. Each command is strictly mutation → re-layout → border sync, with
//! no interleaving.

mod movement;
mod split;

use crate::border::{BorderSync, OverlayBoundary, TargetState};
use crate::error::OpResult;
use crate::geometry::Rect;
use crate::tree::{
    BindIndex, FrozenNode, NodeId, NodeKind, OsContainerKind, Tree, Weight, WindowId, Workspace,
};
use std::thread::{self, ThreadId};

/// The tiling tree engine for one workspace.
pub struct Engine {
    pub(crate) tree: Tree,
    pub(crate) workspace: Workspace,
    pub(crate) border: BorderSync,
    /// Focused leaf: a window or an empty split. At most one.
    pub(crate) focused: Option<NodeId>,
    owner_thread: ThreadId,
}

impl Engine {
    /// Create an engine with a fresh workspace, bound to the calling thread.
    pub fn new(boundary: Box<dyn OverlayBoundary>, workspace_name: &str) -> Self {
        let mut tree = Tree::new();
        let workspace = Workspace::create(&mut tree, workspace_name);
        Self {
            tree,
            workspace,
            border: BorderSync::new(boundary),
            focused: None,
            owner_thread: thread::current().id(),
        }
    }

    /// Fault unless called on the thread that constructed the engine.
    pub(crate) fn assert_owner_thread(&self) {
        assert_eq!(
            thread::current().id(),
            self.owner_thread,
            "engine accessed off the control thread"
        );
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn border(&self) -> &BorderSync {
        &self.border
    }

    /// The focused window or empty split, if any.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused.filter(|&n| self.tree.contains(n))
    }

    /// The focused node when it is a window.
    pub fn focused_window(&self) -> Option<NodeId> {
        self.focused().filter(|&n| self.tree.is_window(n))
    }

    // =======================================================================
    // Window lifecycle
    // =======================================================================

    /// Attach a new tiled window. If the workspace holds an empty split, the
    /// window swallows the first one (placeholder fulfilment); otherwise it
    /// is appended to the most recent container.
    pub fn attach_window(&mut self, window_id: WindowId) -> NodeId {
        self.assert_owner_thread();
        let node = self.tree.mk_node(NodeKind::Window {
            window_id,
            last_floating_size: None,
        });
        let root = self.workspace.root_container();
        if let Some(es) = self.tree.first_empty_split_recursive(root) {
            log::debug!("window {window_id} fulfils empty split");
            self.replace_empty_split_internal(es, node);
        } else {
            let target = self.insertion_container(root);
            self.tree.bind(node, target, Weight::Auto, BindIndex::Append);
        }
        self.tree.mark_as_most_recent_child(node);
        self.focused = Some(node);
        self.finish_mutation();
        node
    }

    /// Attach a floating window (bound directly under the workspace node,
    /// outside the tiling model).
    pub fn attach_floating_window(&mut self, window_id: WindowId) -> NodeId {
        self.assert_owner_thread();
        let node = self.tree.mk_node(NodeKind::Window {
            window_id,
            last_floating_size: None,
        });
        self.tree.bind(
            node,
            self.workspace.node(),
            Weight::Auto,
            BindIndex::Append,
        );
        self.focused = Some(node);
        self.sync_borders();
        node
    }

    /// Detach and destroy a window (window closed). Focus transfers to the
    /// most recent remaining leaf. Empty-split visuals owned by destroyed
    /// subtrees are released here, never twice.
    pub fn detach_window(&mut self, node: NodeId) {
        self.assert_owner_thread();
        assert!(
            self.tree.is_window(node),
            "detach_window: node is not a window"
        );
        self.tree.unbind(node);
        self.tree.free(node);
        if self.focused == Some(node) {
            self.focused = None;
        }
        self.finish_mutation();
        if self.focused.is_none() {
            let next = self.focus_target(self.workspace.root_container());
            if let Some(next) = next {
                self.focus_node(next);
            }
        }
    }

    /// Park a window in one of the workspace's reserved OS containers
    /// (minimize, fullscreen, app hide, popup demotion). The window leaves
    /// the tiling layout; structural commands reject it until it returns.
    pub fn move_window_to_os_container(&mut self, node: NodeId, kind: OsContainerKind) {
        self.assert_owner_thread();
        assert!(
            self.tree.is_window(node),
            "move_window_to_os_container: node is not a window"
        );
        self.tree.unbind(node);
        self.tree.bind(
            node,
            self.workspace.os_container(kind),
            Weight::Auto,
            BindIndex::Append,
        );
        if self.focused == Some(node) {
            self.focused = self.focus_target(self.workspace.root_container());
        }
        log::debug!("window parked in {kind} container");
        self.finish_mutation();
    }

    /// Return a parked window to the tiling layout, as if newly attached:
    /// it fulfils the first empty split, or joins the most recent container.
    pub fn restore_window_from_os_container(&mut self, node: NodeId) {
        self.assert_owner_thread();
        let parent = self
            .tree
            .parent(node)
            .unwrap_or_else(|| panic!("restore: window is detached"));
        assert!(
            Workspace::os_container_kind(&self.tree, parent).is_some(),
            "restore: window is not parked in an os container"
        );
        self.tree.unbind(node);
        let root = self.workspace.root_container();
        if let Some(es) = self.tree.first_empty_split_recursive(root) {
            self.replace_empty_split_internal(es, node);
        } else {
            let target = self.insertion_container(root);
            self.tree.bind(node, target, Weight::Auto, BindIndex::Append);
        }
        self.tree.mark_as_most_recent_child(node);
        self.focused = Some(node);
        self.finish_mutation();
    }

    // =======================================================================
    // Focus
    // =======================================================================

    /// Focus a window or empty split: O(depth) most-recent-child updates up
    /// the ancestor chain, then a border sync.
    pub fn focus_node(&mut self, node: NodeId) {
        self.assert_owner_thread();
        assert!(
            self.tree.is_window(node) || self.tree.is_empty_split(node),
            "focus_node: only windows and empty splits are focusable"
        );
        self.tree.mark_as_most_recent_child(node);
        self.focused = Some(node);
        if let Some(id) = self.tree.empty_split_id(node) {
            self.border.ensure_empty_split_visual(id);
        }
        log::debug!("focused {} node", self.tree.node(node).kind().variant_name());
        self.sync_borders();
    }

    /// Deepest most-recently-used focusable leaf below `node`.
    pub(crate) fn focus_target(&self, node: NodeId) -> Option<NodeId> {
        if self.tree.is_window(node) || self.tree.is_empty_split(node) {
            return Some(node);
        }
        let children = self.tree.children(node);
        if children.is_empty() {
            return None;
        }
        if let Some(recent) = self.tree.most_recent_child(node)
            && let Some(target) = self.focus_target(recent)
        {
            return Some(target);
        }
        children.iter().find_map(|&c| self.focus_target(c))
    }

    /// Container that should receive the next appended window: the most
    /// recent container chain down from `root`, or `root` itself.
    fn insertion_container(&self, root: NodeId) -> NodeId {
        let mut cur = root;
        while let Some(recent) = self.tree.most_recent_child(cur) {
            if !self.tree.is_container(recent) {
                break;
            }
            cur = recent;
        }
        cur
    }

    // =======================================================================
    // Border feature toggle
    // =======================================================================

    /// Enable or disable border visualization. Enabling refreshes borders for
    /// the current focus; disabling hides everything. Requesting the current
    /// state is a no-op convergence (`fail_if_noop` opts into an error).
    pub fn set_border_enabled(&mut self, target: TargetState, fail_if_noop: bool) -> OpResult {
        self.assert_owner_thread();
        let was_enabled = self.border.is_enabled();
        self.border.set_enabled(target, fail_if_noop)?;
        if self.border.is_enabled() && !was_enabled {
            self.sync_borders();
        }
        Ok(())
    }

    /// Schedule the one-shot default whole-workspace border (shown shortly
    /// after startup unless superseded by a focus or split event).
    pub fn schedule_default_border(&mut self) {
        self.assert_owner_thread();
        self.border.schedule_default_border();
    }

    /// Fire the scheduled default border if still current.
    pub fn run_scheduled_border(&mut self) -> bool {
        self.assert_owner_thread();
        self.border.run_scheduled()
    }

    // =======================================================================
    // Snapshot
    // =======================================================================

    /// Frozen snapshot of the workspace's root tiling container.
    pub fn freeze_root(&self) -> FrozenNode {
        self.assert_owner_thread();
        FrozenNode::freeze(&self.tree, self.workspace.root_container())
    }

    // =======================================================================
    // Mutation epilogue: normalize → re-layout → border sync
    // =======================================================================

    pub(crate) fn finish_mutation(&mut self) {
        let root = self.workspace.root_container();
        self.tree.normalize(root);
        self.tree.assert_normalized(root);
        self.relayout();
        self.sync_borders();
    }

    /// Recompute rectangles for the tiling tree from the monitor rect.
    pub(crate) fn relayout(&mut self) {
        let rect = self.border.monitor_rect();
        self.tree
            .apply_layout(self.workspace.root_container(), rect);
    }

    /// Derive the focused/sibling rectangles from the current tree and push
    /// them to the border layer.
    pub(crate) fn sync_borders(&mut self) {
        let Some(node) = self.focused() else {
            self.border.update(None, &[]);
            return;
        };
        let Some(rect) = self.node_display_rect(node) else {
            self.border.update(None, &[]);
            return;
        };
        let mut sibling_rects: Vec<Rect> = Vec::new();
        if let Some(parent) = self.tree.parent(node)
            && self.tree.is_container(parent)
        {
            for &child in self.tree.children(parent) {
                if child == node {
                    continue;
                }
                if let Some(r) = self.sibling_display_rect(child) {
                    sibling_rects.push(r);
                }
            }
        }
        self.border.update(Some(rect), &sibling_rects);
    }

    /// Rect used to render the focused node's border. Windows are queried
    /// from the boundary (the real frame); a miss falls back to the last
    /// layout rect. Empty splits use the last layout rect.
    fn node_display_rect(&self, node: NodeId) -> Option<Rect> {
        if let Some(wid) = self.tree.window_id(node) {
            if let Some(rect) = self.border.query_frame(wid) {
                return Some(rect);
            }
            log::warn!("window {wid} no longer exists, falling back to layout rect");
        }
        self.tree.node(node).last_applied_rect()
    }

    /// Sibling contribution to the inactive border set. A window whose frame
    /// query misses is skipped (it closed mid-operation); container siblings
    /// contribute nothing.
    fn sibling_display_rect(&self, node: NodeId) -> Option<Rect> {
        if let Some(wid) = self.tree.window_id(node) {
            let rect = self.border.query_frame(wid);
            if rect.is_none() {
                log::warn!("window {wid} no longer exists, skipping sibling border");
            }
            return rect;
        }
        if self.tree.is_empty_split(node) {
            return self.tree.node(node).last_applied_rect();
        }
        None
    }
}
