//! Split operations: wrapping windows in new containers, empty-split
//! placeholders, notion-style workspace splits, and placeholder replacement.

use super::Engine;
use crate::error::{OpResult, Reject};
use crate::tree::{
    BindIndex, LayoutMode, NodeId, NodeKind, Orientation, SplitArg, Weight, WindowId,
};
use uuid::Uuid;

impl Engine {
    /// Split the focused window (or, with nothing focused, the workspace's
    /// first empty split) along the requested orientation.
    ///
    /// A parent with exactly one child has its orientation flipped in place —
    /// no new container. Otherwise the target is wrapped in a new
    /// single-child container inserted at its former position; splitting an
    /// empty split also creates the complement placeholder alongside it.
    pub fn split(&mut self, arg: SplitArg) -> OpResult {
        self.assert_owner_thread();
        let target = match self.focused_window() {
            Some(w) => w,
            None => {
                let root = self.workspace.root_container();
                self.tree
                    .first_empty_split_recursive(root)
                    .ok_or(Reject::NoWindowFocused)?
            }
        };
        let parent = self
            .tree
            .parent(target)
            .unwrap_or_else(|| panic!("split: target is detached"));

        match self.tree.node(parent).kind().clone() {
            NodeKind::Workspace { .. } => return Err(Reject::SplitFloating),
            NodeKind::OsContainer(kind) => return Err(Reject::OsReserved(kind)),
            NodeKind::Container { orientation, .. } => {
                let new_orientation = arg.resolve(orientation);
                if self.tree.children(parent).len() == 1 {
                    self.tree.set_orientation(parent, new_orientation);
                } else {
                    let data = self.tree.unbind(target);
                    let new_parent = self.tree.mk_node(NodeKind::Container {
                        orientation: new_orientation,
                        layout: LayoutMode::Tiles,
                        most_recent_child: None,
                    });
                    self.tree
                        .bind(new_parent, parent, data.weight, BindIndex::At(data.index));
                    self.tree
                        .bind(target, new_parent, Weight::Auto, BindIndex::At(0));
                    if self.tree.is_empty_split(target) {
                        self.insert_empty_split(new_parent, BindIndex::Append);
                    }
                }
            }
            k @ (NodeKind::Window { .. } | NodeKind::EmptySplit { .. }) => {
                panic!("split: target parented by a {} leaf", k.variant_name())
            }
        }

        log::debug!("split focused node {arg:?}");
        self.tree.mark_as_most_recent_child(target);
        self.finish_mutation();
        Ok(())
    }

    /// Insert an empty-split placeholder into `container` at `index` and
    /// focus it.
    pub fn create_empty_split(&mut self, container: NodeId, index: BindIndex) -> OpResult<NodeId> {
        self.assert_owner_thread();
        match self.tree.node(container).kind() {
            NodeKind::Container { .. } => {}
            NodeKind::OsContainer(kind) => return Err(Reject::OsReserved(*kind)),
            NodeKind::Workspace { .. } => return Err(Reject::SplitFloating),
            k @ (NodeKind::Window { .. } | NodeKind::EmptySplit { .. }) => {
                panic!("create_empty_split: {} is not a container", k.variant_name())
            }
        }
        let node = self.insert_empty_split(container, index);
        self.tree.mark_as_most_recent_child(node);
        self.focused = Some(node);
        self.finish_mutation();
        Ok(node)
    }

    /// Notebook-style complement half: a new single-placeholder container of
    /// `orientation` appended to `container`. Returns the new empty split.
    pub fn create_container_with_empty_split(
        &mut self,
        container: NodeId,
        orientation: Orientation,
    ) -> OpResult<NodeId> {
        self.assert_owner_thread();
        match self.tree.node(container).kind() {
            NodeKind::Container { .. } => {}
            NodeKind::OsContainer(kind) => return Err(Reject::OsReserved(*kind)),
            NodeKind::Workspace { .. } => return Err(Reject::SplitFloating),
            k @ (NodeKind::Window { .. } | NodeKind::EmptySplit { .. }) => {
                panic!(
                    "create_container_with_empty_split: {} is not a container",
                    k.variant_name()
                )
            }
        }
        let inner = self.tree.mk_node(NodeKind::Container {
            orientation,
            layout: LayoutMode::Tiles,
            most_recent_child: None,
        });
        self.tree
            .bind(inner, container, Weight::Auto, BindIndex::Append);
        let node = self.insert_empty_split(inner, BindIndex::Append);
        self.tree.mark_as_most_recent_child(node);
        self.focused = Some(node);
        self.finish_mutation();
        Ok(node)
    }

    /// Partition the workspace in notion style: the root container flips to
    /// `orientation` (auto-selected from the monitor aspect ratio when
    /// omitted), existing top-level windows gather into a first region, and a
    /// second region is reserved for future content. A region that would be
    /// left empty receives an empty-split placeholder; the second region
    /// becomes the most recent one.
    pub fn notion_split(&mut self, orientation: Option<Orientation>) -> OpResult {
        self.assert_owner_thread();
        let orientation = orientation.unwrap_or_else(|| {
            if self.border.monitor_rect().is_landscape() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            }
        });
        let root = self.workspace.root_container();
        self.tree.set_orientation(root, orientation);

        let windows: Vec<NodeId> = self
            .tree
            .children(root)
            .iter()
            .copied()
            .filter(|&c| self.tree.is_window(c))
            .collect();

        let mut region = |engine: &mut Engine, index| {
            let c = engine.tree.mk_node(NodeKind::Container {
                orientation: orientation.opposite(),
                layout: LayoutMode::Accordion,
                most_recent_child: None,
            });
            engine.tree.bind(c, root, Weight::Auto, index);
            c
        };
        let first = region(self, BindIndex::At(0));
        let second = region(self, BindIndex::Append);

        let half = usize::max(1, windows.len() / 2);
        for (i, window) in windows.iter().copied().enumerate() {
            let data = self.tree.unbind(window);
            let target = if i < half { first } else { second };
            self.tree
                .bind(window, target, data.weight, BindIndex::Append);
        }

        // Placeholder-as-overlay variant: a region left without content gets
        // a real empty split, so normalization never sees an empty container.
        for container in [first, second] {
            if self.tree.children(container).is_empty() {
                self.insert_empty_split(container, BindIndex::Append);
            }
        }

        self.tree.mark_as_most_recent_child(second);
        if self.focused().is_none()
            && let Some(target) = self.focus_target(second)
        {
            self.focused = Some(target);
            if let Some(id) = self.tree.empty_split_id(target) {
                self.border.ensure_empty_split_visual(id);
            }
        }

        log::info!(
            "notion split: {orientation:?} root, {} window(s) distributed",
            windows.len()
        );
        self.finish_mutation();
        Ok(())
    }

    /// Atomically replace an empty split with a new window for `window_id`,
    /// preserving the placeholder's weight and index. The placeholder is
    /// destroyed and its visual resource released exactly once; a second call
    /// on the same placeholder is a structural fault.
    pub fn replace_empty_split_with_window(
        &mut self,
        empty_split: NodeId,
        window_id: WindowId,
    ) -> NodeId {
        self.assert_owner_thread();
        let window = self.tree.mk_node(NodeKind::Window {
            window_id,
            last_floating_size: None,
        });
        self.replace_empty_split_internal(empty_split, window);
        self.tree.mark_as_most_recent_child(window);
        self.focused = Some(window);
        self.finish_mutation();
        window
    }

    /// Shared replacement step: unbind + destroy the placeholder, bind the
    /// window into its exact slot, release the visual.
    pub(crate) fn replace_empty_split_internal(&mut self, empty_split: NodeId, window: NodeId) {
        let id = self
            .tree
            .empty_split_id(empty_split)
            .unwrap_or_else(|| panic!("replace: node is not an empty split"));
        let parent = self
            .tree
            .parent(empty_split)
            .unwrap_or_else(|| panic!("replace: empty split is already detached"));
        let data = self.tree.unbind(empty_split);
        self.tree.free(empty_split);
        self.tree
            .bind(window, parent, data.weight, BindIndex::At(data.index));
        self.border.release_empty_split_visual(id);
        if self.focused == Some(empty_split) {
            self.focused = Some(window);
        }
    }

    /// Make a fresh placeholder node and bind it. Visual resource is created
    /// eagerly so the overlay can show the reserved region.
    pub(crate) fn insert_empty_split(&mut self, container: NodeId, index: BindIndex) -> NodeId {
        let id = Uuid::new_v4();
        let node = self.tree.mk_node(NodeKind::EmptySplit {
            id,
            last_floating_size: None,
        });
        self.tree.bind(node, container, Weight::Auto, index);
        self.border.ensure_empty_split_visual(id);
        log::debug!("created empty split {id}");
        node
    }
}
