//! Directional move: sibling swap, deep-move-in, empty-split swallow, and
//! move-out to an outer container.

use super::Engine;
use crate::error::{OpResult, Reject};
use crate::tree::{BindIndex, Direction, NodeId, NodeKind, Weight};

impl Engine {
    /// Move the focused window one step in a cardinal direction.
    ///
    /// Inside a container oriented along `direction` with a sibling at the
    /// target index: a window sibling swaps positions, a container sibling is
    /// entered with deep-move-in, an empty split is swallowed. Otherwise the
    /// window moves out to the nearest ancestor container along `direction`.
    pub fn move_window(&mut self, direction: Direction) -> OpResult {
        self.assert_owner_thread();
        let window = self.focused_window().ok_or(Reject::NoWindowFocused)?;
        let parent = self
            .tree
            .parent(window)
            .unwrap_or_else(|| panic!("move: focused window is detached"));

        match self.tree.node(parent).kind().clone() {
            NodeKind::Container { orientation, .. } => {
                let own_index = self.tree.own_index(window);
                let target_index = own_index as isize + direction.offset();
                let in_range =
                    target_index >= 0 && (target_index as usize) < self.tree.children(parent).len();
                if orientation == direction.orientation() && in_range {
                    let sibling = self.tree.children(parent)[target_index as usize];
                    match self.tree.node(sibling).kind().clone() {
                        NodeKind::Container { .. } => {
                            self.deep_move_in(window, sibling, direction);
                        }
                        NodeKind::Window { .. } => {
                            self.swap_siblings(parent, window, sibling);
                        }
                        NodeKind::EmptySplit { .. } => {
                            self.tree.unbind(window);
                            self.replace_empty_split_internal(sibling, window);
                        }
                        k @ (NodeKind::Workspace { .. } | NodeKind::OsContainer(_)) => {
                            panic!("move: {} node inside a tiling container", k.variant_name())
                        }
                    }
                } else {
                    self.move_out(window, direction)?;
                }
            }
            NodeKind::Workspace { .. } => return Err(Reject::MoveFloating),
            NodeKind::OsContainer(kind) => return Err(Reject::OsReserved(kind)),
            k @ (NodeKind::Window { .. } | NodeKind::EmptySplit { .. }) => {
                panic!("move: window parented by a {} leaf", k.variant_name())
            }
        }

        log::debug!("moved focused window {direction}");
        self.tree.mark_as_most_recent_child(window);
        self.finish_mutation();
        Ok(())
    }

    /// Exchange two window children of `parent`, weights and indices both.
    fn swap_siblings(&mut self, parent: NodeId, current: NodeId, target: NodeId) {
        let current_data = self.tree.unbind(current);
        let target_data = self.tree.unbind(target);
        self.tree.bind(
            current,
            parent,
            target_data.weight,
            BindIndex::At(target_data.index),
        );
        self.tree.bind(
            target,
            parent,
            current_data.weight,
            BindIndex::At(current_data.index),
        );
    }

    /// Descend into the sibling container along the move axis until hitting a
    /// window, an empty split that swallows the moving window, or a container
    /// matching the axis, and bind the window there.
    fn deep_move_in(&mut self, window: NodeId, into: NodeId, direction: Direction) {
        let deep = self.find_deep_move_in_target(into, direction);
        match self.tree.node(deep).kind().clone() {
            NodeKind::Container { .. } => {
                self.tree.unbind(window);
                self.tree.bind(window, deep, Weight::Auto, BindIndex::At(0));
            }
            NodeKind::Window { .. } => {
                let deep_parent = self
                    .tree
                    .parent(deep)
                    .unwrap_or_else(|| panic!("deep-move-in: landing window is detached"));
                let index = self.tree.own_index(deep) + 1;
                self.tree.unbind(window);
                self.tree
                    .bind(window, deep_parent, Weight::Auto, BindIndex::At(index));
            }
            NodeKind::EmptySplit { .. } => {
                self.tree.unbind(window);
                self.replace_empty_split_internal(deep, window);
            }
            k @ (NodeKind::Workspace { .. } | NodeKind::OsContainer(_)) => {
                panic!("deep-move-in: {} landing node", k.variant_name())
            }
        }
    }

    /// Innermost valid landing node inside `node` for a move along
    /// `direction`'s axis: a leaf, or the first container matching the axis.
    /// Descends through the most recent child of cross-axis containers.
    fn find_deep_move_in_target(&self, node: NodeId, direction: Direction) -> NodeId {
        match self.tree.node(node).kind() {
            NodeKind::Window { .. } | NodeKind::EmptySplit { .. } => node,
            NodeKind::Container { orientation, .. } => {
                if *orientation == direction.orientation() {
                    return node;
                }
                let next = self
                    .tree
                    .most_recent_child(node)
                    .or_else(|| self.tree.children(node).first().copied())
                    .unwrap_or_else(|| {
                        panic!("deep-move-in: empty containers must be detached by normalization")
                    });
                self.find_deep_move_in_target(next, direction)
            }
            k @ (NodeKind::Workspace { .. } | NodeKind::OsContainer(_)) => {
                panic!("deep-move-in: {} inside a tiling container", k.variant_name())
            }
        }
    }

    /// Walk ancestors outward to the first one whose own parent is a
    /// container oriented along `direction`, and rebind the window as that
    /// ancestor's sibling (before or after it depending on direction sign).
    fn move_out(&mut self, window: NodeId, direction: Direction) -> OpResult {
        let mut child = self
            .tree
            .parent(window)
            .unwrap_or_else(|| panic!("move-out: window is detached"));
        let (bind_to, index) = loop {
            let Some(parent) = self.tree.parent(child) else {
                return Err(Reject::MoveOutBoundary(direction));
            };
            match self.tree.node(parent).kind() {
                NodeKind::Container { orientation, .. }
                    if *orientation == direction.orientation() =>
                {
                    let offset = if direction.is_positive() { 1 } else { 0 };
                    break (parent, self.tree.own_index(child) + offset);
                }
                NodeKind::Container { .. } => child = parent,
                NodeKind::Workspace { .. } | NodeKind::OsContainer(_) => {
                    return Err(Reject::MoveOutBoundary(direction));
                }
                k @ (NodeKind::Window { .. } | NodeKind::EmptySplit { .. }) => {
                    panic!("move-out: container parented by a {} leaf", k.variant_name())
                }
            }
        };
        self.tree.unbind(window);
        self.tree
            .bind(window, bind_to, Weight::Auto, BindIndex::At(index));
        Ok(())
    }
}
