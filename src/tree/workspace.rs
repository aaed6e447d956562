//! Workspace construction: one root tiling container plus the fixed
//! OS-reserved auxiliary containers.

use super::{BindIndex, LayoutMode, NodeId, NodeKind, Orientation, OsContainerKind, Tree, Weight};

/// Handle to one workspace tree.
///
/// The workspace node is the tree root. Its children are the root tiling
/// container, four fixed OS-reserved containers, and any floating windows
/// (windows bound directly under the workspace node). A workspace persists
/// for the process lifetime once created.
#[derive(Debug, Clone, Copy)]
pub struct Workspace {
    node: NodeId,
    root_container: NodeId,
    minimized: NodeId,
    fullscreen: NodeId,
    hidden_apps: NodeId,
    popups: NodeId,
}

impl Workspace {
    /// Create a workspace tree: workspace root, an empty horizontal tiles
    /// root container, and the four OS-reserved containers.
    pub fn create(tree: &mut Tree, name: &str) -> Self {
        let node = tree.mk_node(NodeKind::Workspace {
            name: name.to_string(),
        });
        let root_container = tree.mk_node(NodeKind::Container {
            orientation: Orientation::Horizontal,
            layout: LayoutMode::Tiles,
            most_recent_child: None,
        });
        tree.bind(root_container, node, Weight::Auto, BindIndex::Append);

        let mut os = |tree: &mut Tree, kind| {
            let c = tree.mk_node(NodeKind::OsContainer(kind));
            tree.bind(c, node, Weight::Auto, BindIndex::Append);
            c
        };
        let minimized = os(tree, OsContainerKind::Minimized);
        let fullscreen = os(tree, OsContainerKind::Fullscreen);
        let hidden_apps = os(tree, OsContainerKind::HiddenApp);
        let popups = os(tree, OsContainerKind::Popup);

        log::info!("created workspace '{name}'");
        Self {
            node,
            root_container,
            minimized,
            fullscreen,
            hidden_apps,
            popups,
        }
    }

    /// The workspace root node.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The workspace's root tiling container. Always present, kept even when
    /// empty (normalization never prunes it).
    pub fn root_container(&self) -> NodeId {
        self.root_container
    }

    /// The fixed auxiliary container for an OS-managed window class.
    pub fn os_container(&self, kind: OsContainerKind) -> NodeId {
        match kind {
            OsContainerKind::Minimized => self.minimized,
            OsContainerKind::Fullscreen => self.fullscreen,
            OsContainerKind::HiddenApp => self.hidden_apps,
            OsContainerKind::Popup => self.popups,
        }
    }

    /// A window bound directly under the workspace node is floating.
    pub fn is_floating(&self, tree: &Tree, window: NodeId) -> bool {
        tree.parent(window) == Some(self.node)
    }

    /// Kind of the OS-reserved container `id` belongs to, walking the node
    /// itself only (OS containers never nest).
    pub fn os_container_kind(tree: &Tree, id: NodeId) -> Option<OsContainerKind> {
        match tree.node(id).kind() {
            NodeKind::OsContainer(kind) => Some(*kind),
            _ => None,
        }
    }
}
