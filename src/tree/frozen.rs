//! Frozen snapshot: an immutable, serializable capture of a subtree for
//! layout persistence and restoration.

use super::{BindIndex, LayoutMode, NodeId, NodeKind, Orientation, Tree, Weight, WindowId};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

/// Errors from snapshot persistence.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The snapshot file could not be read or written.
    #[error("snapshot I/O failed for '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The snapshot JSON could not be serialized or parsed.
    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ordered tree capturing structural shape, orientation, layout mode, and
/// normalized weights. Weight defaults to 1.0 when there is no orientation
/// context to normalize against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FrozenNode {
    Container {
        children: Vec<FrozenNode>,
        layout: LayoutMode,
        orientation: Orientation,
        weight: f64,
    },
    Window {
        id: WindowId,
        weight: f64,
    },
    EmptySplit {
        id: Uuid,
        weight: f64,
    },
}

impl FrozenNode {
    /// Capture the subtree rooted at `node`.
    ///
    /// Faults (panics) on workspace or OS-reserved nodes: such containers
    /// must never appear inside a persisted subtree.
    pub fn freeze(tree: &Tree, node: NodeId) -> FrozenNode {
        let weight = frozen_weight(tree, node);
        match tree.node(node).kind() {
            NodeKind::Window { window_id, .. } => FrozenNode::Window {
                id: *window_id,
                weight,
            },
            NodeKind::EmptySplit { id, .. } => FrozenNode::EmptySplit { id: *id, weight },
            NodeKind::Container {
                orientation,
                layout,
                ..
            } => FrozenNode::Container {
                orientation: *orientation,
                layout: *layout,
                weight,
                children: tree
                    .children(node)
                    .iter()
                    .map(|&c| FrozenNode::freeze(tree, c))
                    .collect(),
            },
            k @ (NodeKind::Workspace { .. } | NodeKind::OsContainer(_)) => {
                panic!("freeze: unexpected {} node in subtree", k.variant_name())
            }
        }
    }

    /// Rebuild a live subtree under `into` at `index`, returning the new
    /// subtree root. Weights and child order are restored exactly; empty
    /// splits keep their persisted ids.
    pub fn thaw(&self, tree: &mut Tree, into: NodeId, index: BindIndex) -> NodeId {
        match self {
            FrozenNode::Window { id, weight } => {
                let node = tree.mk_node(NodeKind::Window {
                    window_id: *id,
                    last_floating_size: None,
                });
                tree.bind(node, into, Weight::Fixed(*weight), index);
                node
            }
            FrozenNode::EmptySplit { id, weight } => {
                let node = tree.mk_node(NodeKind::EmptySplit {
                    id: *id,
                    last_floating_size: None,
                });
                tree.bind(node, into, Weight::Fixed(*weight), index);
                node
            }
            FrozenNode::Container {
                children,
                layout,
                orientation,
                weight,
            } => {
                let node = tree.mk_node(NodeKind::Container {
                    orientation: *orientation,
                    layout: *layout,
                    most_recent_child: None,
                });
                tree.bind(node, into, Weight::Fixed(*weight), index);
                for child in children {
                    child.thaw(tree, node, BindIndex::Append);
                }
                node
            }
        }
    }

    /// Serialize to pretty JSON and write to `path`.
    pub fn save_to_path(&self, path: &Path) -> Result<(), SnapshotError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| SnapshotError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("saved layout snapshot to {}", path.display());
        Ok(())
    }

    /// Read and parse a snapshot from `path`.
    pub fn load_from_path(path: &Path) -> Result<FrozenNode, SnapshotError> {
        let json = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Normalized weight: the node's resolved share when its parent is a tiling
/// container, 1.0 otherwise (no orientation context).
fn frozen_weight(tree: &Tree, node: NodeId) -> f64 {
    match tree.parent(node) {
        Some(p) if tree.is_container(p) => tree.node(node).weight().resolve(),
        _ => 1.0,
    }
}
