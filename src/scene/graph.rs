//! Scene graph: CPU-side hierarchy of nodes.
//!
//! The graph organizes meshes, lights, and groups with parent/child
//! relationships. Each frame, `flatten()` walks the tree, propagates world
//! transforms, and produces flat draw and light lists for the consuming
//! rendering surface.

use std::collections::HashMap;
use std::sync::Arc;

use glam::{Mat4, Vec3};

use crate::geometry::Mesh;

use super::node::{
    LayerId, Light, LocalTransform, Material, NodeContent, SceneNode, SceneNodeId,
};

/// One drawable entry after flattening.
#[derive(Clone, Debug)]
pub struct FlatMesh {
    pub mesh: Arc<Mesh>,
    pub material: Material,
    pub world_transform: Mat4,
    pub layer: LayerId,
}

/// One light after flattening, with its world position resolved.
#[derive(Clone, Copy, Debug)]
pub struct FlatLight {
    pub light: Light,
    pub world_position: Vec3,
}

/// Flattened scene: everything the rendering surface needs for one frame.
#[derive(Clone, Debug, Default)]
pub struct FlattenedScene {
    pub meshes: Vec<FlatMesh>,
    pub lights: Vec<FlatLight>,
}

impl FlattenedScene {
    /// Total triangles across all draw entries.
    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.mesh.triangle_count()).sum()
    }
}

/// CPU-side scene graph.
pub struct SceneGraph {
    nodes: HashMap<SceneNodeId, SceneNode>,
    root: SceneNodeId,
    next_id: u64,
    dirty: bool,
}

impl SceneGraph {
    /// Create a new scene graph with a root Group node.
    pub fn new() -> Self {
        let root_id = SceneNodeId(0);
        let root_node = SceneNode::new(root_id, "root", LayerId::Ground, NodeContent::Group);

        let mut nodes = HashMap::new();
        nodes.insert(root_id, root_node);

        Self {
            nodes,
            root: root_id,
            next_id: 1,
            dirty: true,
        }
    }

    /// Get the root node ID.
    pub fn root(&self) -> SceneNodeId {
        self.root
    }

    /// Allocate a fresh node ID.
    fn alloc_id(&mut self) -> SceneNodeId {
        let id = SceneNodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a child node under `parent`. Returns the new node's ID.
    pub fn add_child(
        &mut self,
        parent: SceneNodeId,
        name: impl Into<String>,
        layer: LayerId,
        content: NodeContent,
    ) -> SceneNodeId {
        let id = self.alloc_id();
        let mut node = SceneNode::new(id, name, layer, content);
        node.parent = Some(parent);

        self.nodes.insert(id, node);

        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.push(id);
        }

        self.dirty = true;
        id
    }

    /// Remove a node and its entire subtree. Cannot remove the root.
    pub fn remove(&mut self, id: SceneNodeId) {
        if id == self.root {
            return;
        }

        // Collect subtree IDs (BFS)
        let mut to_remove = vec![id];
        let mut i = 0;
        while i < to_remove.len() {
            let current = to_remove[i];
            if let Some(node) = self.nodes.get(&current) {
                to_remove.extend_from_slice(&node.children);
            }
            i += 1;
        }

        // Detach from parent
        if let Some(node) = self.nodes.get(&id) {
            if let Some(parent_id) = node.parent {
                if let Some(parent) = self.nodes.get_mut(&parent_id) {
                    parent.children.retain(|c| *c != id);
                }
            }
        }

        for nid in to_remove {
            self.nodes.remove(&nid);
        }

        self.dirty = true;
    }

    /// Set the local transform of a node.
    pub fn set_transform(&mut self, id: SceneNodeId, transform: LocalTransform) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.local_transform = transform;
            self.dirty = true;
        }
    }

    /// Set the visibility of a node.
    pub fn set_visible(&mut self, id: SceneNodeId, visible: bool) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.visible = visible;
            self.dirty = true;
        }
    }

    /// Get an immutable reference to a node.
    pub fn get(&self, id: SceneNodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    /// Get a mutable reference to a node.
    pub fn get_mut(&mut self, id: SceneNodeId) -> Option<&mut SceneNode> {
        self.dirty = true;
        self.nodes.get_mut(&id)
    }

    /// Iterate over the children of a node.
    pub fn children(&self, id: SceneNodeId) -> impl Iterator<Item = SceneNodeId> + '_ {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .copied()
    }

    /// All node IDs in a layer, in insertion (ID) order.
    ///
    /// Insertion order is what keeps per-node animation phases stable
    /// between frames and runs.
    pub fn nodes_in_layer(&self, layer: LayerId) -> Vec<SceneNodeId> {
        let mut ids: Vec<SceneNodeId> = self
            .nodes
            .values()
            .filter(|n| n.layer == layer)
            .map(|n| n.id)
            .collect();
        ids.sort_by_key(|id| id.0);
        ids
    }

    /// Total number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Walk the tree, propagate transforms, and collect visible meshes and
    /// lights.
    pub fn flatten(&mut self) -> FlattenedScene {
        self.propagate_transforms(self.root, Mat4::IDENTITY);

        let mut out = FlattenedScene::default();
        self.collect_visible(self.root, &mut out);
        self.dirty = false;
        out
    }

    /// Recursively propagate world transforms.
    fn propagate_transforms(&mut self, node_id: SceneNodeId, parent_world: Mat4) {
        let (local_mat, children) = {
            let node = match self.nodes.get(&node_id) {
                Some(n) => n,
                None => return,
            };
            (node.local_transform.to_mat4(), node.children.clone())
        };

        let world = parent_world * local_mat;

        if let Some(node) = self.nodes.get_mut(&node_id) {
            node.world_transform = world;
        }

        for child_id in children {
            self.propagate_transforms(child_id, world);
        }
    }

    /// Recursively collect visible meshes and lights.
    fn collect_visible(&self, node_id: SceneNodeId, out: &mut FlattenedScene) {
        let node = match self.nodes.get(&node_id) {
            Some(n) => n,
            None => return,
        };

        if !node.visible {
            return;
        }

        match &node.content {
            NodeContent::Group => {}
            NodeContent::Mesh { mesh, material } => {
                out.meshes.push(FlatMesh {
                    mesh: mesh.clone(),
                    material: *material,
                    world_transform: node.world_transform,
                    layer: node.layer,
                });
            }
            NodeContent::Light(light) => {
                out.lights.push(FlatLight {
                    light: *light,
                    world_position: node.world_transform.transform_point3(Vec3::ZERO),
                });
            }
        }

        for &child_id in &node.children {
            self.collect_visible(child_id, out);
        }
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
