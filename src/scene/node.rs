//! Scene graph node types
//!
//! Core types for the CPU-side scene graph: node IDs, transforms, layers,
//! materials, lights, content variants, and nodes.

use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};
use serde::Serialize;

use crate::core::color::Rgb;
use crate::geometry::Mesh;

/// Unique identifier for a scene graph node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SceneNodeId(pub u64);

/// Render layer a node belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum LayerId {
    /// Ground and terrain meshes.
    Ground,
    /// Trunk and branch tubes.
    Branch,
    /// Leaf blades.
    Foliage,
    /// Flower groups and their petal/stamen meshes.
    Flower,
    /// Ambient effects (fireflies).
    Effect,
    /// Light proxies.
    Light,
}

/// Local transform relative to the parent node.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct LocalTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
        }
    }
}

impl LocalTransform {
    /// Identity transform (no translation, rotation, or scaling).
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a translation-only transform.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a posed transform.
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            scale: 1.0,
        }
    }

    /// Convert to a 4x4 matrix.
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            self.rotation,
            self.position,
        )
    }
}

/// Surface appearance of a mesh node, in the consuming renderer's terms.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Material {
    pub color: Rgb,
    pub emissive: Rgb,
    pub emissive_intensity: f32,
    pub opacity: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub double_sided: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: [1.0; 3],
            emissive: [0.0; 3],
            emissive_intensity: 0.0,
            opacity: 1.0,
            roughness: 1.0,
            metalness: 0.0,
            double_sided: false,
        }
    }
}

impl Material {
    /// Opaque single-sided material with the given base color.
    pub fn standard(color: Rgb) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }
}

/// Light proxy. Position (for point lights) comes from the node transform.
#[derive(Clone, Copy, Debug, Serialize)]
pub enum Light {
    Ambient {
        color: Rgb,
        intensity: f32,
    },
    Directional {
        direction: Vec3,
        color: Rgb,
        intensity: f32,
    },
    Point {
        color: Rgb,
        intensity: f32,
        /// Falloff range; 0 means unlimited.
        distance: f32,
    },
}

/// What a scene node contains.
#[derive(Clone, Debug)]
pub enum NodeContent {
    /// A grouping node with no geometry of its own.
    Group,

    /// A mesh instance. Meshes are shared: every leaf clones the same
    /// `Arc`, only the transform and material differ.
    Mesh { mesh: Arc<Mesh>, material: Material },

    /// A light proxy.
    Light(Light),
}

/// A single node in the scene graph.
#[derive(Clone, Debug)]
pub struct SceneNode {
    pub id: SceneNodeId,
    pub name: String,
    pub parent: Option<SceneNodeId>,
    pub children: Vec<SceneNodeId>,
    pub local_transform: LocalTransform,
    /// Cached world transform (recomputed during propagation).
    pub world_transform: Mat4,
    pub layer: LayerId,
    pub visible: bool,
    pub content: NodeContent,
}

impl SceneNode {
    /// Create a new scene node.
    pub fn new(
        id: SceneNodeId,
        name: impl Into<String>,
        layer: LayerId,
        content: NodeContent,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            parent: None,
            children: Vec::new(),
            local_transform: LocalTransform::identity(),
            world_transform: Mat4::IDENTITY,
            layer,
            visible: true,
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_node_id_equality() {
        let a = SceneNodeId(1);
        let b = SceneNodeId(1);
        let c = SceneNodeId(2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_local_transform_identity() {
        let t = LocalTransform::identity();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Quat::IDENTITY);
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.to_mat4(), Mat4::IDENTITY);
    }

    #[test]
    fn test_local_transform_from_position() {
        let pos = Vec3::new(10.0, 5.0, -3.0);
        let t = LocalTransform::from_position(pos);
        assert_eq!(t.position, pos);
        let m = t.to_mat4();
        let (_, _, translation) = m.to_scale_rotation_translation();
        assert!((translation - pos).length() < 1e-5);
    }

    #[test]
    fn test_local_transform_to_mat4_with_scale() {
        let t = LocalTransform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quat::IDENTITY,
            scale: 2.0,
        };
        let m = t.to_mat4();
        let (scale, _, translation) = m.to_scale_rotation_translation();
        assert!((scale - Vec3::splat(2.0)).length() < 1e-5);
        assert!((translation - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-5);
    }

    #[test]
    fn test_material_standard() {
        let m = Material::standard([0.2, 0.4, 0.6]);
        assert_eq!(m.color, [0.2, 0.4, 0.6]);
        assert_eq!(m.opacity, 1.0);
        assert!(!m.double_sided);
    }

    #[test]
    fn test_scene_node_new() {
        let node = SceneNode::new(
            SceneNodeId(0),
            "root",
            LayerId::Ground,
            NodeContent::Group,
        );
        assert_eq!(node.id, SceneNodeId(0));
        assert_eq!(node.name, "root");
        assert!(node.parent.is_none());
        assert!(node.children.is_empty());
        assert!(node.visible);
        assert_eq!(node.layer, LayerId::Ground);
    }

    #[test]
    fn test_node_content_mesh() {
        let mesh = Arc::new(Mesh::new());
        let content = NodeContent::Mesh {
            mesh,
            material: Material::default(),
        };
        assert!(matches!(content, NodeContent::Mesh { .. }));
    }
}
