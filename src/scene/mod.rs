//! Scene assembly: graph, nodes, ground, particles, and the composer.

pub mod composer;
pub mod fireflies;
pub mod flora;
pub mod graph;
pub mod hill;
pub mod node;

pub use composer::{PresentationMode, TreeScene};
pub use fireflies::{FireflyInstance, FireflySystem, FIREFLY_COUNT};
pub use graph::{FlatLight, FlatMesh, FlattenedScene, SceneGraph};
pub use node::{
    LayerId, Light, LocalTransform, Material, NodeContent, SceneNode, SceneNodeId,
};
