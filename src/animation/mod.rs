//! Per-frame foliage sway.
//!
//! Static geometry is computed once at compose time; animation only nudges
//! node rotations around their baked base orientation, so no mesh is ever
//! regenerated to animate it. Phases are keyed to each node's index in its
//! layer, which is stable across frames and runs.

use glam::Quat;

use crate::scene::{LayerId, NodeContent, SceneGraph, SceneNodeId};

/// Smoothing factor for the per-frame rotation lerp.
const SETTLE_RATE: f32 = 0.1;

#[derive(Clone, Copy, Debug)]
struct SwayTarget {
    node: SceneNodeId,
    base_rotation: Quat,
}

/// Applies wind sway to leaves and flowers each frame.
#[derive(Clone, Debug, Default)]
pub struct SwayAnimator {
    leaves: Vec<SwayTarget>,
    flowers: Vec<SwayTarget>,
}

impl SwayAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture base orientations from a freshly composed graph.
    ///
    /// Leaves are the mesh nodes of the foliage layer; flowers sway as whole
    /// groups so their petal and stamen children follow along.
    pub fn from_graph(graph: &SceneGraph) -> Self {
        let capture = |ids: Vec<SceneNodeId>, want_group: bool| {
            ids.into_iter()
                .filter_map(|id| {
                    let node = graph.get(id)?;
                    let is_group = matches!(node.content, NodeContent::Group);
                    (is_group == want_group).then(|| SwayTarget {
                        node: id,
                        base_rotation: node.local_transform.rotation,
                    })
                })
                .collect()
        };

        Self {
            leaves: capture(graph.nodes_in_layer(LayerId::Foliage), false),
            flowers: capture(graph.nodes_in_layer(LayerId::Flower), true),
        }
    }

    pub fn target_count(&self) -> usize {
        self.leaves.len() + self.flowers.len()
    }

    /// Advance the sway for `elapsed` seconds of animation time.
    pub fn apply(&self, graph: &mut SceneGraph, elapsed: f32, windy: bool) {
        for (i, target) in self.leaves.iter().enumerate() {
            let offset = i as f32 * 0.1;
            let desired = if windy {
                target.base_rotation
                    * Quat::from_rotation_x((elapsed * 2.0 + offset).sin() * 0.2)
                    * Quat::from_rotation_y((elapsed * 1.5 + offset).cos() * 0.1)
            } else {
                target.base_rotation
            };
            if let Some(node) = graph.get_mut(target.node) {
                let current = node.local_transform.rotation;
                node.local_transform.rotation = current.slerp(desired, SETTLE_RATE);
            }
        }

        for (i, target) in self.flowers.iter().enumerate() {
            let offset = i as f32 * 0.2;
            if let Some(node) = graph.get_mut(target.node) {
                if windy {
                    // Flowers track the wind directly; leaves ease into it.
                    node.local_transform.rotation = target.base_rotation
                        * Quat::from_rotation_x((elapsed * 2.0 + offset).sin() * 0.1)
                        * Quat::from_rotation_z((elapsed * 1.5 + offset).cos() * 0.1);
                } else {
                    let current = node.local_transform.rotation;
                    node.local_transform.rotation =
                        current.slerp(target.base_rotation, SETTLE_RATE);
                }
            }
        }
    }
}
