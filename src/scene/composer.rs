//! Scene composition: tree + ground + lights + particles.
//!
//! [`TreeScene`] is the crate's top-level product. It owns the scene graph,
//! the environment snapshot, the firefly swarm, and the sway animator, and
//! offers the two presentation variants: the interactive scene (time
//! slider, wind toggle, full environment) and the fixed-lighting report
//! scene.

use std::sync::Arc;

use glam::Vec3;

use crate::animation::SwayAnimator;
use crate::atmosphere::{self, EnvironmentState, EnvironmentUniform, MOON_GLOW_THRESHOLD};
use crate::core::color;
use crate::foliage::FlowerInstance;
use crate::generation::{grow_tree, BranchNode};
use crate::geometry::Mesh;
use crate::growth::{map_profile, GrowthParameters};
use crate::profile::{TraitProfile, UsageStats};

use super::fireflies::{FireflyInstance, FireflySystem, FIREFLY_COUNT};
use super::flora;
use super::graph::{FlattenedScene, SceneGraph};
use super::hill;
use super::node::{LayerId, Light, LocalTransform, Material, NodeContent, SceneNodeId};

/// Moon point light color.
const MOON_COLOR: [f32; 3] = color::from_hex(0x6666FF);
/// Moon point light placement.
const MOON_POSITION: Vec3 = Vec3::new(-15.0, 10.0, -5.0);
/// Sun placement; the directional light aims from here at the origin.
const SUN_POSITION: Vec3 = Vec3::new(10.0, 20.0, 10.0);
/// Stamen filament color (gold).
const FILAMENT_COLOR: [f32; 3] = color::from_hex(0xFFD700);
/// Anther tip color (orange).
const ANTHER_COLOR: [f32; 3] = color::from_hex(0xFFA500);

/// How a composed scene is presented.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PresentationMode {
    /// Live scene: time slider, wind toggle, fireflies, moonlight.
    Interactive { windy: bool, time_value: f32 },
    /// Static report rendering: fixed neutral lighting, no wind, no time
    /// control, a touch of glow for color vividness.
    Report,
}

/// A fully composed, renderable tree scene.
pub struct TreeScene {
    graph: SceneGraph,
    environment: EnvironmentState,
    mode: PresentationMode,
    fireflies: Option<FireflySystem>,
    sway: SwayAnimator,
    elapsed: f32,
    orbit_height: f32,
    ambient_id: Option<SceneNodeId>,
    sun_id: Option<SceneNodeId>,
    moon_id: Option<SceneNodeId>,
    hill_id: Option<SceneNodeId>,
    /// Mesh nodes whose emissive intensity is `glow * factor`.
    glow_scaled: Vec<(SceneNodeId, f32)>,
}

impl TreeScene {
    /// Compose the interactive scene.
    ///
    /// A missing profile yields an empty scene (nothing to draw), never an
    /// error.
    pub fn interactive(
        profile: Option<&TraitProfile>,
        identifier: &str,
        usage: &UsageStats,
        windy: bool,
        time_value: f32,
    ) -> Self {
        let params = map_profile(profile, identifier, usage);
        Self::compose(
            params,
            usage.service_days(),
            PresentationMode::Interactive { windy, time_value },
        )
    }

    /// Compose the static report scene.
    pub fn report(
        profile: Option<&TraitProfile>,
        identifier: &str,
        usage: &UsageStats,
    ) -> Self {
        let params = map_profile(profile, identifier, usage);
        Self::compose(params, usage.service_days(), PresentationMode::Report)
    }

    fn compose(
        params: Option<GrowthParameters>,
        service_days: u32,
        mode: PresentationMode,
    ) -> Self {
        let environment = match mode {
            PresentationMode::Interactive { time_value, .. } => {
                atmosphere::interpolate(time_value)
            }
            PresentationMode::Report => EnvironmentState::report(),
        };

        let mut scene = Self {
            graph: SceneGraph::new(),
            environment,
            mode,
            fireflies: None,
            sway: SwayAnimator::new(),
            elapsed: 0.0,
            orbit_height: 0.0,
            ambient_id: None,
            sun_id: None,
            moon_id: None,
            hill_id: None,
            glow_scaled: Vec::new(),
        };

        let Some(params) = params else {
            log::warn!("no trait profile available, composing empty scene");
            return scene;
        };

        scene.orbit_height = params.tree_scale * 1.2;

        let tree = grow_tree(&params, service_days);
        let root = scene.graph.root();
        let tree_group =
            scene
                .graph
                .add_child(root, "tree", LayerId::Branch, NodeContent::Group);
        let leaf_mesh = Arc::new(flora::leaf_mesh(&params));
        scene.add_branch(tree_group, tree, &params, &leaf_mesh);

        scene.add_ground();
        scene.add_lights();
        if let PresentationMode::Interactive { .. } = scene.mode {
            scene.fireflies = Some(FireflySystem::new(FIREFLY_COUNT, params.seed));
        }

        scene.sway = SwayAnimator::from_graph(&scene.graph);
        scene.apply_environment();

        log::info!(
            "composed {:?} scene: {} nodes",
            scene.mode,
            scene.graph.node_count()
        );
        scene
    }

    /// Insert one branch subtree into the graph, consuming the branch.
    fn add_branch(
        &mut self,
        parent: SceneNodeId,
        branch: BranchNode,
        params: &GrowthParameters,
        leaf_mesh: &Arc<Mesh>,
    ) {
        let BranchNode {
            mesh,
            leaves,
            flowers,
            children,
            ..
        } = branch;

        let bark = Material {
            color: params.trunk_color,
            emissive: params.trunk_color,
            // Faint self-light keeps shaded bark from going black.
            emissive_intensity: 0.15,
            roughness: 0.8,
            double_sided: true,
            ..Default::default()
        };
        self.graph.add_child(
            parent,
            "branch",
            LayerId::Branch,
            NodeContent::Mesh {
                mesh: Arc::new(mesh),
                material: bark,
            },
        );

        let leaf_material = Material {
            color: params.leaf_color,
            emissive: params.leaf_color,
            opacity: 0.9,
            roughness: 0.8,
            double_sided: true,
            ..Default::default()
        };
        for leaf in &leaves {
            let id = self.graph.add_child(
                parent,
                "leaf",
                LayerId::Foliage,
                NodeContent::Mesh {
                    mesh: leaf_mesh.clone(),
                    material: leaf_material,
                },
            );
            self.graph.set_transform(
                id,
                LocalTransform::from_position_rotation(leaf.position, leaf.rotation),
            );
            // Leaves glow gently at night.
            self.glow_scaled.push((id, 0.5));
        }

        for flower in &flowers {
            self.add_flower(parent, flower, params);
        }

        for child in children {
            self.add_branch(parent, child, params, leaf_mesh);
        }
    }

    /// One flower: a swayable group holding petal-layer meshes and stamens.
    fn add_flower(
        &mut self,
        parent: SceneNodeId,
        flower: &FlowerInstance,
        params: &GrowthParameters,
    ) {
        let group = self
            .graph
            .add_child(parent, "flower", LayerId::Flower, NodeContent::Group);
        self.graph.set_transform(
            group,
            LocalTransform::from_position_rotation(flower.position, flower.rotation),
        );

        for layer in 0..flower.layer_count {
            let shade = color::darken(params.flower_color, layer as f32 * 0.3);
            let material = Material {
                color: shade,
                emissive: shade,
                roughness: 1.0,
                double_sided: true,
                ..Default::default()
            };
            let id = self.graph.add_child(
                group,
                "petals",
                LayerId::Flower,
                NodeContent::Mesh {
                    mesh: Arc::new(flora::petal_ring_mesh(
                        layer,
                        flower.petals_per_layer,
                        flower.full_bloom,
                    )),
                    material,
                },
            );
            self.graph.set_transform(
                id,
                LocalTransform {
                    scale: 1.0 - layer as f32 * 0.2,
                    ..Default::default()
                },
            );
            // Inner layers glow a little less to keep depth.
            self.glow_scaled.push((id, 1.2 - layer as f32 * 0.2));
        }

        let (filaments, anthers) = flora::stamen_meshes(flower.full_bloom);
        let stamen_transform = LocalTransform {
            position: flora::stamen_offset(flower),
            scale: if flower.full_bloom { 1.2 } else { 0.8 },
            ..Default::default()
        };
        for (name, mesh, tint) in [
            ("stamens", filaments, FILAMENT_COLOR),
            ("anthers", anthers, ANTHER_COLOR),
        ] {
            let material = Material {
                color: tint,
                emissive: tint,
                roughness: 1.0,
                ..Default::default()
            };
            let id = self.graph.add_child(
                group,
                name,
                LayerId::Flower,
                NodeContent::Mesh {
                    mesh: Arc::new(mesh),
                    material,
                },
            );
            self.graph.set_transform(id, stamen_transform);
            self.glow_scaled.push((id, 2.0));
        }
    }

    fn add_ground(&mut self) {
        let root = self.graph.root();
        let material = Material {
            color: hill::hill_color(self.environment.glow_intensity),
            roughness: 0.8,
            double_sided: true,
            ..Default::default()
        };
        let id = self.graph.add_child(
            root,
            "ground",
            LayerId::Ground,
            NodeContent::Mesh {
                mesh: Arc::new(hill::build_hill()),
                material,
            },
        );
        self.hill_id = Some(id);
    }

    fn add_lights(&mut self) {
        let root = self.graph.root();

        self.ambient_id = Some(self.graph.add_child(
            root,
            "ambient",
            LayerId::Light,
            NodeContent::Light(Light::Ambient {
                color: [1.0; 3],
                intensity: self.environment.ambient_intensity,
            }),
        ));

        self.sun_id = Some(self.graph.add_child(
            root,
            "sun",
            LayerId::Light,
            NodeContent::Light(Light::Directional {
                direction: (Vec3::ZERO - SUN_POSITION).normalize(),
                color: self.environment.sun_color,
                intensity: self.environment.sun_intensity,
            }),
        ));

        match self.mode {
            PresentationMode::Interactive { .. } => {
                let moon = self.graph.add_child(
                    root,
                    "moon",
                    LayerId::Light,
                    NodeContent::Light(Light::Point {
                        color: MOON_COLOR,
                        intensity: self.environment.glow_intensity * 0.5,
                        distance: 50.0,
                    }),
                );
                self.graph
                    .set_transform(moon, LocalTransform::from_position(MOON_POSITION));
                self.moon_id = Some(moon);
            }
            PresentationMode::Report => {
                // Fill light from the far side so the report tree has no
                // dead-black faces.
                let fill = self.graph.add_child(
                    root,
                    "fill",
                    LayerId::Light,
                    NodeContent::Light(Light::Point {
                        color: [1.0; 3],
                        intensity: 0.5,
                        distance: 0.0,
                    }),
                );
                self.graph.set_transform(
                    fill,
                    LocalTransform::from_position(Vec3::new(-10.0, 5.0, -10.0)),
                );
            }
        }
    }

    /// Push the current environment into lights, ground, and emissives.
    fn apply_environment(&mut self) {
        let env = self.environment;

        if let Some(id) = self.ambient_id {
            if let Some(node) = self.graph.get_mut(id) {
                if let NodeContent::Light(Light::Ambient { intensity, .. }) = &mut node.content {
                    *intensity = env.ambient_intensity;
                }
            }
        }
        if let Some(id) = self.sun_id {
            if let Some(node) = self.graph.get_mut(id) {
                if let NodeContent::Light(Light::Directional {
                    color, intensity, ..
                }) = &mut node.content
                {
                    *color = env.sun_color;
                    *intensity = env.sun_intensity;
                }
            }
        }
        if let Some(id) = self.moon_id {
            let lit = env.glow_intensity > MOON_GLOW_THRESHOLD;
            self.graph.set_visible(id, lit);
            if let Some(node) = self.graph.get_mut(id) {
                if let NodeContent::Light(Light::Point { intensity, .. }) = &mut node.content {
                    *intensity = env.glow_intensity * 0.5;
                }
            }
        }
        if let Some(id) = self.hill_id {
            if let Some(node) = self.graph.get_mut(id) {
                if let NodeContent::Mesh { material, .. } = &mut node.content {
                    material.color = hill::hill_color(env.glow_intensity);
                }
            }
        }
        for (id, factor) in &self.glow_scaled {
            if let Some(node) = self.graph.get_mut(*id) {
                if let NodeContent::Mesh { material, .. } = &mut node.content {
                    material.emissive_intensity = env.glow_intensity * factor;
                }
            }
        }
    }

    /// Whether the scene has nothing to draw (no profile was available).
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() <= 1
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    pub fn environment(&self) -> &EnvironmentState {
        &self.environment
    }

    /// GPU-ready environment uniform for the current snapshot.
    pub fn environment_uniform(&self) -> EnvironmentUniform {
        EnvironmentUniform::from(&self.environment)
    }

    pub fn mode(&self) -> PresentationMode {
        self.mode
    }

    /// Suggested orbit-camera target above the trunk base.
    pub fn orbit_target(&self) -> Vec3 {
        Vec3::new(0.0, self.orbit_height, 0.0)
    }

    /// Move the time-of-day slider. Only the interactive scene responds;
    /// report lighting never changes.
    pub fn set_time(&mut self, time_value: f32) {
        if let PresentationMode::Interactive { windy, .. } = self.mode {
            self.mode = PresentationMode::Interactive {
                windy,
                time_value: time_value.clamp(0.0, 100.0),
            };
            self.environment = atmosphere::interpolate(time_value);
            self.apply_environment();
        }
    }

    /// Toggle wind. Only meaningful for the interactive scene.
    pub fn set_windy(&mut self, windy: bool) {
        if let PresentationMode::Interactive { time_value, .. } = self.mode {
            self.mode = PresentationMode::Interactive { windy, time_value };
        }
    }

    /// Advance per-frame animation by `dt` seconds: firefly rise and
    /// foliage sway. Geometry is never rebuilt here.
    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
        if let Some(fireflies) = &mut self.fireflies {
            fireflies.update(dt);
        }
        let windy = matches!(
            self.mode,
            PresentationMode::Interactive { windy: true, .. }
        );
        self.sway.apply(&mut self.graph, self.elapsed, windy);
    }

    /// Flatten the graph into draw and light lists.
    pub fn flatten(&mut self) -> FlattenedScene {
        self.graph.flatten()
    }

    /// Current firefly instances; empty for the report scene.
    pub fn firefly_instances(&self) -> Vec<FireflyInstance> {
        self.fireflies
            .as_ref()
            .map(|f| f.instances(self.elapsed, self.environment.glow_intensity))
            .unwrap_or_default()
    }
}
