//! Mesh assembly for leaves and flowers.
//!
//! Blade shapes come from the same mirrored-Bézier outline; trait factors
//! set the proportions. Petal rings and stamens are baked into merged
//! meshes per flower so a flower is a handful of nodes, not one per petal.

use glam::{Mat4, Vec2, Vec3};

use crate::foliage::{FlowerInstance, FLOWER_SIZE};
use crate::geometry::{primitives, Mesh};
use crate::growth::GrowthParameters;

/// Leaf blade mesh shared by every leaf on the tree.
///
/// Vulnerability lengthens the blade, trust (vitality) widens it.
pub fn leaf_mesh(params: &GrowthParameters) -> Mesh {
    let size = 0.4 + params.vulnerability * 0.8;
    let width = size * (0.2 + params.leaf_vitality * 0.6);
    primitives::blade_mesh(
        Vec2::new(width * 0.5, size * 0.3),
        Vec2::new(width, size * 0.7),
        size * 1.2,
    )
}

/// One ring of petals for a flower layer, baked into a single mesh.
///
/// Bud layers fold almost closed; bloom layers open wider the further out
/// they sit. Successive layers rotate half a petal step so petals
/// interleave.
pub fn petal_ring_mesh(layer_idx: u32, petals_per_layer: u32, full_bloom: bool) -> Mesh {
    let petal_len = FLOWER_SIZE * 2.2;
    let petal_width = FLOWER_SIZE * 0.9;
    let blade = primitives::blade_mesh(
        Vec2::new(petal_width * 0.5, petal_len * 0.2),
        Vec2::new(petal_width, petal_len * 0.6),
        petal_len,
    );

    let tilt = if full_bloom {
        0.1 + layer_idx as f32 * 0.2
    } else {
        1.3
    };

    let mut ring = Mesh::new();
    let step = std::f32::consts::TAU / petals_per_layer as f32;
    for p in 0..petals_per_layer {
        let angle = step * p as f32 + step * (layer_idx as f32 * 0.5);
        let mut petal = blade.clone();
        petal.transform(Mat4::from_rotation_z(angle) * Mat4::from_rotation_x(tilt));
        ring.merge(&petal);
    }
    ring
}

/// Stamen filaments and their anther tips for one flower, as two meshes
/// (they carry different colors).
pub fn stamen_meshes(full_bloom: bool) -> (Mesh, Mesh) {
    let count = if full_bloom { 5 } else { 2 };
    // Buds barely part their stamens; blooms splay them outward.
    let tilt = if full_bloom { 0.4 } else { 0.1 } + std::f32::consts::FRAC_PI_2;

    let filament = primitives::cylinder_mesh(0.003, 0.003, 0.16, 4);
    let anther = primitives::sphere_mesh(0.015, 6, 6);

    let mut filaments = Mesh::new();
    let mut anthers = Mesh::new();
    for k in 0..count {
        let spin = std::f32::consts::TAU / count as f32 * k as f32;
        let frame = Mat4::from_rotation_z(spin) * Mat4::from_rotation_x(tilt);

        let mut f = filament.clone();
        f.transform(frame * Mat4::from_translation(Vec3::new(0.0, 0.08, 0.0)));
        filaments.merge(&f);

        let mut a = anther.clone();
        a.transform(frame * Mat4::from_translation(Vec3::new(0.0, 0.16, 0.0)));
        anthers.merge(&a);
    }
    (filaments, anthers)
}

/// Layer count and petal counts are already decided at placement time; this
/// reports the local Z offset that seats the stamens above the petal stack.
pub fn stamen_offset(flower: &FlowerInstance) -> Vec3 {
    Vec3::new(0.0, 0.0, 0.01 * flower.layer_count as f32)
}
