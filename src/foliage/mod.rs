//! Foliage placement: scattering leaves and flowers over branch surfaces.
//!
//! Both placers sample a curve parameter, pick a random angle around the
//! branch circumference, and anchor the instance to the tapered surface.
//! Instances are immutable once placed; the per-frame sway in
//! [`crate::animation`] only touches node transforms.

pub mod flowers;
pub mod leaves;

pub use flowers::{place_flowers, FlowerInstance, FLOWER_SIZE, MIN_FLOWER_SPACING};
pub use leaves::{place_leaves, LeafInstance};

use glam::{Mat3, Quat, Vec3};

/// Branch surface radius at curve parameter `t` (tapers to 40% at the tip).
pub(crate) fn radius_at(radius: f32, t: f32) -> f32 {
    radius * (1.0 - t) + radius * 0.4 * t
}

/// Orthonormal frame perpendicular to a branch tangent.
///
/// The helper axis switches from world-up to +X for near-vertical tangents
/// so the cross product never degenerates.
pub(crate) fn branch_frame(tangent: Vec3) -> (Vec3, Vec3) {
    let helper = if tangent.y.abs() > 0.9 { Vec3::X } else { Vec3::Y };
    let normal = tangent.cross(helper).normalize_or(Vec3::X);
    let binormal = tangent.cross(normal).normalize_or(Vec3::Z);
    (normal, binormal)
}

/// Rotation that points local +Z along `dir` with world-up as the reference.
pub(crate) fn orient_towards(dir: Vec3) -> Quat {
    let z = dir.normalize_or(Vec3::Z);
    let up = if z.y.abs() > 0.999 { Vec3::X } else { Vec3::Y };
    let x = up.cross(z).normalize_or(Vec3::X);
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z))
}
