//! Tree generation pipeline: root call policy plus the recursive builder.
//!
//! [`grow_tree`] seeds the deterministic stream from the growth parameters,
//! derives the root depth and radius from account age, and hands off to the
//! recursive branch builder. Generation is pure and bounded: the same
//! inputs always produce the same tree, and depth never exceeds 4.

pub mod branch;

pub use branch::{grow_branch, BranchNode};

use glam::Vec3;

use crate::growth::GrowthParameters;

/// Root recursion depth from account age: young trees stay simple.
pub fn root_depth(service_days: u32) -> u32 {
    match service_days {
        0..=10 => 2,
        11..=30 => 3,
        _ => 4,
    }
}

/// Trunk base radius, log-scaled over account age like the growth factor.
pub fn root_radius(service_days: u32) -> f32 {
    0.8 + (service_days as f32 + 1.0).log10() * 0.2
}

/// Grow a full tree from the origin, straight up.
pub fn grow_tree(params: &GrowthParameters, service_days: u32) -> BranchNode {
    let mut rng = params.rng();
    let depth = root_depth(service_days);

    let root = grow_branch(
        Vec3::ZERO,
        Vec3::Y,
        params.tree_scale,
        root_radius(service_days),
        depth,
        params,
        &mut rng,
    );

    log::info!(
        "grew tree: depth={} branches={} leaves={} flowers={}",
        depth,
        root.branch_count(),
        root.leaf_count(),
        root.flower_count(),
    );

    root
}
