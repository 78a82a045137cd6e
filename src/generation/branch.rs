//! Recursive branch construction.
//!
//! Each call builds one tapered branch (curve + mesh), decides its child
//! directions, places foliage on the two outermost tiers, and recurses with
//! shorter, thinner children. Nodes own their children outright; the growth
//! parameters are shared read-only through the whole recursion and the RNG
//! is the single mutable thread.
//!
//! Draw order is fixed and load-bearing for reproducibility: midpoint
//! jitter, child directions, leaves, flowers, then children in order.

use glam::{Quat, Vec3};

use crate::core::GrowthRng;
use crate::foliage::{place_flowers, place_leaves, FlowerInstance, LeafInstance};
use crate::geometry::{build_tapered_tube, BranchCurve, Mesh};
use crate::growth::GrowthParameters;

/// Child branches shorten to 75% of the parent.
const CHILD_LENGTH_RATIO: f32 = 0.75;
/// Child branches thin to 45% of the parent radius.
const CHILD_RADIUS_RATIO: f32 = 0.45;
/// Tube radius tapers to 40% over one branch.
const TIP_TAPER: f32 = 0.4;
/// Second-to-last tier carries 60% of the terminal leaf density.
const INNER_LEAF_SCALE: f32 = 0.6;
/// Second-to-last tier carries 30% of the terminal flower density.
const INNER_FLOWER_DENSITY: f32 = 0.3;

/// One branch of the tree: curve, surface mesh, foliage, owned children.
///
/// Immutable after construction; any parameter change rebuilds the whole
/// tree rather than patching nodes.
#[derive(Clone, Debug)]
pub struct BranchNode {
    pub curve: BranchCurve,
    pub mesh: Mesh,
    /// Base radius of this branch's tube.
    pub radius: f32,
    /// Remaining recursion depth; 0 at the tips.
    pub depth: u32,
    pub leaves: Vec<LeafInstance>,
    pub flowers: Vec<FlowerInstance>,
    pub children: Vec<BranchNode>,
}

impl BranchNode {
    /// Number of branch tiers below and including this node.
    pub fn tiers(&self) -> u32 {
        1 + self
            .children
            .iter()
            .map(BranchNode::tiers)
            .max()
            .unwrap_or(0)
    }

    /// Total branches in this subtree.
    pub fn branch_count(&self) -> usize {
        1 + self.children.iter().map(BranchNode::branch_count).sum::<usize>()
    }

    /// Total leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        self.leaves.len() + self.children.iter().map(BranchNode::leaf_count).sum::<usize>()
    }

    /// Total flowers in this subtree.
    pub fn flower_count(&self) -> usize {
        self.flowers.len() + self.children.iter().map(BranchNode::flower_count).sum::<usize>()
    }
}

/// Child directions: tilt the parent direction outward by the spread angle,
/// then fan the children around the parent axis with a per-child roll
/// perturbation.
fn child_directions(
    direction: Vec3,
    params: &GrowthParameters,
    rng: &mut GrowthRng,
) -> Vec<Vec3> {
    let mut dirs = Vec::with_capacity(params.complexity as usize);
    for i in 0..params.complexity {
        // Tilt axis perpendicular to both the branch and world-up; a
        // vertical branch degenerates the cross product, so fall back to +X.
        let mut axis = direction.cross(Vec3::Y).normalize_or_zero();
        if axis.length() < 0.1 {
            axis = Vec3::X;
        }

        let tilted = Quat::from_axis_angle(axis, params.branch_spread) * direction;
        let roll = (std::f32::consts::TAU / params.complexity as f32) * i as f32
            + rng.next() * 0.5;
        dirs.push((Quat::from_axis_angle(direction, roll) * tilted).normalize_or(Vec3::Y));
    }
    dirs
}

/// Build one branch and recurse into its children.
pub fn grow_branch(
    start: Vec3,
    direction: Vec3,
    length: f32,
    radius: f32,
    depth: u32,
    params: &GrowthParameters,
    rng: &mut GrowthRng,
) -> BranchNode {
    // Jitter the midpoint; this bend is what keeps branches organic.
    let mut mid = start + direction * (length * 0.5);
    mid += Vec3::new(
        (rng.next() - 0.5) * params.irregularity,
        rng.next() * params.irregularity * 0.5,
        (rng.next() - 0.5) * params.irregularity,
    );
    let end = start + direction * length;

    let curve = BranchCurve::new(start, mid, end);
    let mesh = build_tapered_tube(&curve, radius, radius * TIP_TAPER, params.bark_noise);

    let next_directions = if depth > 0 {
        child_directions(direction, params, rng)
    } else {
        Vec::new()
    };

    // Foliage grows on the terminal and second-to-last tiers only, thinner
    // on the inner one.
    let (leaves, flowers) = if depth <= 1 {
        let leaf_count = if depth == 1 {
            (params.leaf_density as f32 * INNER_LEAF_SCALE).floor() as u32
        } else {
            params.leaf_density
        };
        let flower_density = if depth == 0 { 1.0 } else { INNER_FLOWER_DENSITY };
        let leaves = place_leaves(&curve, radius, leaf_count, params, rng);
        let flowers = place_flowers(&curve, radius, flower_density, params, rng);
        (leaves, flowers)
    } else {
        (Vec::new(), Vec::new())
    };

    log::trace!(
        "branch depth={depth} len={length:.2} r={radius:.3} leaves={} flowers={}",
        leaves.len(),
        flowers.len()
    );

    let children = next_directions
        .into_iter()
        .map(|dir| {
            grow_branch(
                end,
                dir,
                length * CHILD_LENGTH_RATIO,
                radius * CHILD_RADIUS_RATIO,
                depth - 1,
                params,
                rng,
            )
        })
        .collect();

    BranchNode {
        curve,
        mesh,
        radius,
        depth,
        leaves,
        flowers,
        children,
    }
}
