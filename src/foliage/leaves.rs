//! Leaf placement along one branch.

use glam::{Quat, Vec3};

use crate::core::GrowthRng;
use crate::geometry::BranchCurve;
use crate::growth::GrowthParameters;

use super::{branch_frame, orient_towards, radius_at};

/// One placed leaf. Position sits on the branch surface; the rotation faces
/// the blade outward with a vulnerability droop and a random twist baked in.
#[derive(Clone, Copy, Debug)]
pub struct LeafInstance {
    pub position: Vec3,
    pub rotation: Quat,
}

/// Scatter `count` leaves over the branch surface.
///
/// Leaves need no overlap rejection: density is bounded by the count.
/// A degenerate (zero-length) branch places nothing.
pub fn place_leaves(
    curve: &BranchCurve,
    radius: f32,
    count: u32,
    params: &GrowthParameters,
    rng: &mut GrowthRng,
) -> Vec<LeafInstance> {
    if curve.is_degenerate() {
        return Vec::new();
    }

    let droop = params.vulnerability * std::f32::consts::PI * 0.4;
    let mut leaves = Vec::with_capacity(count as usize);

    for _ in 0..count {
        // Start at t=0.1 so leaves sprout from the lower branch as well.
        let t = 0.1 + rng.next() * 0.9;
        let pos = curve.point_at(t);
        let tangent = curve.tangent_at(t);
        let (normal, binormal) = branch_frame(tangent);

        let angle = rng.next() * std::f32::consts::TAU;
        let surface_dir =
            (normal * angle.cos() + binormal * angle.sin()).normalize_or(Vec3::X);
        let position = pos + surface_dir * radius_at(radius, t);

        // Face outward, stand the blade up, droop it, then twist it.
        let twist = (rng.next() - 0.5) * std::f32::consts::PI * 0.5;
        let rotation = orient_towards(surface_dir)
            * Quat::from_rotation_x(std::f32::consts::FRAC_PI_2 + droop)
            * Quat::from_rotation_y(twist);

        leaves.push(LeafInstance { position, rotation });
    }

    leaves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth::map_profile;
    use crate::profile::{TraitProfile, UsageStats};

    fn test_params() -> GrowthParameters {
        map_profile(
            Some(&TraitProfile::default()),
            "leaf-tests",
            &UsageStats::new(20, 15),
        )
        .unwrap()
    }

    fn test_curve() -> BranchCurve {
        BranchCurve::new(Vec3::ZERO, Vec3::new(0.2, 2.0, 0.0), Vec3::new(0.0, 4.0, 0.2))
    }

    #[test]
    fn test_count_honored() {
        let params = test_params();
        let mut rng = params.rng();
        let leaves = place_leaves(&test_curve(), 0.5, 12, &params, &mut rng);
        assert_eq!(leaves.len(), 12);
    }

    #[test]
    fn test_leaves_near_surface() {
        let params = test_params();
        let mut rng = params.rng();
        let curve = test_curve();
        for leaf in place_leaves(&curve, 0.5, 40, &params, &mut rng) {
            // Distance to the centerline stays within the taper range.
            let closest = (0..=64)
                .map(|i| (curve.point_at(i as f32 / 64.0) - leaf.position).length())
                .fold(f32::MAX, f32::min);
            assert!(closest <= 0.5 + 0.05, "leaf {closest} off the branch");
            assert!(closest >= 0.4 * 0.5 - 0.05);
        }
    }

    #[test]
    fn test_deterministic() {
        let params = test_params();
        let mut a_rng = params.rng();
        let mut b_rng = params.rng();
        let a = place_leaves(&test_curve(), 0.5, 10, &params, &mut a_rng);
        let b = place_leaves(&test_curve(), 0.5, 10, &params, &mut b_rng);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.position, y.position);
            assert_eq!(x.rotation, y.rotation);
        }
    }

    #[test]
    fn test_degenerate_curve_places_nothing() {
        let params = test_params();
        let mut rng = params.rng();
        let point = BranchCurve::new(Vec3::ONE, Vec3::ONE, Vec3::ONE);
        assert!(place_leaves(&point, 0.5, 10, &params, &mut rng).is_empty());
    }

    #[test]
    fn test_zero_count() {
        let params = test_params();
        let mut rng = params.rng();
        assert!(place_leaves(&test_curve(), 0.5, 0, &params, &mut rng).is_empty());
    }

    #[test]
    fn test_rotations_are_unit() {
        let params = test_params();
        let mut rng = params.rng();
        for leaf in place_leaves(&test_curve(), 0.5, 20, &params, &mut rng) {
            assert!((leaf.rotation.length() - 1.0).abs() < 1e-4);
        }
    }
}
