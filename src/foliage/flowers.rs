//! Flower placement with overlap rejection and bloom staging.

use glam::{Quat, Vec3};

use crate::core::GrowthRng;
use crate::geometry::BranchCurve;
use crate::growth::{FlowerStage, GrowthParameters};

use super::{branch_frame, orient_towards, radius_at};

/// Base flower size; petal dimensions and spacing derive from it.
pub const FLOWER_SIZE: f32 = 0.22;
/// Minimum center-to-center distance between flowers on one branch.
pub const MIN_FLOWER_SPACING: f32 = FLOWER_SIZE * 2.1;
/// Placement attempts before giving up on the remaining target.
const MAX_ATTEMPTS: usize = 50;
/// Hard cap on the per-branch target count.
const MAX_TARGET: u32 = 15;

/// One placed flower.
#[derive(Clone, Copy, Debug)]
pub struct FlowerInstance {
    pub position: Vec3,
    pub rotation: Quat,
    pub full_bloom: bool,
    /// Petal layers; blooms stack more layers with self-consciousness.
    pub layer_count: u32,
    pub petals_per_layer: u32,
}

/// Greedily place flowers on the outer part of a branch (`t` in [0.4, 1)).
///
/// A candidate within [`MIN_FLOWER_SPACING`] of an accepted flower is
/// rejected. The attempt budget bounds the loop; exhausting it simply
/// yields fewer flowers, which is acceptable. Stage `None` and degenerate
/// branches place nothing.
pub fn place_flowers(
    curve: &BranchCurve,
    radius: f32,
    density_factor: f32,
    params: &GrowthParameters,
    rng: &mut GrowthRng,
) -> Vec<FlowerInstance> {
    if params.flower_stage == FlowerStage::None || curve.is_degenerate() {
        return Vec::new();
    }

    let base_target = (params.total_diaries / 2).min(MAX_TARGET);
    let mut target = (base_target as f32 * density_factor).floor() as u32;
    // Sparse tiers that round to zero still get one flower now and then.
    if target == 0 && density_factor > 0.0 && rng.next() > 0.7 {
        target = 1;
    }

    let mut flowers: Vec<FlowerInstance> = Vec::with_capacity(target as usize);

    for _ in 0..MAX_ATTEMPTS {
        if flowers.len() as u32 >= target {
            break;
        }

        let t = 0.4 + rng.next() * 0.6;
        let pos = curve.point_at(t);
        let tangent = curve.tangent_at(t);
        let (normal, binormal) = branch_frame(tangent);

        let angle = rng.next() * std::f32::consts::TAU;
        let surface_dir =
            (normal * angle.cos() + binormal * angle.sin()).normalize_or(Vec3::X);
        let position = pos + surface_dir * (radius_at(radius, t) + 0.01);

        let overlapping = flowers
            .iter()
            .any(|f| (f.position - position).length() < MIN_FLOWER_SPACING);
        if overlapping {
            continue;
        }

        let full_bloom = match params.flower_stage {
            FlowerStage::None | FlowerStage::Buds => false,
            FlowerStage::Mixed => {
                // Blooms appear one by one as the diary count climbs past 20;
                // at the low end of the stage every flower stays a bud.
                let bloom_count = params.total_diaries as i64 - 20;
                (flowers.len() as i64) < bloom_count
            }
            FlowerStage::Full => true,
        };

        let layer_count = if full_bloom {
            (1.0 + params.self_consciousness * 2.5).floor() as u32
        } else {
            1
        };
        let petals_per_layer = if full_bloom { 6 } else { 5 };

        flowers.push(FlowerInstance {
            position,
            rotation: orient_towards(surface_dir),
            full_bloom,
            layer_count,
            petals_per_layer,
        });
    }

    flowers
}
