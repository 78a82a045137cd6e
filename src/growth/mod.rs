//! Trait mapper: personality profile + usage stats -> growth parameters.
//!
//! [`GrowthParameters`] is the single source of truth for every shape and
//! color decision downstream. It is derived once per render from immutable
//! inputs and shared read-only through the whole branch recursion.

use serde::Serialize;

use crate::core::color::{self, Rgb};
use crate::core::{make_seed, GrowthRng};
use crate::profile::{TraitProfile, UsageStats, FACET_MAX};

/// Leaf color endpoints, blended by sympathy.
const LEAF_COLOR_LOW: Rgb = color::from_hex(0x5F8B5F);
const LEAF_COLOR_HIGH: Rgb = color::from_hex(0x77DD77);
/// Trunk color endpoints, blended by depression.
const TRUNK_COLOR_LOW: Rgb = color::from_hex(0xA1887F);
const TRUNK_COLOR_HIGH: Rgb = color::from_hex(0x5D4037);
/// Flower color endpoints, blended by self-discipline.
const FLOWER_COLOR_LOW: Rgb = color::from_hex(0xFFF9C4);
const FLOWER_COLOR_HIGH: Rgb = color::from_hex(0xFFB7C5);

/// Bloom abundance stage derived from the total diary count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum FlowerStage {
    /// Fewer than 10 diaries: no flowers at all.
    None = 1,
    /// 10-19 diaries: closed buds only.
    Buds = 2,
    /// 20-39 diaries: mixed buds and blooms.
    Mixed = 3,
    /// 40 or more diaries: everything in full bloom.
    Full = 4,
}

impl FlowerStage {
    /// Stage thresholds over the diary count. Monotonic by construction.
    pub fn from_total_diaries(total: u32) -> Self {
        match total {
            0..=9 => Self::None,
            10..=19 => Self::Buds,
            20..=39 => Self::Mixed,
            _ => Self::Full,
        }
    }
}

/// Derived, immutable configuration for one tree.
#[derive(Clone, Debug, Serialize)]
pub struct GrowthParameters {
    /// Seed hashed from the identifier plus the serialized profile.
    pub seed: u32,
    /// Upper bound on branch recursion depth, capped at 4.
    pub max_depth: u32,
    /// Diminishing-returns scale multiplier over account age.
    pub growth_factor: f32,
    /// Bloom abundance stage.
    pub flower_stage: FlowerStage,
    /// Total diary count feeding the bloom rules.
    pub total_diaries: u32,

    /// Child-branch cone angle in radians.
    pub branch_spread: f32,
    /// Children per branch: 4 for high intellect, else 3.
    pub complexity: u32,
    /// Midpoint jitter amplitude; inverse of orderliness.
    pub irregularity: f32,
    /// Leaves per terminal branch.
    pub leaf_density: u32,
    /// Trunk length, growth factor already applied.
    pub tree_scale: f32,
    /// Bark ripple amplitude.
    pub bark_noise: f32,

    pub leaf_color: Rgb,
    pub trunk_color: Rgb,
    pub flower_color: Rgb,

    /// Trust, normalized to [0, 1]; widens leaf blades.
    pub leaf_vitality: f32,
    /// Vulnerability, normalized; sizes blades and adds droop.
    pub vulnerability: f32,
    /// Self-consciousness, normalized; adds petal layers to blooms.
    pub self_consciousness: f32,
}

impl GrowthParameters {
    /// Start the deterministic stream for this parameter set.
    pub fn rng(&self) -> GrowthRng {
        GrowthRng::new(self.seed)
    }
}

/// Linear remap of a facet score onto [min, max].
fn map_facet(value: f32, min: f32, max: f32) -> f32 {
    min + (value / FACET_MAX) * (max - min)
}

/// Map a profile and usage stats into growth parameters.
///
/// Returns `None` when no profile is available; the caller renders an empty
/// scene in that case. This is the defined null result, not a failure.
pub fn map_profile(
    profile: Option<&TraitProfile>,
    identifier: &str,
    usage: &UsageStats,
) -> Option<GrowthParameters> {
    let profile = profile?;

    let seed = make_seed(&format!("{identifier}{}", profile.seed_text()));
    let service_days = usage.service_days();
    let total_diaries = usage.total_diaries();

    let flower_stage = FlowerStage::from_total_diaries(total_diaries);
    let growth_factor = 1.0 + (service_days as f32 + 1.0).log10() * 0.5;
    let max_depth = (((service_days as f32 / 3.0).sqrt().floor() as u32) + 1).min(4);

    let sympathy = profile.agreeableness.facet("sympathy") / FACET_MAX;
    let depression = profile.neuroticism.facet("depression") / FACET_MAX;
    let trust = profile.agreeableness.facet("trust") / FACET_MAX;
    let self_discipline = profile.conscientiousness.facet("self_discipline") / FACET_MAX;
    let vulnerability = profile.neuroticism.facet("vulnerability") / FACET_MAX;
    let self_consciousness = profile.neuroticism.facet("self_consciousness") / FACET_MAX;

    let params = GrowthParameters {
        seed,
        max_depth,
        growth_factor,
        flower_stage,
        total_diaries,
        branch_spread: map_facet(profile.openness.facet("adventurousness"), 0.4, 0.9),
        complexity: if profile.openness.facet("intellect") > 6.0 { 4 } else { 3 },
        irregularity: map_facet(
            FACET_MAX - profile.conscientiousness.facet("orderliness"),
            0.1,
            1.2,
        ),
        leaf_density: map_facet(profile.extraversion.facet("gregariousness"), 8.0, 25.0)
            .floor() as u32,
        tree_scale: map_facet(profile.extraversion.facet("activity_level"), 3.5, 5.0)
            * growth_factor,
        bark_noise: map_facet(profile.neuroticism.facet("anxiety"), 0.1, 1.5),
        leaf_color: color::mix_hsl(LEAF_COLOR_LOW, LEAF_COLOR_HIGH, sympathy),
        trunk_color: color::mix_hsl(TRUNK_COLOR_LOW, TRUNK_COLOR_HIGH, depression),
        flower_color: color::mix_hsl(FLOWER_COLOR_LOW, FLOWER_COLOR_HIGH, self_discipline),
        leaf_vitality: trust,
        vulnerability,
        self_consciousness,
    };

    log::debug!(
        "mapped profile for {identifier}: depth={} stage={:?} scale={:.2}",
        params.max_depth,
        params.flower_stage,
        params.tree_scale
    );

    Some(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_with(
        group: fn(&mut TraitProfile) -> &mut crate::profile::FacetGroup,
        facet: &str,
        value: f32,
    ) -> TraitProfile {
        let mut p = TraitProfile::default();
        group(&mut p).set(facet, value);
        p
    }

    fn map_default(days: u32, diaries: u32) -> GrowthParameters {
        let profile = TraitProfile::default();
        map_profile(Some(&profile), "tester", &UsageStats::new(days, diaries)).unwrap()
    }

    #[test]
    fn test_absent_profile_yields_none() {
        assert!(map_profile(None, "alice", &UsageStats::default()).is_none());
    }

    #[test]
    fn test_flower_stage_thresholds() {
        assert_eq!(FlowerStage::from_total_diaries(5), FlowerStage::None);
        assert_eq!(FlowerStage::from_total_diaries(15), FlowerStage::Buds);
        assert_eq!(FlowerStage::from_total_diaries(25), FlowerStage::Mixed);
        assert_eq!(FlowerStage::from_total_diaries(45), FlowerStage::Full);
    }

    #[test]
    fn test_flower_stage_monotonic() {
        let mut last = FlowerStage::None;
        for total in 0..200 {
            let stage = FlowerStage::from_total_diaries(total);
            assert!(stage >= last, "stage regressed at {total} diaries");
            last = stage;
        }
    }

    #[test]
    fn test_max_depth_formula_and_cap() {
        assert_eq!(map_default(1, 0).max_depth, 1);
        assert_eq!(map_default(5, 0).max_depth, 2);
        assert_eq!(map_default(12, 0).max_depth, 3);
        assert_eq!(map_default(40, 0).max_depth, 4);
        // Huge account age never escapes the cap.
        assert_eq!(map_default(1_000_000, 0).max_depth, 4);
    }

    #[test]
    fn test_growth_factor_monotonic() {
        let mut last = 0.0;
        for days in [1, 5, 30, 365, 10_000] {
            let gf = map_default(days, 0).growth_factor;
            assert!(gf > last);
            last = gf;
        }
    }

    #[test]
    fn test_zero_days_clamped() {
        let profile = TraitProfile::default();
        let usage = UsageStats {
            service_days: 0,
            mood_stats: None,
        };
        let params = map_profile(Some(&profile), "x", &usage).unwrap();
        assert_eq!(params.max_depth, 1);
        assert!(params.growth_factor > 1.0);
    }

    #[test]
    fn test_all_missing_equals_all_midpoint() {
        let empty = TraitProfile::default();
        let mut midpoint = TraitProfile::default();
        let groups: [(&mut crate::profile::FacetGroup, &[&str]); 5] = [
            (&mut midpoint.openness, &["adventurousness", "intellect"]),
            (&mut midpoint.conscientiousness, &["orderliness", "self_discipline"]),
            (&mut midpoint.extraversion, &["gregariousness", "activity_level"]),
            (&mut midpoint.agreeableness, &["sympathy", "trust"]),
            (
                &mut midpoint.neuroticism,
                &["anxiety", "depression", "vulnerability", "self_consciousness"],
            ),
        ];
        for (group, facets) in groups {
            for facet in facets {
                group.set(facet, 5.0);
            }
        }

        let usage = UsageStats::new(20, 12);
        let a = map_profile(Some(&empty), "same", &usage).unwrap();
        let b = map_profile(Some(&midpoint), "same", &usage).unwrap();

        // Seeds differ (the serialized profiles differ) but every derived
        // visual parameter must match.
        assert_eq!(a.branch_spread, b.branch_spread);
        assert_eq!(a.complexity, b.complexity);
        assert_eq!(a.irregularity, b.irregularity);
        assert_eq!(a.leaf_density, b.leaf_density);
        assert_eq!(a.tree_scale, b.tree_scale);
        assert_eq!(a.bark_noise, b.bark_noise);
        assert_eq!(a.leaf_color, b.leaf_color);
        assert_eq!(a.trunk_color, b.trunk_color);
        assert_eq!(a.flower_color, b.flower_color);
    }

    #[test]
    fn test_complexity_step_function() {
        let smart = profile_with(|p| &mut p.openness, "intellect", 7.0);
        let plain = profile_with(|p| &mut p.openness, "intellect", 6.0);
        let usage = UsageStats::default();
        assert_eq!(map_profile(Some(&smart), "x", &usage).unwrap().complexity, 4);
        assert_eq!(map_profile(Some(&plain), "x", &usage).unwrap().complexity, 3);
    }

    #[test]
    fn test_irregularity_inverts_orderliness() {
        let tidy = profile_with(|p| &mut p.conscientiousness, "orderliness", 10.0);
        let messy = profile_with(|p| &mut p.conscientiousness, "orderliness", 0.0);
        let usage = UsageStats::default();
        let tidy_p = map_profile(Some(&tidy), "x", &usage).unwrap();
        let messy_p = map_profile(Some(&messy), "x", &usage).unwrap();
        assert!((tidy_p.irregularity - 0.1).abs() < 1e-5);
        assert!((messy_p.irregularity - 1.2).abs() < 1e-5);
    }

    #[test]
    fn test_leaf_density_range() {
        let shy = profile_with(|p| &mut p.extraversion, "gregariousness", 0.0);
        let social = profile_with(|p| &mut p.extraversion, "gregariousness", 10.0);
        let usage = UsageStats::default();
        assert_eq!(map_profile(Some(&shy), "x", &usage).unwrap().leaf_density, 8);
        assert_eq!(map_profile(Some(&social), "x", &usage).unwrap().leaf_density, 25);
    }

    #[test]
    fn test_tree_scale_applies_growth_factor() {
        let profile = TraitProfile::default();
        let young = map_profile(Some(&profile), "x", &UsageStats::new(1, 0)).unwrap();
        let old = map_profile(Some(&profile), "x", &UsageStats::new(400, 0)).unwrap();
        assert!(old.tree_scale > young.tree_scale);
        let base = map_facet(5.0, 3.5, 5.0);
        assert!((young.tree_scale - base * young.growth_factor).abs() < 1e-5);
    }

    #[test]
    fn test_out_of_range_facets_clamped() {
        let wild = profile_with(|p| &mut p.neuroticism, "anxiety", 99.0);
        let capped = profile_with(|p| &mut p.neuroticism, "anxiety", 10.0);
        let usage = UsageStats::default();
        assert_eq!(
            map_profile(Some(&wild), "x", &usage).unwrap().bark_noise,
            map_profile(Some(&capped), "x", &usage).unwrap().bark_noise,
        );
    }

    #[test]
    fn test_high_sympathy_hits_leaf_color_high_end() {
        let kind = profile_with(|p| &mut p.agreeableness, "sympathy", 10.0);
        let params = map_profile(Some(&kind), "alice", &UsageStats::new(40, 45)).unwrap();
        for (got, want) in params.leaf_color.iter().zip(LEAF_COLOR_HIGH) {
            assert!((got - want).abs() < 1e-3);
        }
        assert_eq!(params.flower_stage, FlowerStage::Full);
        assert_eq!(params.max_depth, 4);
    }

    #[test]
    fn test_seed_depends_on_identifier_and_profile() {
        let profile = TraitProfile::default();
        let usage = UsageStats::default();
        let a = map_profile(Some(&profile), "alice", &usage).unwrap();
        let b = map_profile(Some(&profile), "bob", &usage).unwrap();
        assert_ne!(a.seed, b.seed);

        let tweaked = profile_with(|p| &mut p.agreeableness, "trust", 9.0);
        let c = map_profile(Some(&tweaked), "alice", &usage).unwrap();
        assert_ne!(a.seed, c.seed);
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let profile = profile_with(|p| &mut p.agreeableness, "sympathy", 10.0);
        let usage = UsageStats::new(40, 45);
        let a = map_profile(Some(&profile), "alice", &usage).unwrap();
        let b = map_profile(Some(&profile), "alice", &usage).unwrap();
        assert_eq!(a.seed, b.seed);
        let mut ra = a.rng();
        let mut rb = b.rng();
        for _ in 0..32 {
            assert_eq!(ra.next().to_bits(), rb.next().to_bits());
        }
    }
}
