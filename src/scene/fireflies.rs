//! Ambient firefly particles.
//!
//! Spawn state is computed once from a seed; the per-frame update only
//! advances heights and derives instance transforms, it never reallocates
//! or regenerates particles.

use glam::Vec3;

use crate::core::color::{self, Rgb};
use crate::core::GrowthRng;

/// Default particle count for the interactive scene.
pub const FIREFLY_COUNT: usize = 50;
/// Height at which a particle wraps back to the ground.
const HEIGHT_CEILING: f32 = 15.0;
/// Horizontal spawn extent (centered on the tree).
const SPAWN_EXTENT: f32 = 25.0;
/// Lateral sway amplitude.
const SWAY_AMPLITUDE: f32 = 0.5;

/// Firefly body color.
pub const FIREFLY_COLOR: Rgb = color::from_hex(0xFFFF88);
/// Firefly emissive color.
pub const FIREFLY_EMISSIVE: Rgb = color::from_hex(0xFFFF44);

/// One particle's immutable spawn state plus its current height.
#[derive(Clone, Copy, Debug)]
struct Firefly {
    base_x: f32,
    base_z: f32,
    y: f32,
    /// Rise per frame at the 60 Hz reference rate.
    speed: f32,
    /// Sway phase offset.
    phase: f32,
}

/// Per-frame render state of one firefly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FireflyInstance {
    pub position: Vec3,
    pub scale: f32,
    pub opacity: f32,
    pub emissive_intensity: f32,
}

/// The firefly swarm.
#[derive(Clone, Debug)]
pub struct FireflySystem {
    particles: Vec<Firefly>,
}

impl FireflySystem {
    /// Spawn `count` particles deterministically from `seed`.
    pub fn new(count: usize, seed: u32) -> Self {
        let mut rng = GrowthRng::new(seed);
        let particles = (0..count)
            .map(|_| Firefly {
                base_x: (rng.next() - 0.5) * SPAWN_EXTENT,
                y: rng.next() * HEIGHT_CEILING,
                base_z: (rng.next() - 0.5) * SPAWN_EXTENT,
                speed: 0.005 + rng.next() * 0.015,
                phase: rng.next() * std::f32::consts::TAU,
            })
            .collect();
        Self { particles }
    }

    pub fn count(&self) -> usize {
        self.particles.len()
    }

    /// Advance particle heights by `dt` seconds (speeds are tuned per 60 Hz
    /// frame). Particles wrap to the ground past the ceiling.
    pub fn update(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.y += p.speed * dt * 60.0;
            if p.y > HEIGHT_CEILING {
                p.y = 0.0;
            }
        }
    }

    /// Current instance transforms for `elapsed` seconds of animation time
    /// and the given glow level. Fireflies fade out entirely in daylight.
    pub fn instances(&self, elapsed: f32, glow_intensity: f32) -> Vec<FireflyInstance> {
        let glow = glow_intensity.min(1.0);
        self.particles
            .iter()
            .map(|p| {
                let x = p.base_x + (elapsed + p.phase).sin() * SWAY_AMPLITUDE;
                let z = p.base_z + (elapsed + p.phase).cos() * SWAY_AMPLITUDE;
                let scale = ((elapsed * 2.0 + p.phase).sin() + 1.2) * 0.06 * glow;
                FireflyInstance {
                    position: Vec3::new(x, p.y, z),
                    scale,
                    opacity: glow_intensity.min(0.8),
                    emissive_intensity: glow_intensity * 5.0,
                }
            })
            .collect()
    }
}
