//! Ground hill: a radially symmetric Gaussian mound.

use crate::atmosphere::MOON_GLOW_THRESHOLD;
use crate::core::color::{self, Rgb};
use crate::geometry::{primitives, Mesh};

/// Disc radius in world units.
pub const HILL_RADIUS: f32 = 7.0;
/// Ring/segment resolution of the disc.
pub const HILL_SEGMENTS: usize = 64;
/// Peak height of the mound.
pub const HILL_HEIGHT: f32 = 1.8;
/// Gaussian falloff width.
pub const HILL_SPREAD: f32 = 20.0;

/// Warm daylight ground color.
pub const HILL_DAY_COLOR: Rgb = color::from_hex(0xE2C6AB);
/// Cool ground color once the night glow takes over.
pub const HILL_NIGHT_COLOR: Rgb = color::from_hex(0x2C3E50);

/// Build the hill mesh. Sits just below the trunk base so the tree reads as
/// planted, not floating.
pub fn build_hill() -> Mesh {
    let mut mesh =
        primitives::ground_disc_mesh(HILL_RADIUS, HILL_SEGMENTS, HILL_HEIGHT, HILL_SPREAD);
    mesh.transform(glam::Mat4::from_translation(glam::Vec3::new(0.0, -0.05, 0.0)));
    mesh
}

/// Ground color for the current glow level.
pub fn hill_color(glow_intensity: f32) -> Rgb {
    if glow_intensity > MOON_GLOW_THRESHOLD {
        HILL_NIGHT_COLOR
    } else {
        HILL_DAY_COLOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_hill_shape() {
        let mesh = build_hill();
        let aabb = mesh.aabb();
        assert!((aabb.max.y - (HILL_HEIGHT - 0.05)).abs() < 1e-3);
        assert!(aabb.min.y >= -0.06);
        assert!((aabb.max.x - HILL_RADIUS).abs() < 1e-3);
    }

    #[test]
    fn test_hill_peak_at_center() {
        let mesh = build_hill();
        let peak = mesh
            .vertices
            .iter()
            .map(|v| Vec3::from_array(v.position))
            .max_by(|a, b| a.y.total_cmp(&b.y))
            .unwrap();
        assert!(Vec3::new(peak.x, 0.0, peak.z).length() < 0.5);
    }

    #[test]
    fn test_hill_color_switches_at_night() {
        assert_eq!(hill_color(0.1), HILL_DAY_COLOR);
        assert_eq!(hill_color(0.5), HILL_DAY_COLOR);
        assert_eq!(hill_color(1.5), HILL_NIGHT_COLOR);
    }
}
