//! Keyframe table and interpolation over the day cycle.

use crate::core::color::{self, Rgb};

use super::state::EnvironmentState;

/// One keyframe of the day cycle.
#[derive(Clone, Copy, Debug)]
pub struct TimeKeyframe {
    /// Slider position in [0, 100].
    pub pos: f32,
    /// Sky gradient top color.
    pub top: Rgb,
    /// Sky gradient bottom color; doubles as the sun tint.
    pub bottom: Rgb,
    /// Ambient light intensity.
    pub ambient: f32,
    /// Directional sun intensity.
    pub sun: f32,
    /// Night-time emissive glow intensity.
    pub glow: f32,
}

/// The day cycle: deep night, pre-dawn, sunrise, noon, sunset, early night,
/// deep night. First and last entries match so the cycle closes on itself.
pub static TIME_KEYFRAMES: [TimeKeyframe; 7] = [
    TimeKeyframe {
        pos: 0.0,
        top: color::from_hex(0x020024),
        bottom: color::from_hex(0x090979),
        ambient: 0.1,
        sun: 0.0,
        glow: 1.5,
    },
    TimeKeyframe {
        pos: 20.0,
        top: color::from_hex(0x2C3E50),
        bottom: color::from_hex(0xBDC3C7),
        ambient: 0.3,
        sun: 0.3,
        glow: 0.8,
    },
    TimeKeyframe {
        pos: 40.0,
        top: color::from_hex(0xFF7E5F),
        bottom: color::from_hex(0xFEB47B),
        ambient: 0.5,
        sun: 0.8,
        glow: 0.4,
    },
    TimeKeyframe {
        pos: 50.0,
        top: color::from_hex(0x2980B9),
        bottom: color::from_hex(0x6DD5FA),
        ambient: 0.7,
        sun: 1.2,
        glow: 0.1,
    },
    TimeKeyframe {
        pos: 70.0,
        top: color::from_hex(0x2C3E50),
        bottom: color::from_hex(0xFD746C),
        ambient: 0.5,
        sun: 0.8,
        glow: 0.4,
    },
    TimeKeyframe {
        pos: 85.0,
        top: color::from_hex(0x141E30),
        bottom: color::from_hex(0x243B55),
        ambient: 0.2,
        sun: 0.2,
        glow: 0.8,
    },
    TimeKeyframe {
        pos: 100.0,
        top: color::from_hex(0x020024),
        bottom: color::from_hex(0x090979),
        ambient: 0.1,
        sun: 0.0,
        glow: 1.5,
    },
];

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Sample the environment at slider position `pos`.
///
/// Out-of-range input clamps to the cycle ends. Keyframe positions increase
/// monotonically, so the first bracketing pair found is the only one; a
/// zero-width interval returns its start keyframe.
pub fn interpolate(pos: f32) -> EnvironmentState {
    let pos = pos.clamp(0.0, 100.0);

    let mut start = &TIME_KEYFRAMES[0];
    let mut end = &TIME_KEYFRAMES[TIME_KEYFRAMES.len() - 1];
    for pair in TIME_KEYFRAMES.windows(2) {
        if pos >= pair[0].pos && pos <= pair[1].pos {
            start = &pair[0];
            end = &pair[1];
            break;
        }
    }

    let span = end.pos - start.pos;
    let ratio = if span == 0.0 { 0.0 } else { (pos - start.pos) / span };

    let bottom = color::mix_hsl(start.bottom, end.bottom, ratio);
    EnvironmentState {
        top_color: color::mix_hsl(start.top, end.top, ratio),
        bottom_color: bottom,
        ambient_intensity: lerp(start.ambient, end.ambient, ratio),
        sun_intensity: lerp(start.sun, end.sun, ratio),
        glow_intensity: lerp(start.glow, end.glow, ratio),
        sun_color: bottom,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_rgb(a: Rgb, b: Rgb, eps: f32) -> bool {
        a.iter().zip(b).all(|(x, y)| (x - y).abs() < eps)
    }

    #[test]
    fn test_keyframes_monotonic() {
        for pair in TIME_KEYFRAMES.windows(2) {
            assert!(pair[0].pos < pair[1].pos);
        }
    }

    #[test]
    fn test_cycle_closes() {
        let midnight = interpolate(0.0);
        let next_midnight = interpolate(100.0);
        assert_eq!(midnight.ambient_intensity, next_midnight.ambient_intensity);
        assert_eq!(midnight.sun_intensity, next_midnight.sun_intensity);
        assert_eq!(midnight.glow_intensity, next_midnight.glow_intensity);
        assert!(approx_rgb(midnight.top_color, next_midnight.top_color, 1e-6));
        assert!(approx_rgb(midnight.bottom_color, next_midnight.bottom_color, 1e-6));
    }

    #[test]
    fn test_exact_keyframe_returns_its_values() {
        let noon = interpolate(50.0);
        assert!((noon.ambient_intensity - 0.7).abs() < 1e-6);
        assert!((noon.sun_intensity - 1.2).abs() < 1e-6);
        assert!((noon.glow_intensity - 0.1).abs() < 1e-6);
        assert!(approx_rgb(noon.top_color, color::from_hex(0x2980B9), 1e-4));
    }

    #[test]
    fn test_scalar_midpoint() {
        // Halfway between pos=0 (ambient 0.1) and pos=20 (ambient 0.3).
        let dawn = interpolate(10.0);
        assert!((dawn.ambient_intensity - 0.2).abs() < 1e-5);
        assert!((dawn.sun_intensity - 0.15).abs() < 1e-5);
        assert!((dawn.glow_intensity - 1.15).abs() < 1e-5);
    }

    #[test]
    fn test_sun_color_tracks_bottom() {
        for pos in [0.0, 13.0, 42.0, 50.0, 77.5, 100.0] {
            let env = interpolate(pos);
            assert_eq!(env.sun_color, env.bottom_color);
        }
    }

    #[test]
    fn test_out_of_range_clamps() {
        let low = interpolate(-40.0);
        let high = interpolate(250.0);
        assert_eq!(low.glow_intensity, interpolate(0.0).glow_intensity);
        assert_eq!(high.glow_intensity, interpolate(100.0).glow_intensity);
    }

    #[test]
    fn test_pure_function() {
        for pos in 0..=100 {
            let a = interpolate(pos as f32);
            let b = interpolate(pos as f32);
            assert_eq!(a.glow_intensity.to_bits(), b.glow_intensity.to_bits());
            assert_eq!(a.top_color, b.top_color);
        }
    }
}
