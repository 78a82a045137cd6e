//! Environment snapshot and GPU uniform.

use bytemuck::{Pod, Zeroable};
use serde::Serialize;

use crate::core::color::Rgb;

/// Environment snapshot for one time-of-day value.
///
/// Recomputed on every time change by [`super::interpolate`]; holds no
/// state of its own.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EnvironmentState {
    /// Sky gradient top color.
    pub top_color: Rgb,
    /// Sky gradient bottom color.
    pub bottom_color: Rgb,
    pub ambient_intensity: f32,
    pub sun_intensity: f32,
    /// Night glow driving foliage emissives, fireflies, and the moon light.
    pub glow_intensity: f32,
    /// Sun tint; follows the gradient bottom color.
    pub sun_color: Rgb,
}

impl Default for EnvironmentState {
    fn default() -> Self {
        super::interpolate(50.0)
    }
}

impl EnvironmentState {
    /// Fixed lighting for the static report rendering: neutral, bright, and
    /// just enough glow to keep foliage colors vivid.
    pub fn report() -> Self {
        Self {
            top_color: [1.0; 3],
            bottom_color: [1.0; 3],
            ambient_intensity: 0.8,
            sun_intensity: 1.0,
            glow_intensity: 0.2,
            sun_color: [1.0; 3],
        }
    }
}

/// GPU-ready environment uniform.
///
/// `vec3` fields are padded to 16-byte alignment for WGSL compatibility.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct EnvironmentUniform {
    pub top_color: [f32; 3],
    pub ambient_intensity: f32,
    pub bottom_color: [f32; 3],
    pub sun_intensity: f32,
    pub sun_color: [f32; 3],
    pub glow_intensity: f32,
}

impl From<&EnvironmentState> for EnvironmentUniform {
    fn from(s: &EnvironmentState) -> Self {
        Self {
            top_color: s.top_color,
            ambient_intensity: s.ambient_intensity,
            bottom_color: s.bottom_color,
            sun_intensity: s.sun_intensity,
            sun_color: s.sun_color,
            glow_intensity: s.glow_intensity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_size_alignment() {
        let size = std::mem::size_of::<EnvironmentUniform>();
        assert_eq!(size % 16, 0, "EnvironmentUniform size {size} is not 16-byte aligned");
    }

    #[test]
    fn test_bytemuck_cast() {
        let state = EnvironmentState::default();
        let uniform = EnvironmentUniform::from(&state);
        let bytes = bytemuck::bytes_of(&uniform);
        assert_eq!(bytes.len(), std::mem::size_of::<EnvironmentUniform>());
    }

    #[test]
    fn test_from_state() {
        let state = EnvironmentState::report();
        let uniform = EnvironmentUniform::from(&state);
        assert_eq!(uniform.glow_intensity, 0.2);
        assert_eq!(uniform.ambient_intensity, 0.8);
        assert_eq!(uniform.sun_color, state.sun_color);
    }

    #[test]
    fn test_default_is_noon() {
        let state = EnvironmentState::default();
        assert!((state.sun_intensity - 1.2).abs() < 1e-6);
    }
}
