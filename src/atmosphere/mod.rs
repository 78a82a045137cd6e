//! Day/night environment interpolation.
//!
//! A fixed keyframe table maps a time-of-day slider value in [0, 100] to sky
//! gradient colors, light intensities, and night glow. Sampling is a pure,
//! stateless function: identical input always yields identical output, and
//! it is re-evaluated on every time change rather than cached.

pub mod keyframe;
pub mod state;

pub use keyframe::{interpolate, TimeKeyframe, TIME_KEYFRAMES};
pub use state::{EnvironmentState, EnvironmentUniform};

/// Glow level above which the night point light ("moon") switches on.
pub const MOON_GLOW_THRESHOLD: f32 = 0.5;
