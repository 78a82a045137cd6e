//! Color utilities
//!
//! Colors are linear `[r, g, b]` arrays in [0, 1]. Blending between two
//! colors runs through hue/saturation/lightness space so that midpoints
//! keep their saturation instead of washing out the way a plain RGB lerp
//! does.

use palette::{FromColor, Hsl, Mix, Srgb};

/// A color as `[r, g, b]`, each channel in [0, 1].
pub type Rgb = [f32; 3];

/// Convert a `0xRRGGBB` literal into an [`Rgb`].
pub const fn from_hex(hex: u32) -> Rgb {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}

/// Blend two colors in HSL space by `factor` (clamped to [0, 1]).
///
/// Hue takes the shortest path around the wheel; saturation and lightness
/// interpolate linearly.
pub fn mix_hsl(a: Rgb, b: Rgb, factor: f32) -> Rgb {
    let factor = factor.clamp(0.0, 1.0);
    let ha = Hsl::from_color(Srgb::new(a[0], a[1], a[2]));
    let hb = Hsl::from_color(Srgb::new(b[0], b[1], b[2]));
    let mixed = Srgb::from_color(ha.mix(hb, factor));
    [mixed.red, mixed.green, mixed.blue]
}

/// Darken a color toward black by `factor` in plain RGB.
///
/// The factor is clamped to [0, 0.2]: inner petal layers shade slightly,
/// they never go fully dark.
pub fn darken(c: Rgb, factor: f32) -> Rgb {
    let f = factor.clamp(0.0, 0.2);
    [c[0] * (1.0 - f), c[1] * (1.0 - f), c[2] * (1.0 - f)]
}

/// Plain RGB lerp, used where perceptual blending is not wanted
/// (environment debug paths, tests).
pub fn lerp(a: Rgb, b: Rgb, t: f32) -> Rgb {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}
