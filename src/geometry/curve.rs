//! Smoothed branch centerline.
//!
//! A Catmull-Rom spline through three control points (start, jittered
//! midpoint, end) with an arc-length lookup table, so sampling by `t` moves
//! uniformly along the curve rather than uniformly in parameter space.

use glam::Vec3;

/// Samples for the arc-length table.
const ARC_SAMPLES: usize = 64;

/// Length below which a curve counts as degenerate.
pub const DEGENERATE_LENGTH: f32 = 1e-6;

/// Catmull-Rom curve through three control points.
#[derive(Clone, Debug)]
pub struct BranchCurve {
    points: [Vec3; 3],
    /// Cumulative arc lengths at `ARC_SAMPLES + 1` uniform parameters.
    arc_table: Vec<f32>,
}

fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, s: f32) -> Vec3 {
    let s2 = s * s;
    let s3 = s2 * s;
    0.5 * (2.0 * p1
        + (p2 - p0) * s
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * s2
        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * s3)
}

fn catmull_rom_derivative(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, s: f32) -> Vec3 {
    let s2 = s * s;
    0.5 * ((p2 - p0)
        + 2.0 * (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * s
        + 3.0 * (3.0 * p1 - p0 - 3.0 * p2 + p3) * s2)
}

impl BranchCurve {
    /// Build the spline and its arc-length table.
    pub fn new(start: Vec3, mid: Vec3, end: Vec3) -> Self {
        let mut curve = Self {
            points: [start, mid, end],
            arc_table: Vec::new(),
        };

        let mut table = Vec::with_capacity(ARC_SAMPLES + 1);
        let mut total = 0.0;
        let mut prev = curve.point_raw(0.0);
        table.push(0.0);
        for i in 1..=ARC_SAMPLES {
            let p = curve.point_raw(i as f32 / ARC_SAMPLES as f32);
            total += (p - prev).length();
            table.push(total);
            prev = p;
        }
        curve.arc_table = table;
        curve
    }

    /// Total curve length.
    pub fn length(&self) -> f32 {
        *self.arc_table.last().unwrap_or(&0.0)
    }

    /// Whether the curve is too short to place anything on.
    pub fn is_degenerate(&self) -> bool {
        self.length() < DEGENERATE_LENGTH
    }

    pub fn start(&self) -> Vec3 {
        self.points[0]
    }

    pub fn end(&self) -> Vec3 {
        self.points[2]
    }

    /// Select the spline segment for raw parameter `t` in [0, 1].
    ///
    /// Phantom endpoints are mirrored control points, matching the
    /// end-clamped spline the midpoint jitter was tuned against.
    fn segment(&self, t: f32) -> (Vec3, Vec3, Vec3, Vec3, f32) {
        let [a, b, c] = self.points;
        let u = t.clamp(0.0, 1.0) * 2.0;
        if u <= 1.0 {
            (2.0 * a - b, a, b, c, u)
        } else {
            (a, b, c, 2.0 * c - b, u - 1.0)
        }
    }

    /// Position at raw parameter `t` (non-uniform speed).
    fn point_raw(&self, t: f32) -> Vec3 {
        let (p0, p1, p2, p3, s) = self.segment(t);
        catmull_rom(p0, p1, p2, p3, s)
    }

    /// Map an arc-length fraction `u` onto the raw parameter.
    fn arc_to_raw(&self, u: f32) -> f32 {
        let total = self.length();
        if total < DEGENERATE_LENGTH {
            return 0.0;
        }
        let target = u.clamp(0.0, 1.0) * total;
        // Binary search the cumulative table for the bracketing sample.
        let mut lo = 0;
        let mut hi = self.arc_table.len() - 1;
        while lo + 1 < hi {
            let mid = (lo + hi) / 2;
            if self.arc_table[mid] < target {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        let span = self.arc_table[hi] - self.arc_table[lo];
        let frac = if span > 0.0 {
            (target - self.arc_table[lo]) / span
        } else {
            0.0
        };
        (lo as f32 + frac) / ARC_SAMPLES as f32
    }

    /// Position at arc-length fraction `u` in [0, 1].
    pub fn point_at(&self, u: f32) -> Vec3 {
        self.point_raw(self.arc_to_raw(u))
    }

    /// Unit tangent at arc-length fraction `u`.
    ///
    /// Degenerate curves report world-up so downstream frames stay finite.
    pub fn tangent_at(&self, u: f32) -> Vec3 {
        let (p0, p1, p2, p3, s) = self.segment(self.arc_to_raw(u));
        catmull_rom_derivative(p0, p1, p2, p3, s).normalize_or(Vec3::Y)
    }
}
