//! Tapered tube mesh along a branch curve.
//!
//! Sweeps a ring of vertices along the curve using a parallel-transport
//! frame (no twist pop when the tangent flips past the reference axis).
//! Radius tapers linearly from base to top, and a sinusoidal ripple keyed
//! to the ring angle and the position along the curve roughs the surface
//! up into bark.

use glam::{Quat, Vec3};

use super::curve::BranchCurve;
use super::mesh::Mesh;

/// Rings along the curve.
const LENGTH_SEGMENTS: usize = 12;
/// Vertices around each ring.
const RADIAL_SEGMENTS: usize = 8;

/// Build a tapered, bark-perturbed tube around `curve`.
///
/// `noise_level` scales the bark ripple; 0 gives a clean surface.
pub fn build_tapered_tube(
    curve: &BranchCurve,
    base_radius: f32,
    top_radius: f32,
    noise_level: f32,
) -> Mesh {
    let mut mesh = Mesh::new();

    let mut frame_normal = Vec3::X;
    let mut prev_tangent = curve.tangent_at(0.0);

    for i in 0..=LENGTH_SEGMENTS {
        let t = i as f32 / LENGTH_SEGMENTS as f32;
        let point = curve.point_at(t);
        let radius = base_radius * (1.0 - t) + top_radius * t;
        let tangent = curve.tangent_at(t);

        // Parallel transport: rotate the frame by the tangent delta.
        let axis = prev_tangent.cross(tangent);
        if axis.length() > 1e-5 {
            let angle = prev_tangent.dot(tangent).clamp(-1.0, 1.0).acos();
            frame_normal = Quat::from_axis_angle(axis.normalize(), angle) * frame_normal;
        }
        let binormal = tangent.cross(frame_normal).normalize_or(Vec3::Z);
        frame_normal = binormal.cross(tangent).normalize_or(Vec3::X);
        prev_tangent = tangent;

        for j in 0..=RADIAL_SEGMENTS {
            let angle = j as f32 / RADIAL_SEGMENTS as f32 * std::f32::consts::TAU;
            let ripple = (angle * 3.0 + t * 5.0).sin() * radius * 0.1 * noise_level;
            let r = radius + ripple;
            let radial = frame_normal * angle.cos() + binormal * angle.sin();
            mesh.push_vertex(
                point + radial * r,
                radial.normalize_or(Vec3::X),
                [j as f32 / RADIAL_SEGMENTS as f32, t],
            );
        }
    }

    let stride = RADIAL_SEGMENTS as u32 + 1;
    for i in 0..LENGTH_SEGMENTS as u32 {
        for j in 0..RADIAL_SEGMENTS as u32 {
            let a = i * stride + j;
            let b = (i + 1) * stride + j;
            let c = i * stride + j + 1;
            let d = (i + 1) * stride + j + 1;
            mesh.push_triangle(a, b, c);
            mesh.push_triangle(b, d, c);
        }
    }

    mesh
}
