//! Small primitive meshes: Bézier blades (leaves, petals), cylinders,
//! spheres, and the radially-displaced ground disc.

use glam::{Vec2, Vec3};

use super::mesh::Mesh;

/// Samples per Bézier edge when flattening blade outlines.
const BLADE_STEPS: usize = 10;

/// Evaluate a cubic Bézier in 2D.
pub fn cubic_bezier(p0: Vec2, c1: Vec2, c2: Vec2, p1: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * c1 + 3.0 * u * t * t * c2 + t * t * t * p1
}

/// Flat teardrop blade in the XY plane, rooted at the origin, pointing +Y.
///
/// The outline runs from the origin up the right Bézier edge to the tip and
/// mirrors back down the left; `ctrl1`/`ctrl2` give the right edge's control
/// points. Triangulated as a fan around the outline centroid, normals +Z.
pub fn blade_mesh(ctrl1: Vec2, ctrl2: Vec2, tip_y: f32) -> Mesh {
    let base = Vec2::ZERO;
    let tip = Vec2::new(0.0, tip_y);

    let mut outline = Vec::with_capacity(BLADE_STEPS * 2);
    for i in 0..=BLADE_STEPS {
        let t = i as f32 / BLADE_STEPS as f32;
        outline.push(cubic_bezier(base, ctrl1, ctrl2, tip, t));
    }
    let mirror = |p: Vec2| Vec2::new(-p.x, p.y);
    for i in 1..BLADE_STEPS {
        let t = i as f32 / BLADE_STEPS as f32;
        outline.push(cubic_bezier(tip, mirror(ctrl2), mirror(ctrl1), base, t));
    }

    let centroid = outline.iter().copied().sum::<Vec2>() / outline.len() as f32;

    let mut mesh = Mesh::new();
    let span = tip_y.max(1e-6);
    let center_index = mesh.push_vertex(
        Vec3::new(centroid.x, centroid.y, 0.0),
        Vec3::Z,
        [0.5, centroid.y / span],
    );
    for p in &outline {
        mesh.push_vertex(Vec3::new(p.x, p.y, 0.0), Vec3::Z, [0.5 + p.x, p.y / span]);
    }
    let n = outline.len() as u32;
    for i in 0..n {
        let a = center_index + 1 + i;
        let b = center_index + 1 + (i + 1) % n;
        mesh.push_triangle(center_index, a, b);
    }
    mesh
}

/// Open-ended cylinder along Y, centered at the origin.
pub fn cylinder_mesh(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: usize,
) -> Mesh {
    let mut mesh = Mesh::new();
    let half = height * 0.5;
    let slope = (radius_bottom - radius_top) / height;

    for (y, radius) in [(-half, radius_bottom), (half, radius_top)] {
        for j in 0..=radial_segments {
            let angle = j as f32 / radial_segments as f32 * std::f32::consts::TAU;
            let dir = Vec3::new(angle.cos(), 0.0, angle.sin());
            let normal = Vec3::new(dir.x, slope, dir.z).normalize_or(Vec3::X);
            mesh.push_vertex(
                dir * radius + Vec3::Y * y,
                normal,
                [j as f32 / radial_segments as f32, (y + half) / height],
            );
        }
    }

    let stride = radial_segments as u32 + 1;
    for j in 0..radial_segments as u32 {
        mesh.push_triangle(j, stride + j, j + 1);
        mesh.push_triangle(stride + j, stride + j + 1, j + 1);
    }
    mesh
}

/// UV sphere centered at the origin.
pub fn sphere_mesh(radius: f32, width_segments: usize, height_segments: usize) -> Mesh {
    let mut mesh = Mesh::new();

    for i in 0..=height_segments {
        let v = i as f32 / height_segments as f32;
        let phi = v * std::f32::consts::PI;
        for j in 0..=width_segments {
            let u = j as f32 / width_segments as f32;
            let theta = u * std::f32::consts::TAU;
            let normal = Vec3::new(
                phi.sin() * theta.cos(),
                phi.cos(),
                phi.sin() * theta.sin(),
            )
            .normalize_or(Vec3::Y);
            mesh.push_vertex(normal * radius, normal, [u, v]);
        }
    }

    let stride = width_segments as u32 + 1;
    for i in 0..height_segments as u32 {
        for j in 0..width_segments as u32 {
            let a = i * stride + j;
            let b = (i + 1) * stride + j;
            mesh.push_triangle(a, b, a + 1);
            mesh.push_triangle(b, b + 1, a + 1);
        }
    }
    mesh
}

/// Ground disc in the XZ plane with a Gaussian bump at the center.
///
/// Height falls off as `height * exp(-d^2 / spread)`; normals are
/// recomputed from the displaced faces so lighting follows the mound.
pub fn ground_disc_mesh(radius: f32, segments: usize, height: f32, spread: f32) -> Mesh {
    let mut mesh = Mesh::new();
    let bump = |d: f32| height * (-(d * d) / spread).exp();

    mesh.push_vertex(Vec3::new(0.0, bump(0.0), 0.0), Vec3::Y, [0.5, 0.5]);
    for ring in 1..=segments {
        let d = ring as f32 / segments as f32 * radius;
        for j in 0..segments {
            let angle = j as f32 / segments as f32 * std::f32::consts::TAU;
            let x = angle.cos() * d;
            let z = angle.sin() * d;
            mesh.push_vertex(
                Vec3::new(x, bump(d), z),
                Vec3::Y,
                [0.5 + x / (2.0 * radius), 0.5 + z / (2.0 * radius)],
            );
        }
    }

    let ring_index = |ring: usize, j: usize| 1 + (ring - 1) * segments + j % segments;
    for j in 0..segments {
        mesh.push_triangle(0, ring_index(1, j + 1) as u32, ring_index(1, j) as u32);
    }
    for ring in 1..segments {
        for j in 0..segments {
            let a = ring_index(ring, j) as u32;
            let b = ring_index(ring, j + 1) as u32;
            let c = ring_index(ring + 1, j) as u32;
            let d = ring_index(ring + 1, j + 1) as u32;
            mesh.push_triangle(a, d, c);
            mesh.push_triangle(a, b, d);
        }
    }

    mesh.recompute_normals();
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cubic_bezier_endpoints() {
        let p0 = Vec2::ZERO;
        let p1 = Vec2::new(0.0, 1.0);
        let c1 = Vec2::new(0.5, 0.2);
        let c2 = Vec2::new(0.5, 0.8);
        assert!((cubic_bezier(p0, c1, c2, p1, 0.0) - p0).length() < 1e-6);
        assert!((cubic_bezier(p0, c1, c2, p1, 1.0) - p1).length() < 1e-6);
    }

    #[test]
    fn test_blade_rooted_and_symmetric() {
        let mesh = blade_mesh(Vec2::new(0.2, 0.15), Vec2::new(0.4, 0.35), 0.6);
        let aabb = mesh.aabb();
        // Rooted at the origin, pointing up.
        assert!(aabb.min.y >= -1e-5);
        assert!((aabb.max.y - 0.6).abs() < 1e-4);
        // Mirrored outline is symmetric in X.
        assert!((aabb.min.x + aabb.max.x).abs() < 1e-4);
        // Flat in Z.
        assert!(aabb.size().z.abs() < 1e-6);
        assert!(mesh.triangle_count() > 0);
    }

    #[test]
    fn test_cylinder_counts_and_radius() {
        let mesh = cylinder_mesh(0.003, 0.003, 0.16, 4);
        assert_eq!(mesh.vertex_count(), 2 * 5);
        assert_eq!(mesh.triangle_count(), 8);
        let aabb = mesh.aabb();
        assert!((aabb.size().y - 0.16).abs() < 1e-6);
    }

    #[test]
    fn test_sphere_on_surface() {
        let mesh = sphere_mesh(2.0, 8, 6);
        for v in &mesh.vertices {
            let p = Vec3::from_array(v.position);
            assert!((p.length() - 2.0).abs() < 1e-4);
            // Sphere normals are radial.
            let n = Vec3::from_array(v.normal);
            assert!((n - p / 2.0).length() < 1e-4);
        }
    }

    #[test]
    fn test_ground_disc_bump() {
        let mesh = ground_disc_mesh(7.0, 16, 1.8, 20.0);
        let aabb = mesh.aabb();
        // Peak at the center, flattening toward the rim.
        assert!((aabb.max.y - 1.8).abs() < 1e-4);
        assert!(aabb.min.y >= 0.0);
        let rim = mesh
            .vertices
            .iter()
            .map(|v| Vec3::from_array(v.position))
            .filter(|p| Vec3::new(p.x, 0.0, p.z).length() > 6.9)
            .map(|p| p.y)
            .fold(f32::MIN, f32::max);
        assert!(rim < 0.2);
    }

    #[test]
    fn test_ground_disc_normals_recomputed() {
        let mesh = ground_disc_mesh(7.0, 16, 1.8, 20.0);
        // Slope vertices lean their normals off the vertical.
        let tilted = mesh.vertices.iter().any(|v| {
            let n = Vec3::from_array(v.normal);
            (n - Vec3::Y).length() > 0.05
        });
        assert!(tilted);
        for v in &mesh.vertices {
            assert!((Vec3::from_array(v.normal).length() - 1.0).abs() < 1e-4);
        }
    }
}
