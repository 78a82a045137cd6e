//! Triangle mesh with GPU-uploadable vertices.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use serde::Serialize;

/// One mesh vertex. Layout matches the consuming surface's vertex buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Axis-aligned bounding box of a mesh.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Empty box that any expansion will overwrite.
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::MAX),
            max: Vec3::splat(f32::MIN),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Expand to include a point.
    pub fn expand(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }
}

/// Indexed triangle mesh.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3, uv: [f32; 2]) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(Vertex {
            position: position.to_array(),
            normal: normal.to_array(),
            uv,
        });
        index
    }

    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Bounding box over all vertex positions.
    pub fn aabb(&self) -> Aabb {
        let mut aabb = Aabb::empty();
        for v in &self.vertices {
            aabb.expand(Vec3::from_array(v.position));
        }
        aabb
    }

    /// Append another mesh, offsetting its indices.
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + offset));
    }

    /// Bake a transform into positions and normals.
    ///
    /// Normals use the rotation part only; transforms here are rigid plus
    /// uniform scale.
    pub fn transform(&mut self, mat: Mat4) {
        let normal_mat = glam::Mat3::from_mat4(mat);
        for v in &mut self.vertices {
            let p = mat.transform_point3(Vec3::from_array(v.position));
            let n = (normal_mat * Vec3::from_array(v.normal)).normalize_or_zero();
            v.position = p.to_array();
            v.normal = n.to_array();
        }
    }

    /// Recompute smooth vertex normals from face geometry.
    ///
    /// Face normals are accumulated area-weighted per vertex, then
    /// normalized; needed after displacing vertices (the ground bump).
    pub fn recompute_normals(&mut self) {
        let mut sums = vec![Vec3::ZERO; self.vertices.len()];
        for tri in self.indices.chunks_exact(3) {
            let a = Vec3::from_array(self.vertices[tri[0] as usize].position);
            let b = Vec3::from_array(self.vertices[tri[1] as usize].position);
            let c = Vec3::from_array(self.vertices[tri[2] as usize].position);
            let face = (b - a).cross(c - a);
            for &i in tri {
                sums[i as usize] += face;
            }
        }
        for (v, sum) in self.vertices.iter_mut().zip(sums) {
            v.normal = sum.normalize_or(Vec3::Y).to_array();
        }
    }
}
