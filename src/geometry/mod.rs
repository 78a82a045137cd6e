//! Geometry construction: meshes, curves, and the primitive builders the
//! tree and its environment are assembled from.

pub mod curve;
pub mod mesh;
pub mod primitives;
pub mod tube;

pub use curve::BranchCurve;
pub use mesh::{Aabb, Mesh, Vertex};
pub use tube::build_tapered_tube;
