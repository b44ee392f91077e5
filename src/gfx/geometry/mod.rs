//! # Procedural Geometry
//!
//! Generators for the primitive shapes the stage uses. All shapes come with
//! outward normals and UV coordinates and are ready for GPU upload.
//!
//! - **Box**: axis-aligned cuboid centered at the origin
//! - **Plane**: single quad in the XY plane facing +Z

pub mod primitives;

pub use primitives::*;

use crate::gfx::scene::vertex::Vertex3D;

/// The shape a drawable was built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryKind {
    Box { width: f32, height: f32, depth: f32 },
    Plane { width: f32, height: f32 },
}

impl GeometryKind {
    /// Generate the mesh for this shape.
    pub fn generate(&self) -> GeometryData {
        match *self {
            GeometryKind::Box {
                width,
                height,
                depth,
            } => generate_box(width, height, depth),
            GeometryKind::Plane { width, height } => generate_plane(width, height),
        }
    }
}

/// Generated geometry data ready for GPU upload.
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub positions: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub uvs: Vec<[f32; 2]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Number of vertices in this geometry.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles in this geometry.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleave into the vertex format the renderer consumes.
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        (0..self.positions.len())
            .map(|i| Vertex3D {
                position: self.positions[i],
                normal: self.normals.get(i).copied().unwrap_or([0.0, 0.0, 1.0]),
                uv: self.uvs.get(i).copied().unwrap_or([0.0, 0.0]),
            })
            .collect()
    }
}
