//! # Primitive Shape Generation
//!
//! Mesh builders for the box and plane shapes. All shapes are generated with
//! outward normals and per-face texture coordinates.

use super::GeometryData;

/// Generate an axis-aligned box centered at the origin.
///
/// Extents run from `-width/2` to `width/2` in X, `-height/2` to `height/2`
/// in Y, and `-depth/2` to `depth/2` in Z. Each face carries its own four
/// vertices so normals stay flat, with UVs from 0 to 1.
pub fn generate_box(width: f32, height: f32, depth: f32) -> GeometryData {
    let hw = width * 0.5;
    let hh = height * 0.5;
    let hd = depth * 0.5;

    let positions = vec![
        // Front face (+Z)
        [-hw, -hh, hd],
        [hw, -hh, hd],
        [hw, hh, hd],
        [-hw, hh, hd],
        // Back face (-Z)
        [hw, -hh, -hd],
        [-hw, -hh, -hd],
        [-hw, hh, -hd],
        [hw, hh, -hd],
        // Left face (-X)
        [-hw, -hh, -hd],
        [-hw, -hh, hd],
        [-hw, hh, hd],
        [-hw, hh, -hd],
        // Right face (+X)
        [hw, -hh, hd],
        [hw, -hh, -hd],
        [hw, hh, -hd],
        [hw, hh, hd],
        // Top face (+Y)
        [-hw, hh, hd],
        [hw, hh, hd],
        [hw, hh, -hd],
        [-hw, hh, -hd],
        // Bottom face (-Y)
        [-hw, -hh, -hd],
        [hw, -hh, -hd],
        [hw, -hh, hd],
        [-hw, -hh, hd],
    ];

    let normals = vec![
        [0.0, 0.0, 1.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
        [0.0, 0.0, -1.0],
        [0.0, 0.0, -1.0],
        [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0],
        [-1.0, 0.0, 0.0],
        [-1.0, 0.0, 0.0],
        [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
        [0.0, -1.0, 0.0],
        [0.0, -1.0, 0.0],
        [0.0, -1.0, 0.0],
    ];

    // Same UV layout on every face; v runs top-down so decoded images
    // (top row first) display upright
    let face_uvs = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
    let uvs = (0..6).flat_map(|_| face_uvs).collect();

    // Two counter-clockwise triangles per face
    let indices = (0..6u32)
        .flat_map(|face| {
            let base = face * 4;
            [base, base + 1, base + 2, base + 2, base + 3, base]
        })
        .collect();

    GeometryData {
        positions,
        normals,
        uvs,
        indices,
    }
}

/// Generate a single quad in the XY plane, facing +Z.
///
/// Extents run from `-width/2` to `width/2` in X and `-height/2` to
/// `height/2` in Y. UVs put (0, 0) at the top-left corner so images sample
/// upright.
pub fn generate_plane(width: f32, height: f32) -> GeometryData {
    let hw = width * 0.5;
    let hh = height * 0.5;

    GeometryData {
        positions: vec![[-hw, -hh, 0.0], [hw, -hh, 0.0], [hw, hh, 0.0], [-hw, hh, 0.0]],
        normals: vec![
            [0.0, 0.0, 1.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, 1.0],
        ],
        uvs: vec![[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]],
        indices: vec![0, 1, 2, 2, 3, 0],
    }
}
