//! # Procedural Geometry Generation
//!
//! This module produces every mesh in the scene procedurally; there is no
//! model-file pipeline. Two shape families cover all of it:
//!
//! - **UV sphere** (boulders): [`tessellate_sphere`]
//! - **Flat grids** (stones, ground): [`tessellate_cuboid`],
//!   [`tessellate_ground`] and the degenerate [`tessellate_quad`]
//!
//! All generators fill a [`GeometryData`], which the renderable objects hand
//! to the backend for a one-time buffer upload.
//!
//! [`tessellate_sphere`]: primitives::tessellate_sphere
//! [`tessellate_cuboid`]: primitives::tessellate_cuboid
//! [`tessellate_ground`]: primitives::tessellate_ground
//! [`tessellate_quad`]: primitives::tessellate_quad

pub mod primitives;

pub use primitives::*;

use crate::gfx::backend::MeshBuffers;

/// Tessellated geometry ready for GPU upload.
///
/// `positions` and `normals` are parallel arrays. `tex_coords` is parallel
/// too when present; a shape without a texture omits the buffer entirely
/// instead of carrying zeroes. `indices` reference positions by offset, three
/// per triangle, so position order is significant.
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z).
    pub positions: Vec<[f32; 3]>,
    /// Normal vectors, one per vertex.
    pub normals: Vec<[f32; 3]>,
    /// Texture coordinates (u, v), only for textured shapes.
    pub tex_coords: Option<Vec<[f32; 2]>>,
    /// Triangle indices into `positions`.
    pub indices: Vec<u16>,
}

impl GeometryData {
    /// Creates an empty, untextured geometry container.
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            tex_coords: None,
            indices: Vec::new(),
        }
    }

    /// Number of vertices in this geometry.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles in this geometry.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Borrowed view of the buffers in the form the backend uploads.
    pub fn buffers(&self) -> MeshBuffers<'_> {
        MeshBuffers {
            positions: &self.positions,
            normals: &self.normals,
            tex_coords: self.tex_coords.as_deref(),
            indices: &self.indices,
        }
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}
