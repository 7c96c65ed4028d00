//! Heightmap mesh assembly.

use glam::{Vec2, Vec3};

use crate::{ElevationGrid, compute_normals, grid_indices, grid_positions, grid_tex_coords};

/// Renderer-agnostic triangle mesh buffers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    /// One position per grid sample, row-major.
    pub positions: Vec<Vec3>,
    /// One UV per position.
    pub uvs: Vec<Vec2>,
    /// One unit normal per position.
    pub normals: Vec<Vec3>,
    /// Triangle list, three indices per face.
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds of all positions, or `None` for an empty mesh.
    #[must_use]
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.positions.iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }
}

/// Build a triangulated heightmap from an elevation grid.
///
/// # Arguments
///
/// * `grid` - Elevation samples in meters
/// * `elevation_scale` - Multiplier applied to each elevation before it
///   becomes the vertex height
/// * `uv_width`, `uv_height` - Size of the overlay texture; usually the grid
///   size
///
/// The output always holds `width * height` positions, UVs and normals, and
/// `6 * (width - 1) * (height - 1)` indices. Grids with a side shorter than
/// two produce vertices but no triangles.
#[must_use]
pub fn build_mesh(
    grid: &ElevationGrid,
    elevation_scale: f32,
    uv_width: u32,
    uv_height: u32,
) -> MeshBuffers {
    let positions = grid_positions(grid, elevation_scale);
    let uvs = grid_tex_coords(grid.width(), grid.height(), uv_width, uv_height);
    let indices = grid_indices(grid.width(), grid.height());
    let normals = compute_normals(&positions, &indices);

    MeshBuffers {
        positions,
        uvs,
        normals,
        indices,
    }
}
