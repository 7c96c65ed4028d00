//! Vertex position synthesis.

use glam::Vec3;

use crate::ElevationGrid;

/// Lay out one vertex per grid sample.
///
/// The vertex for column `x`, row `y` sits at `(x, elevation * scale, y)`:
/// grid indices are used directly as planar coordinates and only the
/// vertical axis carries elevation.
///
/// Output: `width * height` positions in row-major order.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn grid_positions(grid: &ElevationGrid, elevation_scale: f32) -> Vec<Vec3> {
    let width = grid.width() as usize;
    grid.samples()
        .iter()
        .enumerate()
        .map(|(i, &elevation)| {
            let x = (i % width) as f32;
            let z = (i / width) as f32;
            Vec3::new(x, elevation * elevation_scale, z)
        })
        .collect()
}
