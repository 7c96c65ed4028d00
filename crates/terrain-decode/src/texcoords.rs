//! Texture coordinate synthesis.

use glam::Vec2;

/// Generate one UV per grid vertex.
///
/// The vertex at column `x`, row `y` gets `(x / uv_width, y / uv_height)`.
/// Pass the overlay image size to stretch a differently sized texture over
/// the grid. A zero UV dimension falls back to the grid dimension.
///
/// Output: `width * height` UVs in row-major order.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn grid_tex_coords(width: u32, height: u32, uv_width: u32, uv_height: u32) -> Vec<Vec2> {
    let uv_width = (if uv_width == 0 { width } else { uv_width }) as f32;
    let uv_height = (if uv_height == 0 { height } else { uv_height }) as f32;

    let mut uvs = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            uvs.push(Vec2::new(x as f32 / uv_width, y as f32 / uv_height));
        }
    }
    uvs
}
