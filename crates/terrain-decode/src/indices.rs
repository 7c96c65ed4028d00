//! Triangle index synthesis.

/// Triangulate a `width * height` vertex grid.
///
/// Every cell with top-left vertex `i = y * width + x` becomes two triangles,
/// `(i, i + width, i + width + 1)` and `(i, i + width + 1, i + 1)`. With rows
/// running along +Z and columns along +X this winds counter-clockwise when
/// seen from +Y.
///
/// Grids narrower or shorter than two vertices produce no triangles.
#[must_use]
pub fn grid_indices(width: u32, height: u32) -> Vec<u32> {
    if width < 2 || height < 2 {
        return Vec::new();
    }

    let mut indices = Vec::with_capacity(6 * (width as usize - 1) * (height as usize - 1));
    for y in 0..height - 1 {
        for x in 0..width - 1 {
            let i = y * width + x;
            indices.extend_from_slice(&[i, i + width, i + width + 1]);
            indices.extend_from_slice(&[i, i + width + 1, i + 1]);
        }
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_quad() {
        assert_eq!(grid_indices(2, 2), vec![0, 2, 3, 0, 3, 1]);
    }

    #[test]
    fn three_by_three() {
        let indices = grid_indices(3, 3);
        assert_eq!(indices.len(), 24);
        assert!(indices.iter().all(|&i| i < 9));
        // Last cell has top-left vertex 4.
        assert_eq!(&indices[18..], &[4, 7, 8, 4, 8, 5]);
    }

    #[test]
    fn degenerate_grids() {
        assert!(grid_indices(1, 5).is_empty());
        assert!(grid_indices(5, 1).is_empty());
        assert!(grid_indices(0, 0).is_empty());
    }
}
