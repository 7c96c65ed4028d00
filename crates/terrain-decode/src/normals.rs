//! Vertex normal reconstruction.

use glam::Vec3;

/// Recompute smooth per-vertex normals from a triangle list.
///
/// Each triangle adds its unnormalized face normal (whose length is twice its
/// area) to its three corners, so larger faces weigh more. The sums are then
/// normalized. Vertices not referenced by any triangle, or whose faces cancel
/// out, point straight up.
///
/// Triangles referencing vertices outside `positions` are skipped.
///
/// # Arguments
///
/// * `positions` - Vertex positions
/// * `indices` - Triangle list, three indices per face, counter-clockwise
///
/// # Returns
///
/// One unit normal per vertex.
#[must_use]
pub fn compute_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut sums = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let (Some(&pa), Some(&pb), Some(&pc)) = (positions.get(a), positions.get(b), positions.get(c))
        else {
            continue;
        };

        let face = (pb - pa).cross(pc - pa);
        sums[a] += face;
        sums[b] += face;
        sums[c] += face;
    }

    sums.into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid_indices;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn flat_grid_points_up() {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
        ];
        let normals = compute_normals(&positions, &grid_indices(2, 2));
        assert!(normals.iter().all(|&n| close(n, Vec3::Y)));
    }

    #[test]
    fn slope_tilts_away_from_rise() {
        // Terrain rising towards +X: normals lean towards -X and stay upward.
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
        ];
        let normals = compute_normals(&positions, &grid_indices(2, 2));
        let expected = Vec3::new(-1.0, 1.0, 0.0).normalize();
        assert!(normals.iter().all(|&n| close(n, expected)), "{normals:?}");
    }

    #[test]
    fn unreferenced_vertices_point_up() {
        let positions = vec![Vec3::ZERO, Vec3::X];
        let normals = compute_normals(&positions, &[]);
        assert_eq!(normals, vec![Vec3::Y, Vec3::Y]);
    }

    #[test]
    fn out_of_range_triangles_are_skipped() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Z];
        let normals = compute_normals(&positions, &[0, 2, 7]);
        assert_eq!(normals.len(), 3);
        assert!(normals.iter().all(|&n| n == Vec3::Y));
    }
}
