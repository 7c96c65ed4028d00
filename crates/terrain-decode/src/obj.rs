//! Wavefront OBJ export.

use std::io::Write;

use crate::MeshBuffers;
use crate::error::DecodeResult;

/// Write `mesh` as a Wavefront OBJ document.
///
/// OBJ places the texture origin at the bottom-left, so `v` is flipped.
/// Indices are written one-based with matching position, UV and normal
/// indices.
pub fn write_obj<W: Write>(mesh: &MeshBuffers, mut out: W) -> DecodeResult<()> {
    writeln!(out, "# terrain mesh")?;
    writeln!(
        out,
        "# {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    )?;

    for p in &mesh.positions {
        writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for uv in &mesh.uvs {
        writeln!(out, "vt {} {}", uv.x, 1.0 - uv.y)?;
    }
    for n in &mesh.normals {
        writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    for tri in mesh.indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] + 1, tri[1] + 1, tri[2] + 1];
        writeln!(out, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ElevationGrid, build_mesh};

    #[test]
    fn single_quad_document() {
        let grid = ElevationGrid::new(2, 2, vec![0.0, 1.0, 1.0, 2.0]).unwrap();
        let mesh = build_mesh(&grid, 1.0, 2, 2);

        let mut out = Vec::new();
        write_obj(&mesh, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 4);
        assert_eq!(text.lines().filter(|l| l.starts_with("vt ")).count(), 4);
        assert_eq!(text.lines().filter(|l| l.starts_with("vn ")).count(), 4);
        assert!(text.contains("v 1 2 1\n"));
        assert!(text.contains("vt 0.5 0.5\n"));
        assert!(text.contains("f 1/1/1 3/3/3 4/4/4\n"));
        assert!(text.contains("f 1/1/1 4/4/4 2/2/2\n"));
    }
}
