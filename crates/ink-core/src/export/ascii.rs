//! ASCII STL writer

use std::io::Write;

/// Write triangles in ASCII STL form
pub(super) fn write_ascii<W: Write>(
    writer: &mut W,
    name: &str,
    triangles: &[stl_io::Triangle],
) -> std::io::Result<()> {
    writeln!(writer, "solid {}", name)?;
    for tri in triangles {
        let n = tri.normal;
        writeln!(writer, "  facet normal {} {} {}", n[0], n[1], n[2])?;
        writeln!(writer, "    outer loop")?;
        for v in &tri.vertices {
            writeln!(writer, "      vertex {} {} {}", v[0], v[1], v[2])?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }
    writeln!(writer, "endsolid {}", name)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_layout() {
        let tri = stl_io::Triangle {
            normal: stl_io::Normal::new([0.0, 0.0, 1.0]),
            vertices: [
                stl_io::Vertex::new([0.0, 0.0, 0.0]),
                stl_io::Vertex::new([1.0, 0.0, 0.0]),
                stl_io::Vertex::new([0.0, 1.0, 0.0]),
            ],
        };
        let mut out = Vec::new();
        write_ascii(&mut out, "part", &[tri]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "solid part");
        assert_eq!(lines[1], "  facet normal 0 0 1");
        assert_eq!(lines[3], "      vertex 0 0 0");
        assert_eq!(lines[8], "endsolid part");
    }

    #[test]
    fn test_ascii_empty() {
        let mut out = Vec::new();
        write_ascii(&mut out, "empty", &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "solid empty\nendsolid empty\n");
    }
}
