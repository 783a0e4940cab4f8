//! STL export
//!
//! One or more meshes are flattened into a single triangle soup; indices are
//! discarded and every facet carries a normal computed from its vertices. The
//! source meshes are never modified.

mod ascii;
mod options;

use std::io::Write;
use std::path::{Path, PathBuf};

pub use options::{ExportOptions, StlFormat};

use crate::constants::{STL_HEADER_SIZE, STL_TRIANGLE_RECORD_SIZE};
use crate::mesh::{MeshSource, calculate_triangle_normal};

/// Flatten meshes into STL facets, in mesh order then triangle order
pub fn collect_triangles(meshes: &[&dyn MeshSource]) -> Result<Vec<stl_io::Triangle>, ExportError> {
    let total = meshes.iter().map(|m| m.triangle_count()).sum();
    let mut triangles = Vec::with_capacity(total);

    for (mesh_index, mesh) in meshes.iter().enumerate() {
        let vertices = mesh.vertices();
        let lookup = |index: u32| {
            vertices
                .get(index as usize)
                .copied()
                .ok_or(ExportError::InvalidIndex {
                    mesh: mesh_index,
                    index,
                    vertex_count: vertices.len(),
                })
        };

        for chunk in mesh.indices().chunks_exact(3) {
            let v0 = lookup(chunk[0])?;
            let v1 = lookup(chunk[1])?;
            let v2 = lookup(chunk[2])?;
            let normal = calculate_triangle_normal(v0, v1, v2);

            triangles.push(stl_io::Triangle {
                normal: stl_io::Normal::new(normal.to_array()),
                vertices: [
                    stl_io::Vertex::new(v0.to_array()),
                    stl_io::Vertex::new(v1.to_array()),
                    stl_io::Vertex::new(v2.to_array()),
                ],
            });
        }
    }

    Ok(triangles)
}

/// Size in bytes of a binary STL holding `triangle_count` facets
pub fn binary_stl_size(triangle_count: usize) -> usize {
    STL_HEADER_SIZE + 4 + triangle_count * STL_TRIANGLE_RECORD_SIZE
}

/// Write meshes as STL into any writer. Returns the number of facets written.
pub fn write_stl<W: Write>(
    writer: &mut W,
    meshes: &[&dyn MeshSource],
    options: &ExportOptions,
) -> Result<usize, ExportError> {
    let triangles = collect_triangles(meshes)?;

    match options.format {
        StlFormat::Binary => stl_io::write_stl(writer, triangles.iter()),
        StlFormat::Ascii => ascii::write_ascii(writer, &options.solid_name, &triangles),
    }
    .map_err(|e| ExportError::Io(e.to_string()))?;

    Ok(triangles.len())
}

/// Encode meshes into an in-memory STL
pub fn encode_stl(meshes: &[&dyn MeshSource], options: &ExportOptions) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    write_stl(&mut bytes, meshes, options)?;
    Ok(bytes)
}

/// Save meshes to an STL file at `path`.
///
/// A file left behind by a failed write is not removed.
pub fn save_stl(
    path: impl AsRef<Path>,
    meshes: &[&dyn MeshSource],
    options: &ExportOptions,
) -> Result<usize, ExportError> {
    let path = path.as_ref();
    let file = std::fs::File::create(path).map_err(|e| ExportError::Io(e.to_string()))?;
    let mut writer = std::io::BufWriter::new(file);
    let count = write_stl(&mut writer, meshes, options)?;
    writer.flush().map_err(|e| ExportError::Io(e.to_string()))?;

    tracing::info!(
        "Exported {} triangles ({}) to {}",
        count,
        options.format.name(),
        path.display()
    );
    Ok(count)
}

/// Export meshes into the output directory under a time-stamped file name
pub fn export_stl_file(
    meshes: &[&dyn MeshSource],
    options: &ExportOptions,
    elapsed_secs: f64,
) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(&options.output_dir).map_err(|e| ExportError::Io(e.to_string()))?;
    let path = options.file_path(elapsed_secs);
    save_stl(&path, meshes, options)?;
    Ok(path)
}

/// Export-related errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Mesh {mesh} references vertex {index} but has only {vertex_count} vertices")]
    InvalidIndex {
        mesh: usize,
        index: u32,
        vertex_count: usize,
    },
}
