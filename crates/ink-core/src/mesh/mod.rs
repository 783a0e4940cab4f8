//! Mesh storage
//!
//! - [`MeshBuffer`]: the authored vertex/triangle buffer
//! - [`IndexedMesh`]: any externally supplied indexed triangle mesh
//! - [`MeshSource`]: read access shared by both, used by export and scaling

mod bounds;
mod buffer;
mod normals;

pub use bounds::BoundingBox;
pub use buffer::{MeshBuffer, RemovedTriangle, VertexPolicy};
pub use normals::{calculate_face_normals, calculate_triangle_normal};

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Read-only view of an indexed triangle mesh
pub trait MeshSource {
    /// Vertex positions
    fn vertices(&self) -> &[Vec3];

    /// Flattened triangle indices (3 per triangle)
    fn indices(&self) -> &[u32];

    /// Number of complete triangles
    fn triangle_count(&self) -> usize {
        self.indices().len() / 3
    }

    /// Axis-aligned bounds of all vertices, `None` for an empty mesh
    fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.vertices().iter().copied())
    }
}

/// A plain indexed triangle mesh supplied from outside the builder
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexedMesh {
    pub vertices: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl IndexedMesh {
    /// Create a mesh from vertices and flattened triangle indices
    pub fn new(vertices: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Scale about the bounding-box center by `1 + percent / 100`
    pub fn scale_percent(&mut self, percent: f32) {
        crate::scale::scale_about_center(
            &mut self.vertices,
            crate::scale::factor_from_percent(percent),
        );
    }
}

impl MeshSource for IndexedMesh {
    fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    fn indices(&self) -> &[u32] {
        &self.indices
    }
}

impl MeshSource for MeshBuffer {
    fn vertices(&self) -> &[Vec3] {
        MeshBuffer::vertices(self)
    }

    fn indices(&self) -> &[u32] {
        self.triangles()
    }
}
