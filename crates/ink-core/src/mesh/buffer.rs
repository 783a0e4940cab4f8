//! Authored vertex/triangle buffer

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::{BoundingBox, calculate_face_normals};

/// How triangles relate to the vertices they reference.
///
/// The policy is fixed when the buffer is created and never changes for the
/// buffer's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VertexPolicy {
    /// Every triangle owns three fresh vertices; undoing a triangle removes them
    #[default]
    Independent,
    /// Snapped points reuse the matched vertex; undoing a triangle keeps all vertices
    Shared,
}

impl VertexPolicy {
    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            VertexPolicy::Independent => "Independent triangles",
            VertexPolicy::Shared => "Shared vertices",
        }
    }
}

/// A triangle taken off the end of the buffer by undo
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemovedTriangle {
    /// Indices the triangle referenced, in winding order
    pub indices: [u32; 3],
    /// Positions of those vertices, in winding order
    pub positions: [Vec3; 3],
}

/// Vertex and triangle storage for the mesh being authored.
///
/// Invariant: `triangles.len() % 3 == 0` and every index is `< vertices.len()`.
/// Only `commit_triangle` and `pop_triangle` mutate the buffer; external data
/// goes through [`IndexedMesh`](super::IndexedMesh).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffer {
    policy: VertexPolicy,
    vertices: Vec<Vec3>,
    triangles: Vec<u32>,
}

impl MeshBuffer {
    /// Create an empty buffer with the given vertex policy
    pub fn new(policy: VertexPolicy) -> Self {
        Self {
            policy,
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    pub fn policy(&self) -> VertexPolicy {
        self.policy
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Flattened triangle indices
    pub fn triangles(&self) -> &[u32] {
        &self.triangles
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.triangles.is_empty()
    }

    /// Get a triangle's indices by triangle number
    pub fn triangle(&self, index: usize) -> Option<[u32; 3]> {
        let start = index.checked_mul(3)?;
        let tri = self.triangles.get(start..start.checked_add(3)?)?;
        Some([tri[0], tri[1], tri[2]])
    }

    /// Check the buffer invariant
    pub fn is_consistent(&self) -> bool {
        self.triangles.len() % 3 == 0
            && self
                .triangles
                .iter()
                .all(|&i| (i as usize) < self.vertices.len())
    }

    /// Append a completed triangle.
    ///
    /// Each point carries the index of the vertex it snapped to, if any. Under
    /// [`VertexPolicy::Shared`] those indices are reused; every other point (and
    /// every point under [`VertexPolicy::Independent`]) becomes a new vertex.
    /// Returns the triangle's indices in placement order.
    pub fn commit_triangle(&mut self, points: [(Vec3, Option<u32>); 3]) -> [u32; 3] {
        let indices = points.map(|(position, resolved)| match (self.policy, resolved) {
            (VertexPolicy::Shared, Some(index)) if (index as usize) < self.vertices.len() => index,
            _ => self.push_vertex(position),
        });
        self.triangles.extend_from_slice(&indices);
        indices
    }

    /// Remove the last triangle.
    ///
    /// Under [`VertexPolicy::Independent`] the triangle's three vertices are the
    /// last three in the buffer and are truncated with it; under
    /// [`VertexPolicy::Shared`] vertices are left in place.
    pub fn pop_triangle(&mut self) -> Option<RemovedTriangle> {
        let start = self.triangles.len().checked_sub(3)?;
        let indices = [
            self.triangles[start],
            self.triangles[start + 1],
            self.triangles[start + 2],
        ];
        let positions = indices.map(|i| self.vertices[i as usize]);
        self.triangles.truncate(start);

        if self.policy == VertexPolicy::Independent {
            let keep = self.vertices.len().saturating_sub(3);
            self.vertices.truncate(keep);
        }

        Some(RemovedTriangle { indices, positions })
    }

    /// One normal per triangle
    pub fn face_normals(&self) -> Vec<Vec3> {
        calculate_face_normals(&self.vertices, &self.triangles)
    }

    /// Axis-aligned bounds of all vertices
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.vertices.iter().copied())
    }

    /// Scale every vertex about the bounding-box center
    pub fn scale(&mut self, factor: f32) {
        crate::scale::scale_about_center(&mut self.vertices, factor);
    }

    fn push_vertex(&mut self, position: Vec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }
}
