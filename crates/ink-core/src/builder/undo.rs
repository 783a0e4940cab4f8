//! Undo of the most recent placement step

use glam::Vec3;

use super::{MeshBuilder, PendingPoint};
use crate::collab::PreviewRenderer;
use crate::mesh::VertexPolicy;

/// What an undo removed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UndoOutcome {
    /// The last pending point was dropped
    RemovedPoint { position: Vec3, remaining: usize },
    /// The last triangle was removed and its first two points are pending again
    ReopenedTriangle { indices: [u32; 3] },
    /// Nothing was placed
    Nothing,
}

impl MeshBuilder {
    /// Step back by exactly one commit.
    ///
    /// With pending points the newest one is dropped. Otherwise the last
    /// triangle is removed and its first two points become pending again, so
    /// the next commit can close it differently.
    pub fn undo(&mut self, renderer: &mut dyn PreviewRenderer) -> UndoOutcome {
        if let Some(point) = self.pending.pop() {
            if let Some(marker) = self.markers.pop() {
                renderer.remove_marker(marker);
            }
            renderer.show_line(&self.line_points());
            let remaining = self.pending.len();
            tracing::debug!("Removed pending point at {:?}", point.position);
            return UndoOutcome::RemovedPoint {
                position: point.position,
                remaining,
            };
        }

        let Some(removed) = self.mesh.pop_triangle() else {
            tracing::info!("Nothing to undo");
            return UndoOutcome::Nothing;
        };

        let shared = self.mesh.policy() == VertexPolicy::Shared;
        for i in 0..2 {
            let point = PendingPoint {
                position: removed.positions[i],
                vertex: shared.then_some(removed.indices[i]),
            };
            self.pending.push(point);
            self.markers.push(renderer.place_marker(point.position));
        }
        renderer.show_line(&self.line_points());

        tracing::info!(
            "Removed triangle {:?} ({} triangles left)",
            removed.indices,
            self.mesh.triangle_count()
        );
        UndoOutcome::ReopenedTriangle {
            indices: removed.indices,
        }
    }
}
