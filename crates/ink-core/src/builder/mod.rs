//! Point-by-point triangle construction
//!
//! [`MeshBuilder`] owns the mesh buffer and the pending triangle. Every
//! release of the place button commits one point; the third point closes a
//! triangle and resets placement in the same call.

mod pending;
mod undo;

pub use pending::{PendingPoint, PendingTriangle, PlacementState};
pub use undo::UndoOutcome;

use glam::Vec3;

use crate::collab::{HapticSink, MarkerId, PreviewRenderer};
use crate::config::BuilderConfig;
use crate::frame::SnapReferenceFrame;
use crate::mesh::MeshBuffer;
use crate::scale::factor_from_percent;
use crate::snap::find_nearest;

/// Result of committing one point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommitOutcome {
    /// Point added; the triangle is still open
    Pending {
        position: Vec3,
        /// Number of pending points after the commit (1 or 2)
        count: usize,
    },
    /// Third point added; a triangle was appended to the buffer
    Triangle { position: Vec3, indices: [u32; 3] },
}

impl CommitOutcome {
    /// Final position of the committed point
    pub fn position(&self) -> Vec3 {
        match self {
            CommitOutcome::Pending { position, .. } | CommitOutcome::Triangle { position, .. } => {
                *position
            }
        }
    }
}

/// Incremental triangle mesh builder
#[derive(Debug, Clone)]
pub struct MeshBuilder {
    config: BuilderConfig,
    frame: Option<SnapReferenceFrame>,
    mesh: MeshBuffer,
    pending: PendingTriangle,
    /// Markers of the pending points, parallel to `pending`
    markers: Vec<MarkerId>,
    /// Last preview position while a press-hold cycle is active
    preview: Option<Vec3>,
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self::new(BuilderConfig::default())
    }
}

impl MeshBuilder {
    /// Create a builder with an empty mesh
    pub fn new(config: BuilderConfig) -> Self {
        Self {
            mesh: MeshBuffer::new(config.vertex_policy),
            config,
            frame: None,
            pending: PendingTriangle::new(),
            markers: Vec::new(),
            preview: None,
        }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn mesh(&self) -> &MeshBuffer {
        &self.mesh
    }

    pub fn pending(&self) -> &PendingTriangle {
        &self.pending
    }

    pub fn state(&self) -> PlacementState {
        self.pending.state()
    }

    pub fn reference_frame(&self) -> Option<&SnapReferenceFrame> {
        self.frame.as_ref()
    }

    /// Set or clear the frame used for axis snapping
    pub fn set_reference_frame(&mut self, frame: Option<SnapReferenceFrame>) {
        self.frame = frame;
    }

    /// Toggle axis snapping at runtime
    pub fn set_axis_snap_enabled(&mut self, enabled: bool) {
        self.config.axis_snap.enabled = enabled;
    }

    /// Whether a press-hold cycle is in progress
    pub fn is_previewing(&self) -> bool {
        self.preview.is_some()
    }

    /// Last position shown by the preview
    pub fn preview_position(&self) -> Option<Vec3> {
        self.preview
    }

    /// Points of the guide line: both pending points once there are two
    pub fn line_points(&self) -> Vec<Vec3> {
        if self.pending.len() == 2 {
            self.pending.positions()
        } else {
            Vec::new()
        }
    }

    /// Axis-snap `pointer` against the last pending point
    pub fn project(&self, pointer: Vec3) -> Vec3 {
        self.config
            .axis_snap
            .apply(pointer, self.pending.last_position(), self.frame.as_ref())
    }

    /// Start a press-hold cycle at the current pointer position
    pub fn begin_preview(&mut self, pointer: Vec3, renderer: &mut dyn PreviewRenderer) {
        self.preview = Some(pointer);
        renderer.begin_preview(pointer);
    }

    /// Move the preview to the snapped pointer position; the mesh is untouched
    pub fn update_preview(&mut self, pointer: Vec3, renderer: &mut dyn PreviewRenderer) -> Vec3 {
        let snapped = self.project(pointer);
        self.preview = Some(snapped);
        renderer.move_preview(snapped);
        snapped
    }

    /// Drop the preview without committing anything
    pub fn abort_preview(&mut self, renderer: &mut dyn PreviewRenderer) {
        if self.preview.take().is_some() {
            tracing::debug!("Preview aborted");
            renderer.discard_preview();
        }
    }

    /// Commit a point at `pointer`, closing a triangle on every third point
    pub fn commit_point(
        &mut self,
        pointer: Vec3,
        renderer: &mut dyn PreviewRenderer,
        haptics: &mut dyn HapticSink,
    ) -> CommitOutcome {
        let snapped = self.project(pointer);

        let (position, vertex) =
            match find_nearest(snapped, self.mesh.vertices(), self.config.snap_distance) {
                Some(index) => {
                    tracing::debug!("Snapped to existing vertex at index {}", index);
                    (self.mesh.vertices()[index], Some(index as u32))
                }
                None => (snapped, None),
            };

        self.pending.push(PendingPoint { position, vertex });
        if self.preview.take().is_some() {
            renderer.discard_preview();
        }

        let outcome = match self.pending.take_triangle() {
            Some(points) => {
                let indices = self
                    .mesh
                    .commit_triangle(points.map(|p| (p.position, p.vertex)));
                for marker in self.markers.drain(..) {
                    renderer.remove_marker(marker);
                }
                tracing::info!(
                    "Triangle {:?} committed ({} triangles, {} vertices)",
                    indices,
                    self.mesh.triangle_count(),
                    self.mesh.vertex_count()
                );
                CommitOutcome::Triangle { position, indices }
            }
            None => {
                self.markers.push(renderer.place_marker(position));
                let count = self.pending.len();
                tracing::debug!("Point {} placed at {:?}", count, position);
                CommitOutcome::Pending { position, count }
            }
        };

        renderer.show_line(&self.line_points());
        haptics.pulse(self.config.haptics.amplitude, self.config.haptics.duration);

        outcome
    }

    /// Scale the mesh about its bounding-box center by `1 + percent / 100`.
    ///
    /// Pending points keep their positions.
    pub fn scale_percent(&mut self, percent: f32) {
        let factor = factor_from_percent(percent);
        self.mesh.scale(factor);
        tracing::info!("Scaled mesh by {} ({}%)", factor, percent);
    }

    /// Scale the mesh by the configured percentage
    pub fn scale_default(&mut self) {
        self.scale_percent(self.config.scale_percent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::{NullHaptics, NullRenderer};
    use crate::mesh::VertexPolicy;

    fn no_snap() -> BuilderConfig {
        let mut config = BuilderConfig::default();
        config.axis_snap.enabled = false;
        config
    }

    fn place(builder: &mut MeshBuilder, p: Vec3) -> CommitOutcome {
        builder.commit_point(p, &mut NullRenderer, &mut NullHaptics)
    }

    #[test]
    fn test_three_points_make_a_triangle() {
        let mut builder = MeshBuilder::new(no_snap());
        let p1 = Vec3::new(0.0, 0.0, 0.0);
        let p2 = Vec3::new(1.0, 0.0, 0.0);
        let p3 = Vec3::new(0.0, 1.0, 0.0);

        assert_eq!(
            place(&mut builder, p1),
            CommitOutcome::Pending {
                position: p1,
                count: 1
            }
        );
        assert_eq!(builder.state(), PlacementState::Placing1);
        place(&mut builder, p2);
        assert_eq!(builder.state(), PlacementState::Placing2);
        assert_eq!(builder.line_points(), vec![p1, p2]);

        let outcome = place(&mut builder, p3);
        assert_eq!(
            outcome,
            CommitOutcome::Triangle {
                position: p3,
                indices: [0, 1, 2]
            }
        );
        assert_eq!(builder.state(), PlacementState::Idle);
        assert_eq!(builder.mesh().vertices(), &[p1, p2, p3]);
        assert!(builder.line_points().is_empty());
    }

    #[test]
    fn test_commit_snaps_to_existing_vertex() {
        let mut builder = MeshBuilder::new(no_snap());
        place(&mut builder, Vec3::ZERO);
        place(&mut builder, Vec3::X);
        place(&mut builder, Vec3::Y);

        let outcome = place(&mut builder, Vec3::new(0.01, 0.0, 0.0));
        assert_eq!(outcome.position(), Vec3::ZERO);
        assert_eq!(builder.pending().points()[0].vertex, Some(0));
    }

    #[test]
    fn test_axis_snap_uses_last_pending_point() {
        let mut config = BuilderConfig::default();
        config.axis_snap.threshold = 0.1;
        let mut builder = MeshBuilder::new(config);

        // First point: nothing to snap against
        let first = place(&mut builder, Vec3::new(0.03, 0.0, 0.0));
        assert_eq!(first.position(), Vec3::new(0.03, 0.0, 0.0));

        let second = place(&mut builder, Vec3::new(0.5, 0.05, 0.0));
        assert_eq!(second.position(), Vec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_reference_frame_is_used_when_set() {
        let mut config = BuilderConfig::default();
        config.axis_snap.threshold = 0.1;
        let mut builder = MeshBuilder::new(config);
        builder.set_reference_frame(Some(SnapReferenceFrame::world()));
        place(&mut builder, Vec3::ZERO);

        let projected = builder.project(Vec3::new(0.2, 0.02, 0.3));
        assert!(projected.abs_diff_eq(Vec3::new(0.2, 0.0, 0.3), 1e-6));
    }

    #[test]
    fn test_update_preview_does_not_touch_mesh() {
        let mut builder = MeshBuilder::new(no_snap());
        builder.begin_preview(Vec3::ZERO, &mut NullRenderer);
        builder.update_preview(Vec3::ONE, &mut NullRenderer);
        assert!(builder.is_previewing());
        assert_eq!(builder.preview_position(), Some(Vec3::ONE));
        assert!(builder.pending().is_empty());
        assert!(builder.mesh().is_empty());

        builder.abort_preview(&mut NullRenderer);
        assert!(!builder.is_previewing());
        assert!(builder.pending().is_empty());
    }

    #[test]
    fn test_shared_policy_reuses_vertices() {
        let mut config = no_snap();
        config.vertex_policy = VertexPolicy::Shared;
        let mut builder = MeshBuilder::new(config);
        for p in [Vec3::ZERO, Vec3::X, Vec3::Y] {
            place(&mut builder, p);
        }
        place(&mut builder, Vec3::new(1.01, 0.0, 0.0));
        place(&mut builder, Vec3::new(0.0, 0.99, 0.0));
        let outcome = place(&mut builder, Vec3::ONE);

        assert_eq!(
            outcome,
            CommitOutcome::Triangle {
                position: Vec3::ONE,
                indices: [1, 2, 3]
            }
        );
        assert_eq!(builder.mesh().vertex_count(), 4);
    }

    #[test]
    fn test_scale_leaves_pending_points() {
        let mut builder = MeshBuilder::new(no_snap());
        for p in [Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0)] {
            place(&mut builder, p);
        }
        place(&mut builder, Vec3::splat(5.0));

        builder.scale_percent(100.0);
        assert_eq!(builder.mesh().vertices()[1], Vec3::new(3.0, -1.0, 0.0));
        assert_eq!(builder.pending().positions(), vec![Vec3::splat(5.0)]);
    }
}
