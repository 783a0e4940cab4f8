//! Collaborator interfaces
//!
//! The builder drives these but never reads anything back from them except
//! handles it later passes back in. Implementations own their own resources
//! (visual objects, device handles, anchors).

use glam::Vec3;
use uuid::Uuid;

use crate::anchor::{AnchorError, AnchorId};

/// Handle of a marker owned by the preview renderer
pub type MarkerId = Uuid;

/// Presentational sink for transient placement state
pub trait PreviewRenderer {
    /// Create the transient preview at `position` (press edge)
    fn begin_preview(&mut self, position: Vec3);
    /// Move the transient preview (every held tick)
    fn move_preview(&mut self, position: Vec3);
    /// Drop the transient preview
    fn discard_preview(&mut self);
    /// Replace the guide polyline; an empty slice hides it
    fn show_line(&mut self, points: &[Vec3]);
    /// Place a marker at a committed point
    fn place_marker(&mut self, position: Vec3) -> MarkerId;
    /// Remove a marker previously returned by [`PreviewRenderer::place_marker`]
    fn remove_marker(&mut self, marker: MarkerId);
}

/// Fire-and-forget haptic output
pub trait HapticSink {
    /// Pulse with `amplitude` in `[0, 1]` for `duration` seconds
    fn pulse(&mut self, amplitude: f32, duration: f32);
}

/// Best-effort service that pins the mesh to a persistent spatial anchor
pub trait AnchorService {
    /// Erase every anchor previously created by this application
    fn erase_all(&mut self) -> Result<(), AnchorError>;
    /// Create an anchor at `position`
    fn create_anchor(&mut self, position: Vec3) -> Result<AnchorId, AnchorError>;
    /// Whether the anchor has been localized yet; polled once per tick
    fn is_localized(&mut self, anchor: AnchorId) -> Result<bool, AnchorError>;
    /// Reparent the mesh under the localized anchor
    fn reparent_mesh(&mut self, anchor: AnchorId) -> Result<(), AnchorError>;
}

/// Renderer that draws nothing
#[derive(Debug, Default)]
pub struct NullRenderer;

impl PreviewRenderer for NullRenderer {
    fn begin_preview(&mut self, _position: Vec3) {}
    fn move_preview(&mut self, _position: Vec3) {}
    fn discard_preview(&mut self) {}
    fn show_line(&mut self, _points: &[Vec3]) {}
    fn place_marker(&mut self, _position: Vec3) -> MarkerId {
        Uuid::new_v4()
    }
    fn remove_marker(&mut self, _marker: MarkerId) {}
}

/// Haptic sink without a device
#[derive(Debug, Default)]
pub struct NullHaptics;

impl HapticSink for NullHaptics {
    fn pulse(&mut self, _amplitude: f32, _duration: f32) {}
}

/// Collaborators handed to the builder for one call
pub struct Collaborators<'a> {
    pub renderer: &'a mut dyn PreviewRenderer,
    pub haptics: &'a mut dyn HapticSink,
    /// Absent when anchoring is not available on this device
    pub anchors: Option<&'a mut dyn AnchorService>,
}

impl<'a> Collaborators<'a> {
    pub fn new(renderer: &'a mut dyn PreviewRenderer, haptics: &'a mut dyn HapticSink) -> Self {
        Self {
            renderer,
            haptics,
            anchors: None,
        }
    }

    /// Attach an anchor service
    pub fn with_anchors(mut self, anchors: &'a mut dyn AnchorService) -> Self {
        self.anchors = Some(anchors);
        self
    }
}
