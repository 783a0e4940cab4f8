//! Headless stand-ins for the headset's renderer, haptics and anchor store

use glam::Vec3;
use ink_core::{AnchorError, AnchorId, AnchorService, HapticSink, MarkerId, PreviewRenderer};
use uuid::Uuid;

use crate::script::SimulatedAnchor;

/// Renderer that logs what it would draw
#[derive(Debug, Default)]
pub struct LoggingRenderer {
    markers: Vec<MarkerId>,
}

impl LoggingRenderer {
    /// Markers currently shown
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }
}

impl PreviewRenderer for LoggingRenderer {
    fn begin_preview(&mut self, position: Vec3) {
        tracing::trace!("Preview at {:?}", position);
    }

    fn move_preview(&mut self, position: Vec3) {
        tracing::trace!("Preview moved to {:?}", position);
    }

    fn discard_preview(&mut self) {
        tracing::trace!("Preview discarded");
    }

    fn show_line(&mut self, points: &[Vec3]) {
        tracing::trace!("Line with {} points", points.len());
    }

    fn place_marker(&mut self, position: Vec3) -> MarkerId {
        let id = Uuid::new_v4();
        tracing::trace!("Marker {} at {:?}", id, position);
        self.markers.push(id);
        id
    }

    fn remove_marker(&mut self, marker: MarkerId) {
        self.markers.retain(|id| *id != marker);
    }
}

/// Haptic sink that only counts pulses
#[derive(Debug, Default)]
pub struct CountingHaptics {
    pub pulses: usize,
}

impl HapticSink for CountingHaptics {
    fn pulse(&mut self, amplitude: f32, duration: f32) {
        tracing::trace!("Haptic pulse {} for {}s", amplitude, duration);
        self.pulses += 1;
    }
}

/// In-memory anchor store
#[derive(Debug)]
pub struct SimulatedAnchors {
    behavior: SimulatedAnchor,
    anchors: Vec<AnchorId>,
    polls: u32,
    pub mesh_parent: Option<AnchorId>,
}

impl SimulatedAnchors {
    pub fn new(behavior: SimulatedAnchor) -> Self {
        Self {
            behavior,
            anchors: Vec::new(),
            polls: 0,
            mesh_parent: None,
        }
    }
}

impl AnchorService for SimulatedAnchors {
    fn erase_all(&mut self) -> Result<(), AnchorError> {
        self.anchors.clear();
        Ok(())
    }

    fn create_anchor(&mut self, _position: Vec3) -> Result<AnchorId, AnchorError> {
        if self.behavior.fail_create {
            return Err(AnchorError::Create("simulated failure".to_string()));
        }
        let id = Uuid::new_v4();
        self.anchors.push(id);
        Ok(id)
    }

    fn is_localized(&mut self, anchor: AnchorId) -> Result<bool, AnchorError> {
        if !self.anchors.contains(&anchor) {
            return Err(AnchorError::Localize(format!("unknown anchor {}", anchor)));
        }
        self.polls += 1;
        Ok(self.polls > self.behavior.localize_after)
    }

    fn reparent_mesh(&mut self, anchor: AnchorId) -> Result<(), AnchorError> {
        self.mesh_parent = Some(anchor);
        Ok(())
    }
}
