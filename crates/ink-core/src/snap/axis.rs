//! Axis-constrained placement

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_AXIS_SNAP_THRESHOLD;
use crate::frame::SnapReferenceFrame;

/// Axis snapping settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisSnap {
    /// Whether axis snapping is applied at all
    pub enabled: bool,
    /// Per-axis threshold (world units)
    pub threshold: f32,
}

impl Default for AxisSnap {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: DEFAULT_AXIS_SNAP_THRESHOLD,
        }
    }
}

impl AxisSnap {
    /// Project a candidate with these settings
    pub fn apply(
        &self,
        candidate: Vec3,
        previous: Option<Vec3>,
        frame: Option<&SnapReferenceFrame>,
    ) -> Vec3 {
        project(candidate, previous, frame, self.enabled, self.threshold)
    }
}

/// Constrain `candidate` relative to `previous`.
///
/// With a frame, the offset is decomposed along the frame axes and only the
/// components longer than `threshold` are kept, so the point lands on a frame
/// axis or plane through `previous`.
///
/// Without a frame the polarity is reversed: each world axis whose offset is
/// shorter than `threshold` is clamped to `previous`, larger offsets pass
/// through untouched.
pub fn project(
    candidate: Vec3,
    previous: Option<Vec3>,
    frame: Option<&SnapReferenceFrame>,
    enabled: bool,
    threshold: f32,
) -> Vec3 {
    let Some(previous) = previous.filter(|_| enabled) else {
        return candidate;
    };

    let delta = candidate - previous;

    match frame {
        Some(frame) => {
            let snapped_delta = frame
                .axes()
                .into_iter()
                .map(|axis| axis * delta.dot(axis))
                .filter(|component| component.length() > threshold)
                .fold(Vec3::ZERO, |acc, component| acc + component);
            previous + snapped_delta
        }
        None => {
            let mut result = candidate;
            for i in 0..3 {
                if delta[i].abs() < threshold {
                    result[i] = previous[i];
                }
            }
            result
        }
    }
}
