//! Reference frame used for axis-constrained placement

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// An oriented frame: origin plus three orthogonal unit axes.
///
/// The frame is owned by the environment and handed to the builder as an
/// optional dependency; the core only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapReferenceFrame {
    /// Frame origin in world space
    pub position: Vec3,
    /// Local +X axis
    pub right: Vec3,
    /// Local +Y axis
    pub up: Vec3,
    /// Local +Z axis
    pub forward: Vec3,
}

impl Default for SnapReferenceFrame {
    fn default() -> Self {
        Self::world()
    }
}

impl SnapReferenceFrame {
    /// Frame aligned with the world axes at the origin
    pub fn world() -> Self {
        Self {
            position: Vec3::ZERO,
            right: Vec3::X,
            up: Vec3::Y,
            forward: Vec3::Z,
        }
    }

    /// Build a frame from a position and rotation
    pub fn from_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            right: rotation * Vec3::X,
            up: rotation * Vec3::Y,
            forward: rotation * Vec3::Z,
        }
    }

    /// The three axes in right, up, forward order
    pub fn axes(&self) -> [Vec3; 3] {
        [self.right, self.up, self.forward]
    }
}
