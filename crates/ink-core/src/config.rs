//! Builder configuration
//!
//! Stored on disk as RON. Every field has a default so partial files load.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MAX_LOCALIZE_POLLS, DEFAULT_SCALE_PERCENT, DEFAULT_SNAP_DISTANCE,
    HAPTIC_CLICK_AMPLITUDE, HAPTIC_CLICK_DURATION,
};
use crate::mesh::VertexPolicy;
use crate::snap::AxisSnap;

/// Haptic click played on every committed point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HapticConfig {
    /// Pulse amplitude (0..=1)
    pub amplitude: f32,
    /// Pulse duration in seconds
    pub duration: f32,
}

impl Default for HapticConfig {
    fn default() -> Self {
        Self {
            amplitude: HAPTIC_CLICK_AMPLITUDE,
            duration: HAPTIC_CLICK_DURATION,
        }
    }
}

/// Spatial anchoring of the mesh
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorConfig {
    /// Whether the first vertex of a session starts the anchor task
    pub enabled: bool,
    /// Ticks to wait for localization before giving up
    pub max_localize_polls: u32,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_localize_polls: DEFAULT_MAX_LOCALIZE_POLLS,
        }
    }
}

/// Configuration of a mesh-building session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Distance within which a point snaps onto an existing vertex
    pub snap_distance: f32,
    /// Axis snapping relative to the previous point
    pub axis_snap: AxisSnap,
    /// Vertex sharing policy of the mesh buffer
    pub vertex_policy: VertexPolicy,
    pub haptics: HapticConfig,
    pub anchor: AnchorConfig,
    /// Percentage used by the scale operation
    pub scale_percent: f32,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            snap_distance: DEFAULT_SNAP_DISTANCE,
            axis_snap: AxisSnap::default(),
            vertex_policy: VertexPolicy::default(),
            haptics: HapticConfig::default(),
            anchor: AnchorConfig::default(),
            scale_percent: DEFAULT_SCALE_PERCENT,
        }
    }
}

impl BuilderConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.snap_distance.is_finite() || self.snap_distance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "snap_distance must be a non-negative number, got {}",
                self.snap_distance
            )));
        }
        if !self.axis_snap.threshold.is_finite() || self.axis_snap.threshold < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "axis_snap.threshold must be a non-negative number, got {}",
                self.axis_snap.threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.haptics.amplitude) {
            return Err(ConfigError::Invalid(format!(
                "haptics.amplitude must be within [0, 1], got {}",
                self.haptics.amplitude
            )));
        }
        if !self.haptics.duration.is_finite() || self.haptics.duration < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "haptics.duration must be a non-negative number, got {}",
                self.haptics.duration
            )));
        }
        if !self.scale_percent.is_finite() || self.scale_percent <= -100.0 {
            return Err(ConfigError::Invalid(format!(
                "scale_percent must be greater than -100, got {}",
                self.scale_percent
            )));
        }
        Ok(())
    }

    /// Parse and validate a RON string
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        let config: BuilderConfig =
            ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a pretty RON string
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Load configuration from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_ron_str(&content)
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = self.to_ron_string()?;
        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Io(e.to_string()))
    }
}

/// Configuration-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
