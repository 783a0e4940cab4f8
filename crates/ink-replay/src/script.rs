//! Recorded input scripts
//!
//! A script is a RON file holding one list of input events per tick, plus
//! optional session setup.

use std::path::Path;

use ink_core::{InputEvent, SnapReferenceFrame};
use serde::{Deserialize, Serialize};

use crate::error::ReplayError;

/// Tick rate assumed when a script does not set one
pub const DEFAULT_TICK_RATE: f64 = 72.0;

/// Simulated anchor service behavior
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatedAnchor {
    /// Localization polls answered `false` before the anchor is localized
    pub localize_after: u32,
    /// Fail anchor creation instead of succeeding
    pub fail_create: bool,
}

impl Default for SimulatedAnchor {
    fn default() -> Self {
        Self {
            localize_after: 3,
            fail_create: false,
        }
    }
}

/// A recorded session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    /// Reference frame for axis snapping
    pub frame: Option<SnapReferenceFrame>,
    /// Events delivered on each tick
    pub ticks: Vec<Vec<InputEvent>>,
    /// Ticks per second, used to stamp the exported file
    pub tick_rate: f64,
    /// Scale applied to the mesh after the last tick
    pub scale_percent: Option<f32>,
    /// Anchor service to simulate; no anchoring when absent
    pub anchor: Option<SimulatedAnchor>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            frame: None,
            ticks: Vec::new(),
            tick_rate: DEFAULT_TICK_RATE,
            scale_percent: None,
            anchor: None,
        }
    }
}

impl Script {
    /// Parse a script from RON
    pub fn from_ron_str(content: &str) -> Result<Self, ReplayError> {
        let script: Script =
            ron::from_str(content).map_err(|e| ReplayError::Script(e.to_string()))?;
        if !(script.tick_rate.is_finite() && script.tick_rate > 0.0) {
            return Err(ReplayError::Script(format!(
                "tick_rate must be positive, got {}",
                script.tick_rate
            )));
        }
        Ok(script)
    }

    /// Load a script file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ReplayError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_ron_str(&content)
    }

    /// Session time after the last tick, in seconds
    pub fn duration_secs(&self) -> f64 {
        self.ticks.len() as f64 / self.tick_rate
    }
}
