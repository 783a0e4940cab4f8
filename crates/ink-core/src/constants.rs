//! Global constants for ink-core

/// Default distance within which a placed point snaps onto an existing vertex
pub const DEFAULT_SNAP_DISTANCE: f32 = 0.05;

/// Default per-axis threshold for axis snapping
pub const DEFAULT_AXIS_SNAP_THRESHOLD: f32 = 0.02;

/// Default haptic click amplitude (0..=1)
pub const HAPTIC_CLICK_AMPLITUDE: f32 = 1.0;

/// Default haptic click duration in seconds
pub const HAPTIC_CLICK_DURATION: f32 = 0.011;

/// Default percentage used by the scale operation (0.5 => factor 1.005)
pub const DEFAULT_SCALE_PERCENT: f32 = 0.5;

/// Default number of ticks the anchor task waits for localization
pub const DEFAULT_MAX_LOCALIZE_POLLS: u32 = 600;

/// Size of the binary STL header in bytes
pub const STL_HEADER_SIZE: usize = 80;

/// Size of one binary STL triangle record in bytes
pub const STL_TRIANGLE_RECORD_SIZE: usize = 50;

/// Base name of exported mesh files
pub const EXPORT_FILE_STEM: &str = "exported_mesh";
