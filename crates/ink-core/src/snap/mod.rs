//! Snapping of candidate positions
//!
//! - Axis snapping constrains the offset from the previous point
//! - Vertex snapping reuses an existing mesh vertex near the candidate

mod axis;
mod vertex;

pub use axis::{AxisSnap, project};
pub use vertex::find_nearest;
