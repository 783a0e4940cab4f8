//! Uniform scaling about the bounding-box center

use glam::Vec3;

use crate::mesh::BoundingBox;

/// Convert a percentage change into a scale factor (`0.5` => `1.005`)
pub fn factor_from_percent(percent: f32) -> f32 {
    1.0 + percent / 100.0
}

/// Scale vertices in place about the center of their axis-aligned bounding box.
///
/// The pivot is derived from the min/max extents, not the vertex centroid.
/// Bounds and normals held elsewhere are stale afterwards and must be
/// recomputed by the owner. Empty input is left untouched.
pub fn scale_about_center(vertices: &mut [Vec3], factor: f32) {
    let Some(bbox) = BoundingBox::from_points(vertices.iter().copied()) else {
        return;
    };
    let center = bbox.center();

    for v in vertices.iter_mut() {
        *v = (*v - center) * factor + center;
    }
}
