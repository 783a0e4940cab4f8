//! Nearest-vertex lookup

use glam::Vec3;

/// Find the closest vertex strictly within `tolerance` of `point`.
///
/// Linear scan in insertion order; on equal distances the lower index wins.
pub fn find_nearest(point: Vec3, vertices: &[Vec3], tolerance: f32) -> Option<usize> {
    let mut closest_dist_sq = tolerance * tolerance;
    let mut closest = None;

    for (i, vertex) in vertices.iter().enumerate() {
        let dist_sq = vertex.distance_squared(point);
        if dist_sq < closest_dist_sq {
            closest_dist_sq = dist_sq;
            closest = Some(i);
        }
    }

    closest
}
