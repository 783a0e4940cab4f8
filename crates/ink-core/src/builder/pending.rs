//! Points of the triangle under construction

use glam::Vec3;

/// A committed point waiting for its triangle to close
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingPoint {
    /// Final (snapped) position
    pub position: Vec3,
    /// Buffer vertex this point resolved to, if it snapped onto one
    pub vertex: Option<u32>,
}

/// Placement progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementState {
    /// No pending points
    #[default]
    Idle,
    /// One pending point
    Placing1,
    /// Two pending points; the next commit closes a triangle
    Placing2,
}

/// Up to two committed points of the next triangle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingTriangle {
    points: Vec<PendingPoint>,
}

impl PendingTriangle {
    pub fn new() -> Self {
        Self {
            points: Vec::with_capacity(3),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PendingPoint] {
        &self.points
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.points.iter().map(|p| p.position).collect()
    }

    /// Position of the most recent point
    pub fn last_position(&self) -> Option<Vec3> {
        self.points.last().map(|p| p.position)
    }

    pub fn state(&self) -> PlacementState {
        match self.points.len() {
            0 => PlacementState::Idle,
            1 => PlacementState::Placing1,
            _ => PlacementState::Placing2,
        }
    }

    pub(crate) fn push(&mut self, point: PendingPoint) {
        debug_assert!(self.points.len() < 3);
        self.points.push(point);
    }

    pub(crate) fn pop(&mut self) -> Option<PendingPoint> {
        self.points.pop()
    }

    /// Take all three points once the triangle is complete
    pub(crate) fn take_triangle(&mut self) -> Option<[PendingPoint; 3]> {
        if self.points.len() != 3 {
            return None;
        }
        let triangle = [self.points[0], self.points[1], self.points[2]];
        self.points.clear();
        Some(triangle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f32) -> PendingPoint {
        PendingPoint {
            position: Vec3::new(x, 0.0, 0.0),
            vertex: None,
        }
    }

    #[test]
    fn test_states() {
        let mut pending = PendingTriangle::new();
        assert_eq!(pending.state(), PlacementState::Idle);
        pending.push(point(0.0));
        assert_eq!(pending.state(), PlacementState::Placing1);
        pending.push(point(1.0));
        assert_eq!(pending.state(), PlacementState::Placing2);
        assert_eq!(pending.last_position(), Some(Vec3::X));
    }

    #[test]
    fn test_take_triangle_requires_three() {
        let mut pending = PendingTriangle::new();
        pending.push(point(0.0));
        pending.push(point(1.0));
        assert!(pending.take_triangle().is_none());
        pending.push(point(2.0));
        let tri = pending.take_triangle().unwrap();
        assert_eq!(tri[2].position, Vec3::new(2.0, 0.0, 0.0));
        assert!(pending.is_empty());
    }
}
