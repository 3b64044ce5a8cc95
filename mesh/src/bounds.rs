//! Axis-aligned bounding box

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned box described by its center and half-size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub center: Vec3,
    pub extents: Vec3,
}

impl Bounds {
    pub const fn new(center: Vec3, extents: Vec3) -> Self {
        Self { center, extents }
    }

    /// Box with the given full size
    pub fn from_size(center: Vec3, size: Vec3) -> Self {
        Self {
            center,
            extents: size * 0.5,
        }
    }

    pub fn size(&self) -> Vec3 {
        self.extents * 2.0
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.extents
    }

    /// Grow the half-size on every axis
    #[must_use]
    pub fn expand(self, extra_extents: Vec3) -> Self {
        Self {
            center: self.center,
            extents: self.extents + extra_extents,
        }
    }

    /// Whether `point` lies inside, allowing `tolerance` on every side
    pub fn contains(&self, point: Vec3, tolerance: f32) -> bool {
        (point - self.center).abs().cmple(self.extents + tolerance).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_size() {
        let b = Bounds::from_size(Vec3::ZERO, Vec3::new(1.0, 0.0, 2.0));
        assert_eq!(b.extents, Vec3::new(0.5, 0.0, 1.0));
        assert_eq!(b.size(), Vec3::new(1.0, 0.0, 2.0));
        assert_eq!(b.min(), Vec3::new(-0.5, 0.0, -1.0));
    }

    #[test]
    fn test_expand_and_contains() {
        let b = Bounds::from_size(Vec3::ZERO, Vec3::ONE).expand(Vec3::new(0.0, 1.0, 0.0));
        assert!(b.contains(Vec3::new(0.5, 1.4, -0.5), 0.0));
        assert!(!b.contains(Vec3::new(0.6, 0.0, 0.0), 0.0));
        assert!(b.contains(Vec3::new(0.6, 0.0, 0.0), 0.2));
    }
}
