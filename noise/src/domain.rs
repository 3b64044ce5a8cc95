//! Domain transform applied to positions before noise evaluation

use glam::{Affine3A, EulerRot, Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Translation, rotation and scale of the noise domain
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpaceTrs {
    pub translation: Vec3,
    /// Euler angles in degrees, applied around Z, then X, then Y
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for SpaceTrs {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl SpaceTrs {
    pub fn rotation_quat(&self) -> Quat {
        let r = self.rotation * (std::f32::consts::PI / 180.0);
        Quat::from_euler(EulerRot::YXZ, r.y, r.x, r.z)
    }

    /// Transform from sample space into noise space
    pub fn matrix(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation_quat(), self.translation)
    }

    /// Maps a gradient in noise space back to sample space.
    ///
    /// This is the transpose of the linear part of [`SpaceTrs::matrix`].
    pub fn derivative_matrix(&self) -> Mat3 {
        Mat3::from(self.matrix().matrix3).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let trs = SpaceTrs::default();
        let p = Vec3::new(1.0, -2.0, 3.0);
        assert!(trs.matrix().transform_point3(p).abs_diff_eq(p, 1e-6));
        assert!(trs.derivative_matrix().abs_diff_eq(Mat3::IDENTITY, 1e-6));
    }

    #[test]
    fn test_rotation_order() {
        // 90° about Z then 90° about X: +X -> +Y -> +Z
        let trs = SpaceTrs {
            rotation: Vec3::new(90.0, 0.0, 90.0),
            ..Default::default()
        };
        let p = trs.matrix().transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::Z, 1e-5), "{:?}", p);
    }

    #[test]
    fn test_translation_and_scale() {
        let trs = SpaceTrs {
            translation: Vec3::new(1.0, 0.0, 0.0),
            scale: Vec3::splat(2.0),
            ..Default::default()
        };
        let p = trs.matrix().transform_point3(Vec3::ONE);
        assert!(p.abs_diff_eq(Vec3::new(3.0, 2.0, 2.0), 1e-6));
        assert!(
            trs.derivative_matrix()
                .abs_diff_eq(Mat3::from_diagonal(Vec3::splat(2.0)), 1e-6)
        );
    }

    #[test]
    fn test_derivative_matrix_chain_rule() {
        // f(p) = dot(g, M p) has gradient Mᵀ g
        let trs = SpaceTrs {
            rotation: Vec3::new(30.0, 45.0, 10.0),
            scale: Vec3::new(1.0, 2.0, 0.5),
            ..Default::default()
        };
        let g = Vec3::new(0.3, -0.7, 0.2);
        let m = trs.matrix();
        let f = |p: Vec3| g.dot(m.transform_point3(p));
        let p = Vec3::new(0.1, 0.2, 0.3);
        let h = 1e-2;
        let numeric = Vec3::new(
            (f(p + Vec3::X * h) - f(p - Vec3::X * h)) / (2.0 * h),
            (f(p + Vec3::Y * h) - f(p - Vec3::Y * h)) / (2.0 * h),
            (f(p + Vec3::Z * h) - f(p - Vec3::Z * h)) / (2.0 * h),
        );
        assert!((trs.derivative_matrix() * g).abs_diff_eq(numeric, 1e-4));
    }

    #[test]
    fn test_toml_defaults() {
        let trs: SpaceTrs = toml::from_str("translation = [1.0, 2.0, 3.0]").unwrap();
        assert_eq!(trs.translation, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(trs.scale, Vec3::ONE);
    }
}
