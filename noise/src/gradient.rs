//! Gradient functions evaluated at lattice corners
//!
//! A gradient turns a corner hash and the offset from that corner into a
//! [`Sample`]. The 2D variants work on the xz plane: their second argument is
//! the z offset and its derivative lands in `dz`.

use std::marker::PhantomData;

use crate::hash::SmallXxHash;
use crate::sample::Sample;

pub trait Gradient: Default + Copy + Send + Sync + 'static {
    fn evaluate_1d(hash: SmallXxHash, x: f32) -> Sample;

    fn evaluate_2d(hash: SmallXxHash, x: f32, z: f32) -> Sample;

    fn evaluate_3d(hash: SmallXxHash, x: f32, y: f32, z: f32) -> Sample;

    /// Post-process the fully interpolated sample
    #[inline]
    fn evaluate_combined(value: Sample) -> Sample {
        value
    }
}

/// Hash-derived scalar in [-1, 1], no gradient
#[derive(Clone, Copy, Debug, Default)]
pub struct Value;

impl Value {
    #[inline]
    fn value(hash: SmallXxHash) -> Sample {
        Sample::from_value(hash.floats01_a() * 2.0 - 1.0)
    }
}

impl Gradient for Value {
    #[inline]
    fn evaluate_1d(hash: SmallXxHash, _x: f32) -> Sample {
        Self::value(hash)
    }

    #[inline]
    fn evaluate_2d(hash: SmallXxHash, _x: f32, _z: f32) -> Sample {
        Self::value(hash)
    }

    #[inline]
    fn evaluate_3d(hash: SmallXxHash, _x: f32, _y: f32, _z: f32) -> Sample {
        Self::value(hash)
    }
}

/// Perlin gradient noise, scaled so the peak output approaches ±1
#[derive(Clone, Copy, Debug, Default)]
pub struct Perlin;

impl Gradient for Perlin {
    #[inline]
    fn evaluate_1d(hash: SmallXxHash, x: f32) -> Sample {
        base_gradients::line(hash, x)
    }

    #[inline]
    fn evaluate_2d(hash: SmallXxHash, x: f32, z: f32) -> Sample {
        base_gradients::square(hash, x, z) * (2.0 / 0.53528)
    }

    #[inline]
    fn evaluate_3d(hash: SmallXxHash, x: f32, y: f32, z: f32) -> Sample {
        base_gradients::octahedron(hash, x, y, z) * (1.0 / 0.56290)
    }
}

/// Gradients for simplex kernels
#[derive(Clone, Copy, Debug, Default)]
pub struct Simplex;

impl Gradient for Simplex {
    #[inline]
    fn evaluate_1d(hash: SmallXxHash, x: f32) -> Sample {
        base_gradients::line(hash, x) * (32.0 / 27.0)
    }

    #[inline]
    fn evaluate_2d(hash: SmallXxHash, x: f32, z: f32) -> Sample {
        base_gradients::circle(hash, x, z) * (5.832 / std::f32::consts::SQRT_2)
    }

    #[inline]
    fn evaluate_3d(hash: SmallXxHash, x: f32, y: f32, z: f32) -> Sample {
        base_gradients::sphere(hash, x, y, z) * (1024.0 / (125.0 * 3f32.sqrt()))
    }
}

/// Rectified noise: `|v|` with the gradient flipped where `v` was negative
#[derive(Clone, Copy, Debug, Default)]
pub struct Turbulence<G>(PhantomData<G>);

impl<G: Gradient> Gradient for Turbulence<G> {
    #[inline]
    fn evaluate_1d(hash: SmallXxHash, x: f32) -> Sample {
        G::evaluate_1d(hash, x)
    }

    #[inline]
    fn evaluate_2d(hash: SmallXxHash, x: f32, z: f32) -> Sample {
        G::evaluate_2d(hash, x, z)
    }

    #[inline]
    fn evaluate_3d(hash: SmallXxHash, x: f32, y: f32, z: f32) -> Sample {
        G::evaluate_3d(hash, x, y, z)
    }

    #[inline]
    fn evaluate_combined(value: Sample) -> Sample {
        let s = G::evaluate_combined(value);
        if s.v < 0.0 { -s } else { s }
    }
}

/// Smoothstep remap of the combined value
#[derive(Clone, Copy, Debug, Default)]
pub struct Smoothstep<G>(PhantomData<G>);

impl<G: Gradient> Gradient for Smoothstep<G> {
    #[inline]
    fn evaluate_1d(hash: SmallXxHash, x: f32) -> Sample {
        G::evaluate_1d(hash, x)
    }

    #[inline]
    fn evaluate_2d(hash: SmallXxHash, x: f32, z: f32) -> Sample {
        G::evaluate_2d(hash, x, z)
    }

    #[inline]
    fn evaluate_3d(hash: SmallXxHash, x: f32, y: f32, z: f32) -> Sample {
        G::evaluate_3d(hash, x, y, z)
    }

    #[inline]
    fn evaluate_combined(value: Sample) -> Sample {
        G::evaluate_combined(value).smoothstep()
    }
}

/// Unscaled gradient shapes shared by [`Perlin`] and [`Simplex`]
pub mod base_gradients {
    use crate::hash::SmallXxHash;
    use crate::sample::Sample;

    /// Slope in [1, 2] with a hash-chosen sign
    #[inline]
    pub fn line(hash: SmallXxHash, x: f32) -> Sample {
        let magnitude = 1.0 + hash.floats01_a();
        let l = if hash.value() & (1 << 8) == 0 {
            magnitude
        } else {
            -magnitude
        };
        Sample {
            v: l * x,
            dx: l,
            ..Sample::ZERO
        }
    }

    /// Directions spread over the edges of a square
    #[inline]
    fn square_vectors(hash: SmallXxHash) -> (f32, f32) {
        let mut x = hash.floats01_a() * 2.0 - 1.0;
        let z = 0.5 - x.abs();
        x -= (x + 0.5).floor();
        (x, z)
    }

    /// Directions spread over the surface of an octahedron
    #[inline]
    fn octahedron_vectors(hash: SmallXxHash) -> (f32, f32, f32) {
        let mut x = hash.floats01_a() * 2.0 - 1.0;
        let mut y = hash.floats01_d() * 2.0 - 1.0;
        let z = 1.0 - x.abs() - y.abs();
        let offset = (-z).max(0.0);
        x += if x < 0.0 { offset } else { -offset };
        y += if y < 0.0 { offset } else { -offset };
        (x, y, z)
    }

    #[inline]
    pub fn square(hash: SmallXxHash, x: f32, z: f32) -> Sample {
        let (gx, gz) = square_vectors(hash);
        Sample {
            v: gx * x + gz * z,
            dx: gx,
            dy: 0.0,
            dz: gz,
        }
    }

    /// Square directions normalized to unit length
    #[inline]
    pub fn circle(hash: SmallXxHash, x: f32, z: f32) -> Sample {
        let (gx, gz) = square_vectors(hash);
        Sample {
            v: gx * x + gz * z,
            dx: gx,
            dy: 0.0,
            dz: gz,
        } * (gx * gx + gz * gz).sqrt().recip()
    }

    #[inline]
    pub fn octahedron(hash: SmallXxHash, x: f32, y: f32, z: f32) -> Sample {
        let (gx, gy, gz) = octahedron_vectors(hash);
        Sample {
            v: gx * x + gy * y + gz * z,
            dx: gx,
            dy: gy,
            dz: gz,
        }
    }

    /// Octahedron directions normalized to unit length
    #[inline]
    pub fn sphere(hash: SmallXxHash, x: f32, y: f32, z: f32) -> Sample {
        let (gx, gy, gz) = octahedron_vectors(hash);
        Sample {
            v: gx * x + gy * y + gz * z,
            dx: gx,
            dy: gy,
            dz: gz,
        } * (gx * gx + gy * gy + gz * gz).sqrt().recip()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_range() {
        for i in 0..512 {
            let s = Value::evaluate_3d(SmallXxHash::seed(1).eat(i), 0.3, 0.1, 0.2);
            assert!((-1.0..=1.0).contains(&s.v));
            assert_eq!(s.derivatives(), glam::Vec3::ZERO);
        }
    }

    #[test]
    fn test_line_slope_magnitude() {
        for i in 0..256 {
            let s = base_gradients::line(SmallXxHash::seed(0).eat(i), 1.0);
            assert!((1.0..=2.0).contains(&s.dx.abs()));
            assert_eq!(s.v, s.dx);
        }
    }

    #[test]
    fn test_sphere_gradient_is_unit() {
        for i in 0..256 {
            let s = base_gradients::sphere(SmallXxHash::seed(4).eat(i), 0.0, 0.0, 0.0);
            assert!((s.derivatives().length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_circle_gradient_is_unit() {
        for i in 0..256 {
            let s = base_gradients::circle(SmallXxHash::seed(4).eat(i), 0.0, 0.0);
            assert_eq!(s.dy, 0.0);
            assert!((s.derivatives().length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_octahedron_gradient_on_surface() {
        for i in 0..256 {
            let s = base_gradients::octahedron(SmallXxHash::seed(2).eat(i), 0.0, 0.0, 0.0);
            let l1 = s.dx.abs() + s.dy.abs() + s.dz.abs();
            assert!((l1 - 1.0).abs() < 1e-5, "l1 norm {}", l1);
        }
    }

    #[test]
    fn test_turbulence_rectifies() {
        let s = Turbulence::<Perlin>::evaluate_combined(Sample::new(-0.5, 1.0, -2.0, 3.0));
        assert_eq!(s, Sample::new(0.5, -1.0, 2.0, -3.0));
        let s = Turbulence::<Perlin>::evaluate_combined(Sample::new(0.5, 1.0, -2.0, 3.0));
        assert_eq!(s, Sample::new(0.5, 1.0, -2.0, 3.0));
    }

    #[test]
    fn test_smoothstep_combined() {
        let raw = Sample::new(0.25, 1.0, 0.0, 0.0);
        assert_eq!(Smoothstep::<Value>::evaluate_combined(raw), raw.smoothstep());
    }
}
