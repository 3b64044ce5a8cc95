//! Noise value with analytic partial derivatives

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

/// A noise value together with its gradient.
///
/// All arithmetic applies to the value and the three partial derivatives
/// alike, so linear combinations keep a correct gradient without any extra
/// bookkeeping. Non-linear steps (smoothstep, rectification, square roots)
/// apply the chain rule explicitly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Noise value
    pub v: f32,
    /// ∂v/∂x
    pub dx: f32,
    /// ∂v/∂y
    pub dy: f32,
    /// ∂v/∂z
    pub dz: f32,
}

impl Sample {
    pub const ZERO: Self = Self::from_value(0.0);

    /// A constant value with zero gradient
    #[inline]
    pub const fn from_value(v: f32) -> Self {
        Self {
            v,
            dx: 0.0,
            dy: 0.0,
            dz: 0.0,
        }
    }

    #[inline]
    pub const fn new(v: f32, dx: f32, dy: f32, dz: f32) -> Self {
        Self { v, dx, dy, dz }
    }

    /// Gradient as a vector
    #[inline]
    pub fn derivatives(&self) -> Vec3 {
        Vec3::new(self.dx, self.dy, self.dz)
    }

    #[inline]
    pub fn set_derivatives(&mut self, d: Vec3) {
        self.dx = d.x;
        self.dy = d.y;
        self.dz = d.z;
    }

    /// Scale only the gradient
    #[inline]
    pub fn scale_derivatives(self, factor: f32) -> Self {
        Self {
            v: self.v,
            dx: self.dx * factor,
            dy: self.dy * factor,
            dz: self.dz * factor,
        }
    }

    /// Hermite smoothstep `v²(3 - 2v)` with the gradient scaled by `6v(1 - v)`
    #[inline]
    pub fn smoothstep(self) -> Self {
        let d = 6.0 * self.v * (1.0 - self.v);
        Self {
            v: self.v * self.v * (3.0 - 2.0 * self.v),
            dx: self.dx * d,
            dy: self.dy * d,
            dz: self.dz * d,
        }
    }

    /// `b` when `condition` holds, `a` otherwise
    #[inline]
    pub fn select(a: Self, b: Self, condition: bool) -> Self {
        if condition { b } else { a }
    }
}

impl From<f32> for Sample {
    #[inline]
    fn from(v: f32) -> Self {
        Self::from_value(v)
    }
}

impl Add for Sample {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            v: self.v + rhs.v,
            dx: self.dx + rhs.dx,
            dy: self.dy + rhs.dy,
            dz: self.dz + rhs.dz,
        }
    }
}

impl AddAssign for Sample {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Sample {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            v: self.v - rhs.v,
            dx: self.dx - rhs.dx,
            dy: self.dy - rhs.dy,
            dz: self.dz - rhs.dz,
        }
    }
}

impl Neg for Sample {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            v: -self.v,
            dx: -self.dx,
            dy: -self.dy,
            dz: -self.dz,
        }
    }
}

impl Mul<f32> for Sample {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self {
            v: self.v * rhs,
            dx: self.dx * rhs,
            dy: self.dy * rhs,
            dz: self.dz * rhs,
        }
    }
}

impl Mul<Sample> for f32 {
    type Output = Sample;

    #[inline]
    fn mul(self, rhs: Sample) -> Sample {
        rhs * self
    }
}

impl Div<f32> for Sample {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f32) -> Self {
        Self {
            v: self.v / rhs,
            dx: self.dx / rhs,
            dy: self.dy / rhs,
            dz: self.dz / rhs,
        }
    }
}
