//! Lattice noise
//!
//! Positions are split into an integer cell and a fractional offset per
//! axis. Each cell corner is hashed, fed to a [`Gradient`], and the corner
//! samples are blended with a quintic fade. Derivatives follow the product
//! rule through every blend and are finally scaled by the frequency, so they
//! are expressed in the input space rather than in lattice units.

use glam::Vec3;

use crate::Noise;
use crate::gradient::Gradient;
use crate::hash::SmallXxHash;
use crate::sample::Sample;

/// One axis of a lattice cell
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LatticeSpan {
    /// Lower lattice point
    pub p0: i32,
    /// Upper lattice point
    pub p1: i32,
    /// Offset from `p0`
    pub g0: f32,
    /// Offset from `p1` (always `g0 - 1`)
    pub g1: f32,
    /// Faded interpolation weight
    pub t: f32,
    /// Derivative of the fade with respect to the offset
    pub dt: f32,
}

impl LatticeSpan {
    fn from_scaled(coordinate: f32) -> Self {
        let point = coordinate.floor();
        let g0 = coordinate - point;
        let t = g0;
        Self {
            p0: point as i32,
            p1: (point as i32).wrapping_add(1),
            g0,
            g1: g0 - 1.0,
            t: t * t * t * (t * (t * 6.0 - 15.0) + 10.0),
            dt: t * t * (t * (t * 30.0 - 60.0) + 30.0),
        }
    }
}

/// How lattice points are laid out along an axis
pub trait Lattice: Default + Copy + Send + Sync + 'static {
    /// The cell containing `coordinate` at the given frequency
    fn span(coordinate: f32, frequency: i32) -> LatticeSpan;

    /// Fix up a point one step outside the cell returned by [`Lattice::span`]
    fn validate_single_step(point: i32, frequency: i32) -> i32;
}

/// Unbounded integer lattice
#[derive(Clone, Copy, Debug, Default)]
pub struct LatticeNormal;

impl Lattice for LatticeNormal {
    #[inline]
    fn span(coordinate: f32, frequency: i32) -> LatticeSpan {
        LatticeSpan::from_scaled(coordinate * frequency as f32)
    }

    #[inline]
    fn validate_single_step(point: i32, _frequency: i32) -> i32 {
        point
    }
}

/// Lattice wrapped modulo the frequency.
///
/// Noise built on it repeats with period 1 in input space.
#[derive(Clone, Copy, Debug, Default)]
pub struct LatticeTiling;

impl Lattice for LatticeTiling {
    #[inline]
    fn span(coordinate: f32, frequency: i32) -> LatticeSpan {
        debug_assert!(frequency >= 1, "tiling lattice needs a positive frequency");
        let mut span = LatticeSpan::from_scaled(coordinate * frequency as f32);
        span.p0 = span.p0.rem_euclid(frequency);
        span.p1 = if span.p0 + 1 == frequency { 0 } else { span.p0 + 1 };
        span
    }

    #[inline]
    fn validate_single_step(point: i32, frequency: i32) -> i32 {
        if point == -1 {
            frequency - 1
        } else if point == frequency {
            0
        } else {
            point
        }
    }
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
    Z,
}

/// Fade between two corner samples along one axis.
///
/// The value slope `(b - a) * dt` lands on the derivative of that axis.
#[inline]
fn blend(a: Sample, b: Sample, span: &LatticeSpan, axis: Axis) -> Sample {
    let t = span.t;
    let mut s = Sample {
        v: a.v + (b.v - a.v) * t,
        dx: a.dx + (b.dx - a.dx) * t,
        dy: a.dy + (b.dy - a.dy) * t,
        dz: a.dz + (b.dz - a.dz) * t,
    };
    let slope = (b.v - a.v) * span.dt;
    match axis {
        Axis::X => s.dx += slope,
        Axis::Y => s.dy += slope,
        Axis::Z => s.dz += slope,
    }
    s
}

/// Lattice noise along x
#[derive(Clone, Copy, Debug, Default)]
pub struct Lattice1D<L, G>(std::marker::PhantomData<(L, G)>);

impl<L: Lattice, G: Gradient> Noise for Lattice1D<L, G> {
    fn get_noise(position: Vec3, hash: SmallXxHash, frequency: i32) -> Sample {
        let x = L::span(position.x, frequency);
        let a = G::evaluate_1d(hash.eat(x.p0), x.g0);
        let b = G::evaluate_1d(hash.eat(x.p1), x.g1);
        let s = blend(a, b, &x, Axis::X).scale_derivatives(frequency as f32);
        G::evaluate_combined(s)
    }
}

/// Lattice noise on the xz plane
#[derive(Clone, Copy, Debug, Default)]
pub struct Lattice2D<L, G>(std::marker::PhantomData<(L, G)>);

impl<L: Lattice, G: Gradient> Noise for Lattice2D<L, G> {
    fn get_noise(position: Vec3, hash: SmallXxHash, frequency: i32) -> Sample {
        let x = L::span(position.x, frequency);
        let z = L::span(position.z, frequency);
        let h0 = hash.eat(x.p0);
        let h1 = hash.eat(x.p1);

        let a = G::evaluate_2d(h0.eat(z.p0), x.g0, z.g0);
        let b = G::evaluate_2d(h0.eat(z.p1), x.g0, z.g1);
        let c = G::evaluate_2d(h1.eat(z.p0), x.g1, z.g0);
        let d = G::evaluate_2d(h1.eat(z.p1), x.g1, z.g1);

        let s = blend(
            blend(a, b, &z, Axis::Z),
            blend(c, d, &z, Axis::Z),
            &x,
            Axis::X,
        );
        G::evaluate_combined(s.scale_derivatives(frequency as f32))
    }
}

/// Lattice noise in 3D
#[derive(Clone, Copy, Debug, Default)]
pub struct Lattice3D<L, G>(std::marker::PhantomData<(L, G)>);

impl<L: Lattice, G: Gradient> Noise for Lattice3D<L, G> {
    fn get_noise(position: Vec3, hash: SmallXxHash, frequency: i32) -> Sample {
        let x = L::span(position.x, frequency);
        let y = L::span(position.y, frequency);
        let z = L::span(position.z, frequency);

        let h0 = hash.eat(x.p0);
        let h1 = hash.eat(x.p1);
        let h00 = h0.eat(y.p0);
        let h01 = h0.eat(y.p1);
        let h10 = h1.eat(y.p0);
        let h11 = h1.eat(y.p1);

        let column = |h: SmallXxHash, gx: f32, gy: f32| {
            blend(
                G::evaluate_3d(h.eat(z.p0), gx, gy, z.g0),
                G::evaluate_3d(h.eat(z.p1), gx, gy, z.g1),
                &z,
                Axis::Z,
            )
        };

        let s = blend(
            blend(
                column(h00, x.g0, y.g0),
                column(h01, x.g0, y.g1),
                &y,
                Axis::Y,
            ),
            blend(
                column(h10, x.g1, y.g0),
                column(h11, x.g1, y.g1),
                &y,
                Axis::Y,
            ),
            &x,
            Axis::X,
        );
        G::evaluate_combined(s.scale_derivatives(frequency as f32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_span() {
        let span = LatticeNormal::span(0.3, 4);
        assert_eq!(span.p0, 1);
        assert_eq!(span.p1, 2);
        assert!((span.g0 - 0.2).abs() < 1e-5);
        assert!((span.g1 + 0.8).abs() < 1e-5);
    }

    #[test]
    fn test_normal_span_negative() {
        let span = LatticeNormal::span(-0.1, 4);
        assert_eq!(span.p0, -1);
        assert_eq!(span.p1, 0);
        assert!((span.g0 - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_span_at_i32_limit() {
        let span = LatticeNormal::span(i32::MAX as f32, 1);
        assert_eq!(span.p1, span.p0.wrapping_add(1));
    }

    #[test]
    fn test_fade_endpoints() {
        let start = LatticeNormal::span(2.0, 1);
        assert_eq!(start.t, 0.0);
        assert_eq!(start.dt, 0.0);

        let mid = LatticeNormal::span(0.5, 1);
        assert!((mid.t - 0.5).abs() < 1e-6);
        assert!((mid.dt - 1.875).abs() < 1e-6);
    }

    #[test]
    fn test_tiling_span_wraps() {
        let span = LatticeTiling::span(-0.1, 4);
        assert_eq!(span.p0, 3);
        assert_eq!(span.p1, 0);

        let span = LatticeTiling::span(1.3, 4);
        assert_eq!(span.p0, 1);
        assert_eq!(span.p1, 2);

        let span = LatticeTiling::span(0.9, 4);
        assert_eq!(span.p0, 3);
        assert_eq!(span.p1, 0);
    }

    #[test]
    fn test_tiling_single_step() {
        assert_eq!(LatticeTiling::validate_single_step(-1, 4), 3);
        assert_eq!(LatticeTiling::validate_single_step(4, 4), 0);
        assert_eq!(LatticeTiling::validate_single_step(2, 4), 2);
        assert_eq!(LatticeTiling::validate_single_step(-1, 1), 0);
        assert_eq!(LatticeTiling::validate_single_step(1, 1), 0);
        assert_eq!(LatticeNormal::validate_single_step(-1, 4), -1);
    }
}
