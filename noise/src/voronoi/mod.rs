//! Cellular (Voronoi) noise
//!
//! Every lattice cell holds hashed feature points. A sample searches its own
//! cell and the neighbouring ones, tracks the nearest and second nearest
//! distance with a [`VoronoiDistance`] metric, and reduces them to a value
//! with a [`VoronoiFunction`].

mod distance;
mod function;

pub use distance::{Chebyshev, SmoothWorley, VoronoiDistance, Worley};
pub use function::{F1, F2, F2MinusF1, VoronoiFunction};

use std::marker::PhantomData;

use glam::Vec3;

use crate::Noise;
use crate::hash::SmallXxHash;
use crate::lattice::Lattice;
use crate::sample::Sample;

/// Nearest (`a`) and second nearest (`b`) distance
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VoronoiData {
    pub a: Sample,
    pub b: Sample,
}

/// Voronoi noise along x, searching three cells with one point each
#[derive(Clone, Copy, Debug, Default)]
pub struct Voronoi1D<L, D, F>(PhantomData<(L, D, F)>);

impl<L: Lattice, D: VoronoiDistance, F: VoronoiFunction> Noise for Voronoi1D<L, D, F> {
    fn get_noise(position: Vec3, hash: SmallXxHash, frequency: i32) -> Sample {
        let x = L::span(position.x, frequency);
        let mut data = D::initial_data();
        for u in -1..=1 {
            let h = hash.eat(L::validate_single_step(x.p0 + u, frequency));
            data = D::update(data, D::distance_1d(h.floats01_a() + u as f32 - x.g0));
        }
        F::evaluate(D::finalize_1d(data)).scale_derivatives(frequency as f32)
    }
}

/// Voronoi noise on the xz plane, searching 3×3 cells with two points each
#[derive(Clone, Copy, Debug, Default)]
pub struct Voronoi2D<L, D, F>(PhantomData<(L, D, F)>);

impl<L: Lattice, D: VoronoiDistance, F: VoronoiFunction> Noise for Voronoi2D<L, D, F> {
    fn get_noise(position: Vec3, hash: SmallXxHash, frequency: i32) -> Sample {
        let x = L::span(position.x, frequency);
        let z = L::span(position.z, frequency);
        let mut data = D::initial_data();
        for u in -1..=1 {
            let hx = hash.eat(L::validate_single_step(x.p0 + u, frequency));
            let x_offset = u as f32 - x.g0;
            for v in -1..=1 {
                let h = hx.eat(L::validate_single_step(z.p0 + v, frequency));
                let z_offset = v as f32 - z.g0;
                data = D::update(
                    data,
                    D::distance_2d(h.floats01_a() + x_offset, h.floats01_b() + z_offset),
                );
                data = D::update(
                    data,
                    D::distance_2d(h.floats01_c() + x_offset, h.floats01_d() + z_offset),
                );
            }
        }
        F::evaluate(D::finalize_2d(data)).scale_derivatives(frequency as f32)
    }
}

/// Voronoi noise in 3D, searching 3×3×3 cells with two points each
#[derive(Clone, Copy, Debug, Default)]
pub struct Voronoi3D<L, D, F>(PhantomData<(L, D, F)>);

impl<L: Lattice, D: VoronoiDistance, F: VoronoiFunction> Noise for Voronoi3D<L, D, F> {
    fn get_noise(position: Vec3, hash: SmallXxHash, frequency: i32) -> Sample {
        let x = L::span(position.x, frequency);
        let y = L::span(position.y, frequency);
        let z = L::span(position.z, frequency);
        let mut data = D::initial_data();
        for u in -1..=1 {
            let hx = hash.eat(L::validate_single_step(x.p0 + u, frequency));
            let x_offset = u as f32 - x.g0;
            for v in -1..=1 {
                let hy = hx.eat(L::validate_single_step(y.p0 + v, frequency));
                let y_offset = v as f32 - y.g0;
                for w in -1..=1 {
                    let h = hy.eat(L::validate_single_step(z.p0 + w, frequency));
                    let z_offset = w as f32 - z.g0;
                    // Two points per cell, 5 bits per coordinate
                    data = D::update(
                        data,
                        D::distance_3d(
                            h.bits_as_floats01(5, 0) + x_offset,
                            h.bits_as_floats01(5, 5) + y_offset,
                            h.bits_as_floats01(5, 10) + z_offset,
                        ),
                    );
                    data = D::update(
                        data,
                        D::distance_3d(
                            h.bits_as_floats01(5, 15) + x_offset,
                            h.bits_as_floats01(5, 20) + y_offset,
                            h.bits_as_floats01(5, 25) + z_offset,
                        ),
                    );
                }
            }
        }
        F::evaluate(D::finalize_3d(data)).scale_derivatives(frequency as f32)
    }
}

#[cfg(test)]
mod tests;
