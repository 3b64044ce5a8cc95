//! Hash-based pseudorandom noise with analytic derivatives
//!
//! Noise evaluators are zero-sized types composed from independent parts:
//!
//! - a [`Lattice`] layout (unbounded or tiling),
//! - a [`Gradient`] function (value, Perlin, simplex, optionally rectified or
//!   smoothstepped),
//! - or, for cellular noise, a [`VoronoiDistance`] metric and a
//!   [`VoronoiFunction`].
//!
//! Every composition implements [`Noise`] and is monomorphised, so the
//! per-sample path has no dynamic dispatch. Each evaluation returns a
//! [`Sample`] carrying the value and its gradient.
//!
//! # Example
//!
//! ```
//! use glam::Vec3;
//! use strata_noise::{get_fractal_noise, Lattice3D, LatticeNormal, Perlin, Settings};
//!
//! let settings = Settings { octaves: 3, ..Default::default() };
//! let sample = get_fractal_noise::<Lattice3D<LatticeNormal, Perlin>>(Vec3::new(0.1, 0.2, 0.3), &settings);
//! assert!(sample.v.is_finite());
//! ```

pub mod domain;
pub mod error;
pub mod field;
pub mod fractal;
pub mod gradient;
pub mod hash;
pub mod lattice;
pub mod sample;
pub mod settings;
pub mod simplex;
pub mod voronoi;

use glam::Vec3;

pub use domain::SpaceTrs;
pub use error::ConfigError;
pub use field::sample_noise;
pub use fractal::get_fractal_noise;
pub use gradient::{Gradient, Perlin, Simplex, Smoothstep, Turbulence, Value, base_gradients};
pub use hash::{SmallXxHash, SmallXxHash4, hash_points};
pub use lattice::{Lattice, Lattice1D, Lattice2D, Lattice3D, LatticeNormal, LatticeSpan, LatticeTiling};
pub use sample::Sample;
pub use settings::Settings;
pub use simplex::{Simplex1D, Simplex2D, Simplex3D};
pub use voronoi::{
    Chebyshev, F1, F2, F2MinusF1, SmoothWorley, Voronoi1D, Voronoi2D, Voronoi3D, VoronoiData,
    VoronoiDistance, VoronoiFunction, Worley,
};

/// A noise evaluator
pub trait Noise: Default + Copy + Send + Sync + 'static {
    /// Sample the noise at `position` with `frequency` lattice cells per unit
    fn get_noise(position: Vec3, hash: SmallXxHash, frequency: i32) -> Sample;
}
