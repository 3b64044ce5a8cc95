//! Sample point sets for visualizing hashes and noise
//!
//! A shape maps a square grid of `resolution²` points onto a surface. Each
//! point gets a position and a surface normal, both transformed by a
//! user-supplied matrix.

use std::f32::consts::TAU;

use glam::{Mat4, Vec2, Vec3};
use rayon::prelude::*;
use strata_noise::{ConfigError, Noise, Sample, Settings, SpaceTrs, hash_points, sample_noise};
use tracing::debug;

/// A parametric surface over the unit square
pub trait Shape: Send + Sync {
    /// Position and (unnormalized) normal at `uv` in [0, 1]²
    fn point(uv: Vec2) -> (Vec3, Vec3);
}

/// Unit square in the xz plane, facing up
#[derive(Clone, Copy, Debug, Default)]
pub struct Plane;

impl Shape for Plane {
    fn point(uv: Vec2) -> (Vec3, Vec3) {
        (Vec3::new(uv.x - 0.5, 0.0, uv.y - 0.5), Vec3::Y)
    }
}

/// Sphere of radius 0.5, mapped from the square through an octahedron
#[derive(Clone, Copy, Debug, Default)]
pub struct Sphere;

impl Shape for Sphere {
    fn point(uv: Vec2) -> (Vec3, Vec3) {
        let mut p = Vec3::new(uv.x - 0.5, uv.y - 0.5, 0.0);
        p.z = 0.5 - p.x.abs() - p.y.abs();
        // Fold the corners over to the back half
        let offset = (-p.z).max(0.0);
        p.x += if p.x < 0.0 { offset } else { -offset };
        p.y += if p.y < 0.0 { offset } else { -offset };
        let p = p * (0.5 / p.length());
        (p, p)
    }
}

/// Torus around the y axis with major radius 0.375 and minor radius 0.125
#[derive(Clone, Copy, Debug, Default)]
pub struct Torus;

impl Torus {
    const MAJOR: f32 = 0.375;
    const MINOR: f32 = 0.125;
}

impl Shape for Torus {
    fn point(uv: Vec2) -> (Vec3, Vec3) {
        let (sin_u, cos_u) = (TAU * uv.x).sin_cos();
        let (sin_v, cos_v) = (TAU * uv.y).sin_cos();
        let s = Self::MAJOR + Self::MINOR * cos_v;
        let position = Vec3::new(s * sin_u, Self::MINOR * sin_v, s * cos_u);
        let normal = position - Vec3::new(Self::MAJOR * sin_u, 0.0, Self::MAJOR * cos_u);
        (position, normal)
    }
}

/// Positions and unit normals of a sampled shape
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Points {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
}

impl Points {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Hash of every point's integer cell in `domain`
    pub fn hashes(&self, seed: i32, domain: &SpaceTrs) -> Vec<u32> {
        hash_points(&self.positions, seed, domain)
    }

    /// Fractal noise at every point
    pub fn noise<N: Noise>(&self, settings: &Settings, domain: &SpaceTrs) -> Result<Vec<Sample>, ConfigError> {
        sample_noise::<N>(&self.positions, settings, domain)
    }
}

/// Texture coordinate of point `i` on a `resolution`² grid, at cell centers
fn index_to_uv(i: usize, resolution: u32) -> Vec2 {
    let r = resolution as usize;
    let inv = 1.0 / resolution as f32;
    Vec2::new(((i % r) as f32 + 0.5) * inv, ((i / r) as f32 + 0.5) * inv)
}

/// Sample `resolution²` points of `S`, transformed by `trs`
///
/// Normals go through the inverse transpose of `trs`, so they stay
/// perpendicular under non-uniform scale.
pub fn generate_points<S: Shape>(resolution: u32, trs: Mat4) -> Points {
    let resolution = resolution.max(1);
    let count = (resolution * resolution) as usize;
    let normal_matrix = trs.inverse().transpose();
    debug!(resolution, count, "generating shape points");

    let (positions, normals) = (0..count)
        .into_par_iter()
        .map(|i| {
            let (p, n) = S::point(index_to_uv(i, resolution));
            (
                trs.transform_point3(p),
                normal_matrix.transform_vector3(n).normalize_or_zero(),
            )
        })
        .unzip();

    Points { positions, normals }
}
