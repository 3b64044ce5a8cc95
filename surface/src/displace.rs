//! Displacing generated meshes with fractal noise
//!
//! Plane mode lifts each vertex of a flat xz mesh to the noise height.
//! Sphere mode scales each unit sphere vertex by one plus the noise. Both
//! rebuild normals and tangents from the analytic noise gradient, so no
//! neighbor lookups are needed and vertices are displaced independently.

use std::marker::PhantomData;

use glam::{Affine3A, Mat3, Vec3, Vec4};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use strata_mesh::{SingleStream, Vertex};
use strata_noise::{ConfigError, Noise, Settings, SpaceTrs, get_fractal_noise};
use tracing::debug;

/// Surface the mesh approximates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceMode {
    /// Flat mesh in the xz plane, displaced along +Y
    #[default]
    Plane,
    /// Unit sphere, displaced along the radius
    Sphere,
}

/// Noise displacement of a mesh, evaluated with noise type `N`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceJob<N> {
    pub settings: Settings,
    pub domain: SpaceTrs,
    /// Noise amplitude; negative values invert the surface
    pub displacement: f32,
    pub mode: SurfaceMode,
    _noise: PhantomData<N>,
}

impl<N: Noise> SurfaceJob<N> {
    pub fn new(settings: Settings, domain: SpaceTrs, displacement: f32, mode: SurfaceMode) -> Self {
        Self {
            settings,
            domain,
            displacement,
            mode,
            _noise: PhantomData,
        }
    }

    /// Displace every vertex of `streams` in parallel
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the noise settings are out of range. The
    /// mesh is left untouched in that case.
    pub fn run(&self, streams: &mut SingleStream) -> Result<(), ConfigError> {
        self.settings.validate()?;
        debug!(
            vertices = streams.vertices.len(),
            mode = ?self.mode,
            displacement = self.displacement,
            "displacing surface"
        );

        let frame = NoiseFrame {
            matrix: self.domain.matrix(),
            derivative_matrix: self.domain.derivative_matrix(),
        };
        streams.vertices.par_iter_mut().for_each(|stream0| {
            let vertex = Vertex::from(*stream0);
            let displaced = match self.mode {
                SurfaceMode::Plane => self.displace_plane(&frame, vertex),
                SurfaceMode::Sphere => self.displace_sphere(&frame, vertex),
            };
            *stream0 = displaced.into();
        });
        Ok(())
    }

    /// Noise value and sample-space gradient at `p`, scaled by the
    /// displacement
    fn noise(&self, frame: &NoiseFrame, p: Vec3) -> (f32, Vec3) {
        let s = get_fractal_noise::<N>(frame.matrix.transform_point3(p), &self.settings) * self.displacement;
        (s.v, frame.derivative_matrix * s.derivatives())
    }

    fn displace_plane(&self, frame: &NoiseFrame, mut vertex: Vertex) -> Vertex {
        let (height, d) = self.noise(frame, vertex.position);
        vertex.position.y = height;
        vertex.tangent = Vec3::new(1.0, d.x, 0.0).normalize().extend(-1.0);
        vertex.normal = Vec3::new(-d.x, 1.0, -d.z).normalize();
        vertex
    }

    fn displace_sphere(&self, frame: &NoiseFrame, mut vertex: Vertex) -> Vertex {
        let p = vertex.position;
        let (noise, d) = self.noise(frame, p);
        let scale = noise + 1.0;

        // Relative gradient of the radius, restricted to the sphere
        let d = d / scale;
        let d = d - p * p.dot(d);

        vertex.position = p * scale;
        vertex.normal = (p - d).normalize();

        let t = vertex.tangent.truncate();
        let t = (t - p * p.dot(t)).normalize_or_zero();
        let t = (t + p * d.dot(t)).normalize_or_zero();
        vertex.tangent = Vec4::from((t, vertex.tangent.w));
        vertex
    }
}

/// Domain transforms shared by every vertex of one run
struct NoiseFrame {
    matrix: Affine3A,
    derivative_matrix: Mat3,
}
