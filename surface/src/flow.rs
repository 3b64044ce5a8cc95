//! Particle flow over a noise-displaced surface
//!
//! Each update snaps particles onto the displaced surface, slightly above
//! it, and sets their velocity from the noise gradient: downhill, or along
//! the contour lines when curl flow is selected.

use std::marker::PhantomData;

use glam::Vec3;
use rayon::prelude::*;
use strata_noise::{ConfigError, Noise, Settings, SpaceTrs, get_fractal_noise};
use tracing::trace;

use crate::displace::SurfaceMode;

/// Height particles float above the surface
pub const FLOAT_HEIGHT: f32 = 0.05;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub alive: bool,
}

impl Particle {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            alive: true,
        }
    }
}

/// Flow over the surface displaced by noise `N`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowField<N> {
    pub settings: Settings,
    pub domain: SpaceTrs,
    pub displacement: f32,
    pub mode: SurfaceMode,
    /// Flow along contour lines instead of downhill
    pub curl: bool,
    _noise: PhantomData<N>,
}

impl<N: Noise> FlowField<N> {
    pub fn new(settings: Settings, domain: SpaceTrs, displacement: f32, mode: SurfaceMode, curl: bool) -> Self {
        Self {
            settings,
            domain,
            displacement,
            mode,
            curl,
            _noise: PhantomData,
        }
    }

    /// Project every particle onto the surface and set its velocity
    ///
    /// In plane mode particles that left the unit square are marked dead.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the noise settings are out of range.
    pub fn update(&self, particles: &mut [Particle]) -> Result<(), ConfigError> {
        self.settings.validate()?;
        trace!(count = particles.len(), mode = ?self.mode, curl = self.curl, "updating flow");

        let matrix = self.domain.matrix();
        let derivative_matrix = self.domain.derivative_matrix();
        particles.par_iter_mut().for_each(|particle| {
            let p = match self.mode {
                SurfaceMode::Plane => {
                    let p = particle.position * Vec3::new(1.0, 0.0, 1.0);
                    if p.x.abs() > 0.5 || p.z.abs() > 0.5 {
                        particle.alive = false;
                    }
                    p
                }
                SurfaceMode::Sphere => particle.position.normalize_or(Vec3::Y),
            };

            let s = get_fractal_noise::<N>(matrix.transform_point3(p), &self.settings) * self.displacement;
            let d = derivative_matrix * s.derivatives();

            match self.mode {
                SurfaceMode::Plane => {
                    particle.velocity.x = if self.curl { d.z } else { -d.x };
                    particle.velocity.z = if self.curl { -d.x } else { -d.z };
                    particle.position = Vec3::new(p.x, s.v + FLOAT_HEIGHT, p.z);
                }
                SurfaceMode::Sphere => {
                    let radius = s.v + 1.0;
                    let d = d / radius;
                    let d = d - p * p.dot(d);
                    particle.velocity = if self.curl { p.cross(d) } else { -d };
                    particle.position = p * (radius + FLOAT_HEIGHT);
                }
            }
        });
        Ok(())
    }
}
