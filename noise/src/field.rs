//! Batch evaluation of fractal noise over many positions

use glam::Vec3;
use rayon::prelude::*;
use tracing::debug;

use crate::Noise;
use crate::domain::SpaceTrs;
use crate::error::ConfigError;
use crate::fractal::get_fractal_noise;
use crate::sample::Sample;
use crate::settings::Settings;

/// Evaluate fractal noise `N` for every position.
///
/// Positions are moved into noise space by `domain` and the resulting
/// gradients are mapped back, so derivatives are relative to the input
/// positions. Samples are independent and computed in parallel.
///
/// # Errors
///
/// Returns [`ConfigError`] if `settings` is out of range. Nothing is
/// evaluated in that case.
pub fn sample_noise<N: Noise>(
    positions: &[Vec3],
    settings: &Settings,
    domain: &SpaceTrs,
) -> Result<Vec<Sample>, ConfigError> {
    settings.validate()?;

    let matrix = domain.matrix();
    let derivative_matrix = domain.derivative_matrix();

    debug!(
        count = positions.len(),
        seed = settings.seed,
        octaves = settings.octaves,
        "sampling noise field"
    );

    Ok(positions
        .par_iter()
        .map(|&p| {
            let mut s = get_fractal_noise::<N>(matrix.transform_point3(p), settings);
            s.set_derivatives(derivative_matrix * s.derivatives());
            s
        })
        .collect())
}
