//! Octave summation

use glam::Vec3;

use crate::Noise;
use crate::hash::SmallXxHash;
use crate::sample::Sample;
use crate::settings::Settings;

/// Sum `settings.octaves` layers of `N`, each at a higher frequency and lower
/// amplitude than the last.
///
/// Octave `o` is seeded with `hash + o`. The sum is divided by the total
/// amplitude, so a single octave returns the base evaluator's sample as is.
#[inline]
pub fn get_fractal_noise<N: Noise>(position: Vec3, settings: &Settings) -> Sample {
    debug_assert!(settings.validate().is_ok(), "invalid noise settings: {:?}", settings);

    let hash = SmallXxHash::seed(settings.seed);
    let mut frequency = settings.frequency;
    let mut amplitude = 1.0;
    let mut amplitude_sum = 0.0;
    let mut sum = Sample::ZERO;

    for octave in 0..settings.octaves {
        sum += amplitude * N::get_noise(position, hash + octave as i32, frequency);
        amplitude_sum += amplitude;
        frequency = frequency.saturating_mul(settings.lacunarity);
        amplitude *= settings.persistence;
    }
    sum / amplitude_sum
}
