//! Noise configuration errors

use thiserror::Error;

/// Invalid noise [`Settings`](crate::Settings)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Base frequency must be at least one lattice cell per unit
    #[error("frequency must be at least 1, got {0}")]
    Frequency(i32),

    /// Octave count outside 1..=6
    #[error("octaves must be in 1..=6, got {0}")]
    Octaves(u32),

    /// Lacunarity outside 2..=4
    #[error("lacunarity must be in 2..=4, got {0}")]
    Lacunarity(i32),

    /// Persistence outside 0..=1 (or NaN)
    #[error("persistence must be in 0..=1, got {0}")]
    Persistence(f32),
}
