//! Fractal noise settings

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Parameters of a fractal noise sum
///
/// Deserializes with missing fields filled from [`Settings::default`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Hash seed
    pub seed: i32,
    /// Lattice cells per unit for the first octave (at least 1)
    pub frequency: i32,
    /// Number of octaves (1..=6)
    pub octaves: u32,
    /// Frequency multiplier per octave (2..=4)
    pub lacunarity: i32,
    /// Amplitude multiplier per octave (0..=1)
    pub persistence: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,
            frequency: 4,
            octaves: 1,
            lacunarity: 2,
            persistence: 0.5,
        }
    }
}

impl Settings {
    pub const MAX_OCTAVES: u32 = 6;

    /// Default settings with the given seed
    pub fn with_seed(seed: i32) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Check every field against its documented range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frequency < 1 {
            return Err(ConfigError::Frequency(self.frequency));
        }
        if !(1..=Self::MAX_OCTAVES).contains(&self.octaves) {
            return Err(ConfigError::Octaves(self.octaves));
        }
        if !(2..=4).contains(&self.lacunarity) {
            return Err(ConfigError::Lacunarity(self.lacunarity));
        }
        if !(0.0..=1.0).contains(&self.persistence) {
            return Err(ConfigError::Persistence(self.persistence));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let settings = Settings::default();
        assert_eq!(settings.frequency, 4);
        assert_eq!(settings.octaves, 1);
        assert_eq!(settings.lacunarity, 2);
        assert_eq!(settings.persistence, 0.5);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_with_seed() {
        let settings = Settings::with_seed(99);
        assert_eq!(settings.seed, 99);
        assert_eq!(settings.frequency, 4);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let base = Settings::default();
        assert_eq!(
            Settings { frequency: 0, ..base }.validate(),
            Err(ConfigError::Frequency(0))
        );
        assert_eq!(
            Settings { octaves: 7, ..base }.validate(),
            Err(ConfigError::Octaves(7))
        );
        assert_eq!(
            Settings { octaves: 0, ..base }.validate(),
            Err(ConfigError::Octaves(0))
        );
        assert_eq!(
            Settings { lacunarity: 5, ..base }.validate(),
            Err(ConfigError::Lacunarity(5))
        );
        assert!(Settings { persistence: 1.5, ..base }.validate().is_err());
        assert!(Settings { persistence: f32::NAN, ..base }.validate().is_err());
    }

    #[test]
    fn test_toml_fills_defaults() {
        let settings: Settings = toml::from_str("seed = 7\noctaves = 3").unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.octaves, 3);
        assert_eq!(settings.frequency, 4);
        assert_eq!(settings.persistence, 0.5);
    }
}
