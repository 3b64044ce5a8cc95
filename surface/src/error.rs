//! Surface construction errors

use strata_mesh::MeshError;
use strata_noise::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("failed to parse surface config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid noise settings: {0}")]
    Settings(#[from] ConfigError),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// Noise dimensions must be 1, 2 or 3
    #[error("unsupported noise dimensions {0}, expected 1..=3")]
    Dimensions(u32),

    #[error("displacement {0} is not finite")]
    Displacement(f32),
}
