//! Surface configuration (TOML) and mesh construction
//!
//! ```toml
//! mesh = "geo_icosphere"
//! noise = "simplex_smooth_turbulence"
//! dimensions = 3
//! resolution = 20
//! displacement = 0.25
//!
//! [settings]
//! seed = 7
//! octaves = 4
//!
//! [domain]
//! scale = [2.0, 2.0, 2.0]
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};
use strata_mesh::generators::{
    CubeSphere, FlatHexagonGrid, GeoIcosphere, GeoOctasphere, Icosphere, Octasphere, PointyHexagonGrid,
    SharedCubeSphere, SharedSquareGrid, SharedTriangleGrid, SquareGrid, UvSphere,
};
use strata_mesh::{MeshError, MeshGenerator, MeshJob, MeshKind, SingleStream};
use strata_noise::{
    F1, Lattice1D, Lattice2D, Lattice3D, LatticeNormal, Noise, Perlin, Settings, Simplex, Simplex1D, Simplex2D,
    Simplex3D, Smoothstep, SpaceTrs, Turbulence, Value, Voronoi1D, Voronoi2D, Voronoi3D, Worley,
};
use tracing::{debug, info};

use crate::displace::{SurfaceJob, SurfaceMode};
use crate::error::SurfaceError;

/// Noise used to displace the surface
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseType {
    #[default]
    Simplex,
    SimplexSmoothTurbulence,
    SimplexValue,
    Perlin,
    Value,
    Worley,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    #[serde(default = "default_mesh")]
    pub mesh: MeshKind,
    #[serde(default)]
    pub noise: NoiseType,
    /// Noise dimensions, 1..=3
    #[serde(default = "default_dimensions")]
    pub dimensions: u32,
    #[serde(default = "default_resolution")]
    pub resolution: u32,
    #[serde(default = "default_displacement")]
    pub displacement: f32,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub domain: SpaceTrs,
}

fn default_mesh() -> MeshKind {
    MeshKind::SharedSquareGrid
}
fn default_dimensions() -> u32 {
    1
}
fn default_resolution() -> u32 {
    16
}
fn default_displacement() -> f32 {
    0.5
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            mesh: default_mesh(),
            noise: NoiseType::default(),
            dimensions: default_dimensions(),
            resolution: default_resolution(),
            displacement: default_displacement(),
            settings: Settings::default(),
            domain: SpaceTrs::default(),
        }
    }
}

impl SurfaceConfig {
    /// Parse and validate a TOML config
    pub fn from_toml(content: &str) -> Result<Self, SurfaceError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), SurfaceError> {
        self.settings.validate()?;
        if !(1..=3).contains(&self.dimensions) {
            return Err(SurfaceError::Dimensions(self.dimensions));
        }
        if !self.displacement.is_finite() {
            return Err(SurfaceError::Displacement(self.displacement));
        }
        Ok(())
    }

    pub fn mode(&self) -> SurfaceMode {
        if self.mesh.is_plane() {
            SurfaceMode::Plane
        } else {
            SurfaceMode::Sphere
        }
    }

    /// Bounds growth covering the largest displacement
    pub fn extra_bounds_extents(&self) -> Vec3 {
        let d = self.displacement.abs();
        match self.mode() {
            SurfaceMode::Plane => Vec3::new(0.0, d, 0.0),
            SurfaceMode::Sphere => Vec3::splat(d),
        }
    }
}

/// A generated and displaced mesh
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceMesh {
    pub mode: SurfaceMode,
    pub streams: SingleStream,
}

/// Generate the configured mesh and displace it with the configured noise
pub fn build_surface(config: &SurfaceConfig) -> Result<SurfaceMesh, SurfaceError> {
    config.validate()?;
    info!(
        mesh = ?config.mesh,
        noise = ?config.noise,
        dimensions = config.dimensions,
        resolution = config.resolution,
        "building surface"
    );

    let extra = config.extra_bounds_extents();
    let mut streams = match config.mesh {
        MeshKind::SquareGrid => generate::<SquareGrid>(config.resolution, extra),
        MeshKind::SharedSquareGrid => generate::<SharedSquareGrid>(config.resolution, extra),
        MeshKind::SharedTriangleGrid => generate::<SharedTriangleGrid>(config.resolution, extra),
        MeshKind::PointyHexagonGrid => generate::<PointyHexagonGrid>(config.resolution, extra),
        MeshKind::FlatHexagonGrid => generate::<FlatHexagonGrid>(config.resolution, extra),
        MeshKind::CubeSphere => generate::<CubeSphere>(config.resolution, extra),
        MeshKind::SharedCubeSphere => generate::<SharedCubeSphere>(config.resolution, extra),
        MeshKind::UvSphere => generate::<UvSphere>(config.resolution, extra),
        MeshKind::Octasphere => generate::<Octasphere>(config.resolution, extra),
        MeshKind::GeoOctasphere => generate::<GeoOctasphere>(config.resolution, extra),
        MeshKind::Icosphere => generate::<Icosphere>(config.resolution, extra),
        MeshKind::GeoIcosphere => generate::<GeoIcosphere>(config.resolution, extra),
    }?;

    type SmoothTurbulence = Smoothstep<Turbulence<Simplex>>;
    type DisplaceFn = fn(&SurfaceConfig, &mut SingleStream) -> Result<(), SurfaceError>;
    let displace_with: DisplaceFn = match (config.noise, config.dimensions) {
        (NoiseType::Simplex, 1) => displace::<Simplex1D<Simplex>>,
        (NoiseType::Simplex, 2) => displace::<Simplex2D<Simplex>>,
        (NoiseType::Simplex, _) => displace::<Simplex3D<Simplex>>,
        (NoiseType::SimplexSmoothTurbulence, 1) => displace::<Simplex1D<SmoothTurbulence>>,
        (NoiseType::SimplexSmoothTurbulence, 2) => displace::<Simplex2D<SmoothTurbulence>>,
        (NoiseType::SimplexSmoothTurbulence, _) => displace::<Simplex3D<SmoothTurbulence>>,
        (NoiseType::SimplexValue, 1) => displace::<Simplex1D<Value>>,
        (NoiseType::SimplexValue, 2) => displace::<Simplex2D<Value>>,
        (NoiseType::SimplexValue, _) => displace::<Simplex3D<Value>>,
        (NoiseType::Perlin, 1) => displace::<Lattice1D<LatticeNormal, Perlin>>,
        (NoiseType::Perlin, 2) => displace::<Lattice2D<LatticeNormal, Perlin>>,
        (NoiseType::Perlin, _) => displace::<Lattice3D<LatticeNormal, Perlin>>,
        (NoiseType::Value, 1) => displace::<Lattice1D<LatticeNormal, Value>>,
        (NoiseType::Value, 2) => displace::<Lattice2D<LatticeNormal, Value>>,
        (NoiseType::Value, _) => displace::<Lattice3D<LatticeNormal, Value>>,
        (NoiseType::Worley, 1) => displace::<Voronoi1D<LatticeNormal, Worley, F1>>,
        (NoiseType::Worley, 2) => displace::<Voronoi2D<LatticeNormal, Worley, F1>>,
        (NoiseType::Worley, _) => displace::<Voronoi3D<LatticeNormal, Worley, F1>>,
    };
    displace_with(config, &mut streams)?;

    Ok(SurfaceMesh {
        mode: config.mode(),
        streams,
    })
}

fn generate<G: MeshGenerator>(resolution: u32, extra: Vec3) -> Result<SingleStream, MeshError> {
    let job = MeshJob::<G>::new(resolution)?.with_extra_bounds_extents(extra);
    let mut streams = SingleStream::new();
    job.run_parallel(&mut streams);
    debug!(
        generator = G::NAME,
        vertices = streams.vertices.len(),
        indices = streams.triangles.index_count(),
        "mesh generated"
    );
    Ok(streams)
}

fn displace<N: Noise>(config: &SurfaceConfig, streams: &mut SingleStream) -> Result<(), SurfaceError> {
    SurfaceJob::<N>::new(config.settings, config.domain, config.displacement, config.mode()).run(streams)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_noise::ConfigError;

    #[test]
    fn test_default_config() {
        let config: SurfaceConfig = toml::from_str("").unwrap();
        assert_eq!(config, SurfaceConfig::default());
        assert_eq!(config.mode(), SurfaceMode::Plane);
    }

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            mesh = "geo_icosphere"
            noise = "simplex_smooth_turbulence"
            dimensions = 3
            resolution = 20
            displacement = 0.25

            [settings]
            seed = 7
            octaves = 4

            [domain]
            scale = [2.0, 2.0, 2.0]
        "#;
        let config = SurfaceConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.mesh, MeshKind::GeoIcosphere);
        assert_eq!(config.noise, NoiseType::SimplexSmoothTurbulence);
        assert_eq!(config.settings.seed, 7);
        assert_eq!(config.settings.octaves, 4);
        assert_eq!(config.settings.frequency, Settings::default().frequency);
        assert_eq!(config.domain.scale, Vec3::splat(2.0));
        assert_eq!(config.mode(), SurfaceMode::Sphere);
        assert_eq!(config.extra_bounds_extents(), Vec3::splat(0.25));
    }

    #[test]
    fn test_roundtrip() {
        let config = SurfaceConfig {
            mesh: MeshKind::Octasphere,
            noise: NoiseType::Worley,
            dimensions: 2,
            ..Default::default()
        };
        let parsed = SurfaceConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let err = SurfaceConfig::from_toml("[settings]\nlacunarity = 7").unwrap_err();
        assert!(matches!(err, SurfaceError::Settings(ConfigError::Lacunarity(7))));

        let err = SurfaceConfig::from_toml("dimensions = 4").unwrap_err();
        assert!(matches!(err, SurfaceError::Dimensions(4)));

        let err = SurfaceConfig::from_toml("mesh = \"teapot\"").unwrap_err();
        assert!(matches!(err, SurfaceError::Parse(_)));
    }

    #[test]
    fn test_rejects_index_overflow() {
        let config = SurfaceConfig {
            mesh: MeshKind::CubeSphere,
            resolution: 60,
            ..Default::default()
        };
        assert!(matches!(build_surface(&config), Err(SurfaceError::Mesh(_))));
    }

    #[test]
    fn test_simplex_surfaces_use_full_displacement() {
        for (noise, dimensions) in [(NoiseType::Simplex, 2), (NoiseType::Simplex, 3), (NoiseType::SimplexValue, 3)] {
            let config = SurfaceConfig {
                noise,
                dimensions,
                resolution: 32,
                displacement: 0.5,
                ..Default::default()
            };
            let surface = build_surface(&config).unwrap();
            let highest = surface
                .streams
                .vertices
                .iter()
                .map(|v| v.position[1].abs())
                .fold(0.0, f32::max);
            assert!(highest > 0.2, "{noise:?} {dimensions}: highest {highest}");
            assert!(highest <= 0.5 + 1e-3, "{noise:?} {dimensions}: highest {highest}");
        }
    }

    #[test]
    fn test_every_combination_builds() {
        for mesh in MeshKind::ALL {
            for noise in [
                NoiseType::Simplex,
                NoiseType::SimplexSmoothTurbulence,
                NoiseType::SimplexValue,
                NoiseType::Perlin,
                NoiseType::Value,
                NoiseType::Worley,
            ] {
                for dimensions in 1..=3 {
                    let config = SurfaceConfig {
                        mesh,
                        noise,
                        dimensions,
                        resolution: 3,
                        ..Default::default()
                    };
                    let surface = build_surface(&config).unwrap();
                    let bounds = surface.streams.bounds;
                    for v in &surface.streams.vertices {
                        let p = Vec3::from(v.position);
                        assert!(p.is_finite(), "{mesh:?} {noise:?} {dimensions}");
                        assert!(bounds.contains(p, 1e-3), "{mesh:?} {noise:?} {dimensions}: {p}");
                    }
                }
            }
        }
    }
}
