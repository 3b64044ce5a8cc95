//! Procedural surfaces
//!
//! Ties the noise and mesh crates together: generate a mesh, displace it
//! with fractal noise, and rebuild its shading frame from the analytic noise
//! gradient. Also provides sample point sets for visualizing noise and a
//! particle flow field over displaced surfaces.
//!
//! # Example
//!
//! ```
//! use strata_surface::{SurfaceConfig, build_surface};
//!
//! let config = SurfaceConfig::from_toml("mesh = \"octasphere\"\nresolution = 8").unwrap();
//! let surface = build_surface(&config).unwrap();
//! assert!(!surface.streams.vertices.is_empty());
//! ```

pub mod config;
pub mod displace;
pub mod error;
pub mod flow;
pub mod shapes;

pub use config::{NoiseType, SurfaceConfig, SurfaceMesh, build_surface};
pub use displace::{SurfaceJob, SurfaceMode};
pub use error::SurfaceError;
pub use flow::{FlowField, Particle};
pub use shapes::{Plane, Points, Shape, Sphere, Torus, generate_points};
