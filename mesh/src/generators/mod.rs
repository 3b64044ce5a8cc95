//! Parametric mesh generators
//!
//! A generator is a small value type configured with a resolution. It
//! declares how many vertices and indices the mesh has and splits the work
//! into `job_length` units. [`MeshGenerator::execute`] writes exactly the
//! vertices and triangles owned by one unit, so units never overlap and can
//! run in any order. Shared variants reference vertices written by earlier
//! units instead of emitting them again.

mod cube_sphere;
mod hex_grid;
mod icosphere;
mod octasphere;
mod square_grid;
mod uv_sphere;

pub use cube_sphere::{CubeSphere, SharedCubeSphere};
pub use hex_grid::{FlatHexagonGrid, PointyHexagonGrid};
pub use icosphere::{GeoIcosphere, Icosphere};
pub use octasphere::{GeoOctasphere, Octasphere};
pub use square_grid::{SharedSquareGrid, SharedTriangleGrid, SquareGrid};
pub use uv_sphere::UvSphere;

use glam::{Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::bounds::Bounds;
use crate::streams::MeshStreams;
use crate::vertex::Vertex;

/// A mesh shape that can be generated unit by unit
pub trait MeshGenerator: Default + Copy + Send + Sync {
    /// Human-readable name used in logs and errors
    const NAME: &'static str;

    fn vertex_count(&self) -> usize;

    fn index_count(&self) -> usize;

    /// Number of independent generation units
    fn job_length(&self) -> usize;

    fn bounds(&self) -> Bounds;

    fn resolution(&self) -> u32;

    /// Set the resolution, clamped to at least 1
    fn set_resolution(&mut self, resolution: u32);

    /// Write the vertices and triangles of unit `i`
    fn execute<S: MeshStreams>(&self, i: usize, streams: &mut S);

    /// Generator at the given resolution
    fn with_resolution(resolution: u32) -> Self {
        let mut generator = Self::default();
        generator.set_resolution(resolution);
        generator
    }
}

/// Resolution field accessors shared by every generator
macro_rules! resolution_accessors {
    () => {
        fn resolution(&self) -> u32 {
            self.resolution
        }

        fn set_resolution(&mut self, resolution: u32) {
            self.resolution = $crate::generators::clamp_resolution(Self::NAME, resolution);
        }
    };
}

pub(crate) use resolution_accessors;

/// Clamp a requested resolution to the supported minimum of 1
pub(crate) fn clamp_resolution(generator: &str, resolution: u32) -> u32 {
    if resolution == 0 {
        warn!("{}: resolution must be >= 1, clamping to 1", generator);
        1
    } else {
        resolution
    }
}

/// Upward-facing vertex of a flat grid in the xz plane
pub(crate) fn flat_vertex() -> Vertex {
    Vertex {
        normal: Vec3::Y,
        tangent: Vec4::new(1.0, 0.0, 0.0, -1.0),
        ..Default::default()
    }
}

/// Tangent of a unit sphere point pointing along the line of latitude
///
/// Falls back to +X at the poles.
pub(crate) fn latitude_tangent(p: Vec3) -> Vec4 {
    let t = Vec2::new(-p.z, p.x).normalize_or(Vec2::X);
    Vec4::new(t.x, 0.0, t.y, -1.0)
}

/// Unit sphere vertex with normal and latitude tangent derived from its
/// position
pub(crate) fn sphere_vertex(position: Vec3) -> Vertex {
    Vertex {
        position,
        normal: position,
        tangent: latitude_tangent(position),
        tex_coord0: Vec2::ZERO,
    }
}

/// Every generator, for selecting one at runtime
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshKind {
    SquareGrid,
    SharedSquareGrid,
    SharedTriangleGrid,
    PointyHexagonGrid,
    FlatHexagonGrid,
    CubeSphere,
    SharedCubeSphere,
    UvSphere,
    Octasphere,
    GeoOctasphere,
    Icosphere,
    GeoIcosphere,
}

impl MeshKind {
    pub const ALL: [MeshKind; 12] = [
        MeshKind::SquareGrid,
        MeshKind::SharedSquareGrid,
        MeshKind::SharedTriangleGrid,
        MeshKind::PointyHexagonGrid,
        MeshKind::FlatHexagonGrid,
        MeshKind::CubeSphere,
        MeshKind::SharedCubeSphere,
        MeshKind::UvSphere,
        MeshKind::Octasphere,
        MeshKind::GeoOctasphere,
        MeshKind::Icosphere,
        MeshKind::GeoIcosphere,
    ];

    /// Flat grids lie in the xz plane; everything else is a unit sphere
    pub fn is_plane(self) -> bool {
        matches!(
            self,
            MeshKind::SquareGrid
                | MeshKind::SharedSquareGrid
                | MeshKind::SharedTriangleGrid
                | MeshKind::PointyHexagonGrid
                | MeshKind::FlatHexagonGrid
        )
    }
}

#[cfg(test)]
mod tests;
