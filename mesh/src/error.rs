//! Mesh generation errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// The mesh needs more vertices than 16-bit indices can address
    #[error("{generator} at resolution {resolution} needs {vertex_count} vertices, more than 16-bit indices address")]
    IndexOverflow {
        generator: &'static str,
        resolution: u32,
        vertex_count: usize,
    },
}
