//! Parametric mesh generation
//!
//! A [`MeshGenerator`] describes a shape at some resolution and splits its
//! construction into independent units. A [`MeshStreams`] sink decides how
//! the emitted vertices are laid out in memory. [`MeshJob`] ties the two
//! together and runs the units serially or on the rayon pool.
//!
//! # Example
//!
//! ```
//! use strata_mesh::{MeshJob, SingleStream, generators::Octasphere};
//!
//! let job = MeshJob::<Octasphere>::new(8).unwrap();
//! let mut streams = SingleStream::new();
//! job.run_parallel(&mut streams);
//! assert_eq!(streams.vertices.len(), 4 * 64 + 2 * 8 + 7);
//! ```

pub mod bounds;
pub mod error;
pub mod generators;
pub mod job;
pub mod packing;
pub mod streams;
pub mod vertex;

pub use bounds::Bounds;
pub use error::MeshError;
pub use generators::{MeshGenerator, MeshKind};
pub use job::{MAX_VERTEX_COUNT, MeshJob};
pub use streams::{
    AttributeDescriptor, MeshStreams, MultiStream, PackedStream, PackedVertex, PositionStream, SingleStream, Stream0,
    TriangleStream, VertexAttribute, VertexFormat, VertexLayout,
};
pub use vertex::{TriangleU16, Vertex};
