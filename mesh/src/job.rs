//! Running a generator over all of its units
//!
//! [`MeshJob::run`] executes units in order straight into the sink.
//! [`MeshJob::run_parallel`] forks every unit onto the rayon pool, each
//! writing into its own recording, joins them, and only then replays the
//! recordings into the sink. Units own disjoint vertex and triangle slots,
//! so replay order does not matter.

use glam::{IVec3, Vec3};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::bounds::Bounds;
use crate::error::MeshError;
use crate::generators::MeshGenerator;
use crate::streams::{MeshStreams, VertexLayout};
use crate::vertex::Vertex;

/// Largest vertex count addressable with 16-bit indices
pub const MAX_VERTEX_COUNT: usize = u16::MAX as usize + 1;

/// A configured generator ready to fill a sink
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshJob<G> {
    generator: G,
    extra_bounds_extents: Vec3,
}

impl<G: MeshGenerator> MeshJob<G> {
    /// Configure `G` at `resolution`
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::IndexOverflow`] if the mesh needs more vertices
    /// than 16-bit indices can address.
    pub fn new(resolution: u32) -> Result<Self, MeshError> {
        let generator = G::with_resolution(resolution);
        let vertex_count = generator.vertex_count();
        if vertex_count > MAX_VERTEX_COUNT {
            return Err(MeshError::IndexOverflow {
                generator: G::NAME,
                resolution: generator.resolution(),
                vertex_count,
            });
        }
        Ok(Self {
            generator,
            extra_bounds_extents: Vec3::ZERO,
        })
    }

    /// Grow the declared bounds, for meshes displaced after generation
    #[must_use]
    pub fn with_extra_bounds_extents(mut self, extra: Vec3) -> Self {
        self.extra_bounds_extents = extra;
        self
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn bounds(&self) -> Bounds {
        self.generator.bounds().expand(self.extra_bounds_extents)
    }

    fn setup<S: MeshStreams>(&self, streams: &mut S) {
        streams.setup(
            self.bounds(),
            self.generator.vertex_count(),
            self.generator.index_count(),
        );
    }

    /// Execute every unit in order on the calling thread
    pub fn run<S: MeshStreams>(&self, streams: &mut S) {
        self.setup(streams);
        debug!(
            generator = G::NAME,
            resolution = self.generator.resolution(),
            units = self.generator.job_length(),
            "generating mesh"
        );
        for i in 0..self.generator.job_length() {
            self.generator.execute(i, streams);
        }
    }

    /// Execute every unit on the rayon pool, then write the results
    pub fn run_parallel<S: MeshStreams>(&self, streams: &mut S) {
        self.setup(streams);
        debug!(
            generator = G::NAME,
            resolution = self.generator.resolution(),
            units = self.generator.job_length(),
            "generating mesh in parallel"
        );

        let generator = self.generator;
        let recordings: Vec<Recording> = (0..generator.job_length())
            .into_par_iter()
            .map(|i| {
                let mut recording = Recording::default();
                generator.execute(i, &mut recording);
                recording
            })
            .collect();

        let mut vertices = 0;
        let mut triangles = 0;
        for recording in recordings {
            vertices += recording.vertices.len();
            triangles += recording.triangles.len();
            recording.replay(streams);
        }
        trace!(vertices, triangles, "replayed unit recordings");

        debug_assert_eq!(vertices, generator.vertex_count(), "{} vertex count", G::NAME);
        debug_assert_eq!(triangles * 3, generator.index_count(), "{} index count", G::NAME);
    }
}

/// Writes of one unit, kept in emission order
#[derive(Default)]
struct Recording {
    vertices: Vec<(usize, Vertex)>,
    triangles: Vec<(usize, IVec3)>,
}

impl Recording {
    fn replay<S: MeshStreams>(self, streams: &mut S) {
        for (index, vertex) in self.vertices {
            streams.set_vertex(index, vertex);
        }
        for (index, triangle) in self.triangles {
            streams.set_triangle(index, triangle);
        }
    }
}

impl MeshStreams for Recording {
    fn setup(&mut self, _bounds: Bounds, _vertex_count: usize, _index_count: usize) {}

    fn set_vertex(&mut self, index: usize, vertex: Vertex) {
        self.vertices.push((index, vertex));
    }

    fn set_triangle(&mut self, index: usize, triangle: IVec3) {
        self.triangles.push((index, triangle));
    }

    fn layout(&self) -> VertexLayout {
        VertexLayout::default()
    }
}
