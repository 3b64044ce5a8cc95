//! Flat grids of unit size in the xz plane

use glam::{IVec3, Vec2, Vec3};

use super::{MeshGenerator, flat_vertex, resolution_accessors};
use crate::bounds::Bounds;
use crate::streams::MeshStreams;

const SQRT_3_OVER_2: f32 = 0.866_025_4;

/// Grid of independent quads, four vertices per quad
///
/// Every quad carries its own full [0, 1] texture space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SquareGrid {
    resolution: u32,
}

impl Default for SquareGrid {
    fn default() -> Self {
        Self { resolution: 1 }
    }
}

impl MeshGenerator for SquareGrid {
    const NAME: &'static str = "square grid";

    fn vertex_count(&self) -> usize {
        let r = self.resolution as usize;
        4 * r * r
    }

    fn index_count(&self) -> usize {
        let r = self.resolution as usize;
        6 * r * r
    }

    fn job_length(&self) -> usize {
        self.resolution as usize
    }

    fn bounds(&self) -> Bounds {
        Bounds::from_size(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0))
    }

    resolution_accessors!();

    fn execute<S: MeshStreams>(&self, z: usize, streams: &mut S) {
        let r = self.resolution as usize;
        let rf = self.resolution as f32;
        let mut vi = 4 * r * z;
        let mut ti = 2 * r * z;

        let z0 = z as f32 / rf - 0.5;
        let z1 = (z + 1) as f32 / rf - 0.5;

        for x in 0..r {
            let x0 = x as f32 / rf - 0.5;
            let x1 = (x + 1) as f32 / rf - 0.5;

            let mut vertex = flat_vertex();
            vertex.position = Vec3::new(x0, 0.0, z0);
            streams.set_vertex(vi, vertex);

            vertex.position.x = x1;
            vertex.tex_coord0 = Vec2::new(1.0, 0.0);
            streams.set_vertex(vi + 1, vertex);

            vertex.position = Vec3::new(x0, 0.0, z1);
            vertex.tex_coord0 = Vec2::new(0.0, 1.0);
            streams.set_vertex(vi + 2, vertex);

            vertex.position.x = x1;
            vertex.tex_coord0 = Vec2::ONE;
            streams.set_vertex(vi + 3, vertex);

            let base = IVec3::splat(vi as i32);
            streams.set_triangle(ti, base + IVec3::new(0, 2, 1));
            streams.set_triangle(ti + 1, base + IVec3::new(1, 2, 3));

            vi += 4;
            ti += 2;
        }
    }
}

/// Square grid whose quads share their corner vertices
///
/// Unit `z` writes row `z` of vertices and, past the first row, the quads
/// connecting it to the row below.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SharedSquareGrid {
    resolution: u32,
}

impl Default for SharedSquareGrid {
    fn default() -> Self {
        Self { resolution: 1 }
    }
}

impl MeshGenerator for SharedSquareGrid {
    const NAME: &'static str = "shared square grid";

    fn vertex_count(&self) -> usize {
        let r = self.resolution as usize;
        (r + 1) * (r + 1)
    }

    fn index_count(&self) -> usize {
        let r = self.resolution as usize;
        6 * r * r
    }

    fn job_length(&self) -> usize {
        self.resolution as usize + 1
    }

    fn bounds(&self) -> Bounds {
        Bounds::from_size(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0))
    }

    resolution_accessors!();

    fn execute<S: MeshStreams>(&self, z: usize, streams: &mut S) {
        let r = self.resolution as i32;
        let rf = self.resolution as f32;
        let mut vi = (r + 1) * z as i32;
        let mut ti = 2 * r * (z as i32 - 1);

        let mut vertex = flat_vertex();
        vertex.position = Vec3::new(-0.5, 0.0, z as f32 / rf - 0.5);
        vertex.tex_coord0.y = z as f32 / rf;
        streams.set_vertex(vi as usize, vertex);
        vi += 1;

        for x in 1..=r {
            vertex.position.x = x as f32 / rf - 0.5;
            vertex.tex_coord0.x = x as f32 / rf;
            streams.set_vertex(vi as usize, vertex);
            if z > 0 {
                let base = IVec3::splat(vi);
                streams.set_triangle(ti as usize, base + IVec3::new(-r - 2, -1, -r - 1));
                streams.set_triangle(ti as usize + 1, base + IVec3::new(-r - 1, -1, 0));
            }
            vi += 1;
            ti += 2;
        }
    }
}

/// Grid of equilateral triangles with shared vertices
///
/// Odd rows are shifted half a cell to the right, which makes the grid
/// wider than one unit by half a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SharedTriangleGrid {
    resolution: u32,
}

impl Default for SharedTriangleGrid {
    fn default() -> Self {
        Self { resolution: 1 }
    }
}

impl MeshGenerator for SharedTriangleGrid {
    const NAME: &'static str = "shared triangle grid";

    fn vertex_count(&self) -> usize {
        let r = self.resolution as usize;
        (r + 1) * (r + 1)
    }

    fn index_count(&self) -> usize {
        let r = self.resolution as usize;
        6 * r * r
    }

    fn job_length(&self) -> usize {
        self.resolution as usize + 1
    }

    fn bounds(&self) -> Bounds {
        let rf = self.resolution as f32;
        Bounds::from_size(Vec3::ZERO, Vec3::new(1.0 + 0.5 / rf, 0.0, SQRT_3_OVER_2))
    }

    resolution_accessors!();

    fn execute<S: MeshStreams>(&self, z: usize, streams: &mut S) {
        let r = self.resolution as i32;
        let rf = self.resolution as f32;
        let mut vi = (r + 1) * z as i32;
        let mut ti = 2 * r * (z as i32 - 1);

        // Corners of the quad ending at the current vertex
        let (a, b, c, d) = (-r - 2, -r - 1, -1, 0);
        let (x_offset, u_offset, tri_a, tri_b) = if z & 1 == 1 {
            (
                0.25,
                0.5 / (rf + 0.5),
                IVec3::new(a, c, b),
                IVec3::new(b, c, d),
            )
        } else {
            (-0.25, 0.0, IVec3::new(a, c, d), IVec3::new(a, d, b))
        };
        let x_offset = x_offset / rf - 0.5;

        let mut vertex = flat_vertex();
        vertex.position = Vec3::new(x_offset, 0.0, (z as f32 / rf - 0.5) * SQRT_3_OVER_2);
        vertex.tex_coord0 = Vec2::new(u_offset, vertex.position.z / (1.0 + 0.5 / rf) + 0.5);
        streams.set_vertex(vi as usize, vertex);
        vi += 1;

        for x in 1..=r {
            vertex.position.x = x as f32 / rf + x_offset;
            vertex.tex_coord0.x = x as f32 / (rf + 0.5) + u_offset;
            streams.set_vertex(vi as usize, vertex);
            if z > 0 {
                let base = IVec3::splat(vi);
                streams.set_triangle(ti as usize, base + tri_a);
                streams.set_triangle(ti as usize + 1, base + tri_b);
            }
            vi += 1;
            ti += 2;
        }
    }
}
