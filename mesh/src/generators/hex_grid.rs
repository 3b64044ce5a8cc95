//! Hexagon grids built from independent seven-vertex fans

use glam::{IVec3, Vec2, Vec3};

use super::{MeshGenerator, flat_vertex, resolution_accessors};
use crate::bounds::Bounds;
use crate::streams::MeshStreams;

/// Half the inner radius of a hexagon with outer radius 0.5
const H: f32 = 0.433_012_7;

const SQRT_3: f32 = 1.732_050_8;

/// Write one hexagon: a center vertex plus six rim vertices, fanned into
/// six triangles
fn write_hexagon<S: MeshStreams>(
    streams: &mut S,
    vi: usize,
    ti: usize,
    positions: [Vec2; 7],
    tex_coords: [Vec2; 7],
) {
    let mut vertex = flat_vertex();
    for (i, (p, uv)) in positions.into_iter().zip(tex_coords).enumerate() {
        vertex.position = Vec3::new(p.x, 0.0, p.y);
        vertex.tex_coord0 = uv;
        streams.set_vertex(vi + i, vertex);
    }

    let base = IVec3::splat(vi as i32);
    for i in 0..6 {
        let next = if i == 5 { 1 } else { i + 2 };
        streams.set_triangle(ti + i as usize, base + IVec3::new(0, i + 1, next));
    }
}

/// Hexagons with a vertex pointing along ±Z, rows along X
///
/// Odd rows are shifted by half a hexagon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointyHexagonGrid {
    resolution: u32,
}

impl Default for PointyHexagonGrid {
    fn default() -> Self {
        Self { resolution: 1 }
    }
}

impl MeshGenerator for PointyHexagonGrid {
    const NAME: &'static str = "pointy hexagon grid";

    fn vertex_count(&self) -> usize {
        let r = self.resolution as usize;
        7 * r * r
    }

    fn index_count(&self) -> usize {
        let r = self.resolution as usize;
        18 * r * r
    }

    fn job_length(&self) -> usize {
        self.resolution as usize
    }

    fn bounds(&self) -> Bounds {
        let rf = self.resolution as f32;
        let width = if self.resolution > 1 { 0.5 + 0.25 / rf } else { 0.5 };
        Bounds::from_size(Vec3::ZERO, Vec3::new(width * SQRT_3, 0.0, 0.75 + 0.25 / rf))
    }

    resolution_accessors!();

    fn execute<S: MeshStreams>(&self, z: usize, streams: &mut S) {
        let r = self.resolution as usize;
        let rf = self.resolution as f32;
        let mut vi = 7 * r * z;
        let mut ti = 6 * r * z;

        let center_offset = if r > 1 {
            let row_shift = if z & 1 == 0 { 0.5 } else { 1.5 };
            Vec2::new((row_shift - rf) * H, -0.375 * (rf - 1.0))
        } else {
            Vec2::ZERO
        };

        let tex_coords = [
            Vec2::splat(0.5),
            Vec2::new(0.5, 0.0),
            Vec2::new(0.5 - H, 0.25),
            Vec2::new(0.5 - H, 0.75),
            Vec2::new(0.5, 1.0),
            Vec2::new(0.5 + H, 0.75),
            Vec2::new(0.5 + H, 0.25),
        ];

        for x in 0..r {
            let c = (Vec2::new(2.0 * H * x as f32, 0.75 * z as f32) + center_offset) / rf;
            let (left, right) = (c.x - H / rf, c.x + H / rf);
            let zs = [-0.5, -0.25, 0.25, 0.5].map(|o| c.y + o / rf);
            let positions = [
                c,
                Vec2::new(c.x, zs[0]),
                Vec2::new(left, zs[1]),
                Vec2::new(left, zs[2]),
                Vec2::new(c.x, zs[3]),
                Vec2::new(right, zs[2]),
                Vec2::new(right, zs[1]),
            ];
            write_hexagon(streams, vi, ti, positions, tex_coords);
            vi += 7;
            ti += 6;
        }
    }
}

/// Hexagons with a flat edge facing ±Z, columns along Z
///
/// Odd columns are shifted by half a hexagon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlatHexagonGrid {
    resolution: u32,
}

impl Default for FlatHexagonGrid {
    fn default() -> Self {
        Self { resolution: 1 }
    }
}

impl MeshGenerator for FlatHexagonGrid {
    const NAME: &'static str = "flat hexagon grid";

    fn vertex_count(&self) -> usize {
        let r = self.resolution as usize;
        7 * r * r
    }

    fn index_count(&self) -> usize {
        let r = self.resolution as usize;
        18 * r * r
    }

    fn job_length(&self) -> usize {
        self.resolution as usize
    }

    fn bounds(&self) -> Bounds {
        let rf = self.resolution as f32;
        let depth = if self.resolution > 1 { 0.5 + 0.25 / rf } else { 0.5 };
        Bounds::from_size(Vec3::ZERO, Vec3::new(0.75 + 0.25 / rf, 0.0, depth * SQRT_3))
    }

    resolution_accessors!();

    fn execute<S: MeshStreams>(&self, x: usize, streams: &mut S) {
        let r = self.resolution as usize;
        let rf = self.resolution as f32;
        let mut vi = 7 * r * x;
        let mut ti = 6 * r * x;

        let center_offset = if r > 1 {
            let column_shift = if x & 1 == 0 { 0.5 } else { 1.5 };
            Vec2::new(-0.375 * (rf - 1.0), (column_shift - rf) * H)
        } else {
            Vec2::ZERO
        };

        let tex_coords = [
            Vec2::splat(0.5),
            Vec2::new(0.0, 0.5),
            Vec2::new(0.25, 0.5 + H),
            Vec2::new(0.75, 0.5 + H),
            Vec2::new(1.0, 0.5),
            Vec2::new(0.75, 0.5 - H),
            Vec2::new(0.25, 0.5 - H),
        ];

        for z in 0..r {
            let c = (Vec2::new(0.75 * x as f32, 2.0 * H * z as f32) + center_offset) / rf;
            let xs = [-0.5, -0.25, 0.25, 0.5].map(|o| c.x + o / rf);
            let (top, bottom) = (c.y + H / rf, c.y - H / rf);
            let positions = [
                c,
                Vec2::new(xs[0], c.y),
                Vec2::new(xs[1], top),
                Vec2::new(xs[2], top),
                Vec2::new(xs[3], c.y),
                Vec2::new(xs[2], bottom),
                Vec2::new(xs[1], bottom),
            ];
            write_hexagon(streams, vi, ti, positions, tex_coords);
            vi += 7;
            ti += 6;
        }
    }
}
