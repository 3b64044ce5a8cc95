//! Latitude/longitude sphere

use std::f32::consts::PI;

use glam::{IVec3, Vec2, Vec3, Vec4};

use super::{MeshGenerator, resolution_accessors};
use crate::bounds::Bounds;
use crate::streams::MeshStreams;
use crate::vertex::Vertex;

/// Unit sphere with `4R` columns around and `2R` rows from pole to pole
///
/// Unit 0 writes the texture seam column. Every other unit writes one
/// column with its own copy of both poles, so each pole triangle gets a
/// pole vertex whose texture coordinate sits halfway across its column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UvSphere {
    resolution: u32,
}

impl Default for UvSphere {
    fn default() -> Self {
        Self { resolution: 1 }
    }
}

impl UvSphere {
    fn resolution_u(&self) -> i32 {
        4 * self.resolution as i32
    }

    fn resolution_v(&self) -> i32 {
        2 * self.resolution as i32
    }

    fn execute_seam<S: MeshStreams>(&self, streams: &mut S) {
        let rv = self.resolution_v();
        let mut vertex = Vertex {
            tangent: Vec4::new(1.0, 0.0, 0.0, -1.0),
            ..Default::default()
        };
        for v in 1..rv {
            let (sin, cos) = (PI + PI * v as f32 / rv as f32).sin_cos();
            vertex.position = Vec3::new(0.0, cos, sin);
            vertex.normal = vertex.position;
            vertex.tex_coord0.y = v as f32 / rv as f32;
            streams.set_vertex(v as usize - 1, vertex);
        }
    }

    fn execute_regular<S: MeshStreams>(&self, u: i32, streams: &mut S) {
        let ru = self.resolution_u();
        let rv = self.resolution_v();
        let mut vi = (rv + 1) * u - 2;
        let mut ti = 2 * (rv - 1) * (u - 1);

        // Pole copies, tangent and texture coordinate centered on the column
        let (sin, cos) = (2.0 * PI * (u as f32 - 0.5) / ru as f32).sin_cos();
        let mut vertex = Vertex {
            position: Vec3::NEG_Y,
            normal: Vec3::NEG_Y,
            tangent: Vec4::new(cos, 0.0, sin, -1.0),
            tex_coord0: Vec2::new((u as f32 - 0.5) / ru as f32, 0.0),
        };
        streams.set_vertex(vi as usize, vertex);

        vertex.position = Vec3::Y;
        vertex.normal = Vec3::Y;
        vertex.tex_coord0.y = 1.0;
        streams.set_vertex((vi + rv) as usize, vertex);
        vi += 1;

        let (sin, cos) = (2.0 * PI * u as f32 / ru as f32).sin_cos();
        vertex.tangent = Vec4::new(cos, 0.0, sin, -1.0);
        let circle = Vec2::new(sin, -cos);
        vertex.tex_coord0.x = u as f32 / ru as f32;

        // The second column wraps back to the seam column at index 0
        let shift_left = if u == 1 { 0 } else { -1 } - rv;
        streams.set_triangle(ti as usize, IVec3::splat(vi) + IVec3::new(-1, shift_left, 0));
        ti += 1;

        for v in 1..rv {
            let (radius, y) = (PI + PI * v as f32 / rv as f32).sin_cos();
            let xz = circle * -radius;
            vertex.position = Vec3::new(xz.x, y, xz.y);
            vertex.normal = vertex.position;
            vertex.tex_coord0.y = v as f32 / rv as f32;
            streams.set_vertex(vi as usize, vertex);
            if v > 1 {
                let base = IVec3::splat(vi);
                streams.set_triangle(ti as usize, base + IVec3::new(shift_left - 1, shift_left, -1));
                streams.set_triangle(ti as usize + 1, base + IVec3::new(-1, shift_left, 0));
                ti += 2;
            }
            vi += 1;
        }

        streams.set_triangle(ti as usize, IVec3::splat(vi) + IVec3::new(shift_left - 1, 0, -1));
    }
}

impl MeshGenerator for UvSphere {
    const NAME: &'static str = "uv sphere";

    fn vertex_count(&self) -> usize {
        ((self.resolution_u() + 1) * (self.resolution_v() + 1) - 2) as usize
    }

    fn index_count(&self) -> usize {
        (6 * self.resolution_u() * (self.resolution_v() - 1)) as usize
    }

    fn job_length(&self) -> usize {
        self.resolution_u() as usize + 1
    }

    fn bounds(&self) -> Bounds {
        Bounds::from_size(Vec3::ZERO, Vec3::splat(2.0))
    }

    resolution_accessors!();

    fn execute<S: MeshStreams>(&self, u: usize, streams: &mut S) {
        if u == 0 {
            self.execute_seam(streams);
        } else {
            self.execute_regular(u as i32, streams);
        }
    }
}
