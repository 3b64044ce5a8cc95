//! Spheres made by inflating the six faces of a cube

use glam::{IVec3, Vec2, Vec3, Vec4};

use super::{MeshGenerator, resolution_accessors, sphere_vertex};
use crate::bounds::Bounds;
use crate::streams::MeshStreams;
use crate::vertex::Vertex;

/// One cube face: the corner at its origin and the two edge vectors
/// spanning it
#[derive(Clone, Copy)]
struct Side {
    id: i32,
    uv_origin: Vec3,
    u_vector: Vec3,
    v_vector: Vec3,
    /// Distance in columns to the face sharing this face's first seam
    seam_step: i32,
}

impl Side {
    /// Even faces share the (-1, -1, -1) pole vertex
    fn touches_minimum_pole(&self) -> bool {
        self.id & 1 == 0
    }
}

const RIGHT2: Vec3 = Vec3::new(2.0, 0.0, 0.0);
const UP2: Vec3 = Vec3::new(0.0, 2.0, 0.0);
const FORWARD2: Vec3 = Vec3::new(0.0, 0.0, 2.0);

const SIDES: [Side; 6] = [
    Side {
        id: 0,
        uv_origin: Vec3::splat(-1.0),
        u_vector: RIGHT2,
        v_vector: UP2,
        seam_step: 4,
    },
    Side {
        id: 1,
        uv_origin: Vec3::new(1.0, -1.0, -1.0),
        u_vector: FORWARD2,
        v_vector: UP2,
        seam_step: 4,
    },
    Side {
        id: 2,
        uv_origin: Vec3::splat(-1.0),
        u_vector: FORWARD2,
        v_vector: RIGHT2,
        seam_step: -2,
    },
    Side {
        id: 3,
        uv_origin: Vec3::new(-1.0, -1.0, 1.0),
        u_vector: UP2,
        v_vector: RIGHT2,
        seam_step: -2,
    },
    Side {
        id: 4,
        uv_origin: Vec3::splat(-1.0),
        u_vector: UP2,
        v_vector: FORWARD2,
        seam_step: -2,
    },
    Side {
        id: 5,
        uv_origin: Vec3::new(-1.0, 1.0, -1.0),
        u_vector: RIGHT2,
        v_vector: FORWARD2,
        seam_step: -2,
    },
];

/// Map a point on the [-1, 1] cube to the unit sphere
///
/// Spreads vertices more evenly than plain normalization.
fn cube_to_sphere(p: Vec3) -> Vec3 {
    let p2 = p * p;
    let a = Vec3::new(p2.y, p2.x, p2.x);
    let b = Vec3::new(p2.z, p2.z, p2.y);
    p * (Vec3::ONE - (a + b) / 2.0 + a * b / 3.0).powf(0.5)
}

/// Cube sphere with separate quads, so every quad gets its own texture
/// space and flat-ish tangent frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CubeSphere {
    resolution: u32,
}

impl Default for CubeSphere {
    fn default() -> Self {
        Self { resolution: 1 }
    }
}

impl MeshGenerator for CubeSphere {
    const NAME: &'static str = "cube sphere";

    fn vertex_count(&self) -> usize {
        let r = self.resolution as usize;
        6 * 4 * r * r
    }

    fn index_count(&self) -> usize {
        let r = self.resolution as usize;
        6 * 6 * r * r
    }

    fn job_length(&self) -> usize {
        6 * self.resolution as usize
    }

    fn bounds(&self) -> Bounds {
        Bounds::from_size(Vec3::ZERO, Vec3::splat(2.0))
    }

    resolution_accessors!();

    fn execute<S: MeshStreams>(&self, i: usize, streams: &mut S) {
        let r = self.resolution as usize;
        let rf = self.resolution as f32;
        let u = i / 6;
        let side = SIDES[i % 6];
        let mut vi = 4 * r * (r * side.id as usize + u);
        let mut ti = 2 * r * (r * side.id as usize + u);

        let u_a = side.uv_origin + side.u_vector * u as f32 / rf;
        let u_b = side.uv_origin + side.u_vector * (u + 1) as f32 / rf;
        let mut p_a = cube_to_sphere(u_a);
        let mut p_b = cube_to_sphere(u_b);

        let mut tangent = (p_b - p_a).normalize();
        for v in 1..=r {
            let offset = side.v_vector * v as f32 / rf;
            let p_c = cube_to_sphere(u_a + offset);
            let p_d = cube_to_sphere(u_b + offset);

            streams.set_vertex(vi, quad_vertex(p_a, (p_c - p_a).cross(tangent), tangent, Vec2::ZERO));
            streams.set_vertex(vi + 1, quad_vertex(p_b, (p_d - p_b).cross(tangent), tangent, Vec2::X));

            tangent = (p_d - p_c).normalize();
            streams.set_vertex(vi + 2, quad_vertex(p_c, (p_c - p_a).cross(tangent), tangent, Vec2::Y));
            streams.set_vertex(vi + 3, quad_vertex(p_d, (p_d - p_b).cross(tangent), tangent, Vec2::ONE));

            let base = IVec3::splat(vi as i32);
            streams.set_triangle(ti, base + IVec3::new(0, 2, 1));
            streams.set_triangle(ti + 1, base + IVec3::new(1, 2, 3));

            p_a = p_c;
            p_b = p_d;
            vi += 4;
            ti += 2;
        }
    }
}

fn quad_vertex(position: Vec3, normal: Vec3, tangent: Vec3, tex_coord0: Vec2) -> Vertex {
    Vertex {
        position,
        normal: normal.normalize(),
        tangent: Vec4::from((tangent, -1.0)),
        tex_coord0,
    }
}

/// Cube sphere with every vertex shared between adjacent quads and faces
///
/// The eight cube corners collapse into the face seams, leaving two pole
/// vertices at (-1, -1, -1) and (1, 1, 1) written by the first unit. Normals
/// equal positions; there are no texture coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SharedCubeSphere {
    resolution: u32,
}

impl Default for SharedCubeSphere {
    fn default() -> Self {
        Self { resolution: 1 }
    }
}

impl MeshGenerator for SharedCubeSphere {
    const NAME: &'static str = "shared cube sphere";

    fn vertex_count(&self) -> usize {
        let r = self.resolution as usize;
        6 * r * r + 2
    }

    fn index_count(&self) -> usize {
        let r = self.resolution as usize;
        6 * 6 * r * r
    }

    fn job_length(&self) -> usize {
        6 * self.resolution as usize
    }

    fn bounds(&self) -> Bounds {
        Bounds::from_size(Vec3::ZERO, Vec3::splat(2.0))
    }

    resolution_accessors!();

    fn execute<S: MeshStreams>(&self, i: usize, streams: &mut S) {
        let r = self.resolution as i32;
        let rf = self.resolution as f32;
        let side = SIDES[i % 6];
        let first_column = i / 6 == 0;
        let u = (i / 6) as i32 + 1;
        let mut vi = r * (r * side.id + u - 1) + 2;
        let mut ti = 2 * r * (r * side.id + u - 1);
        let min_pole = side.touches_minimum_pole();

        if i == 0 {
            let corner = (1.0f32 / 3.0).sqrt();
            streams.set_vertex(0, sphere_vertex(Vec3::splat(-corner)));
            streams.set_vertex(1, sphere_vertex(Vec3::splat(corner)));
        }

        let p_start = side.uv_origin + side.u_vector * u as f32 / rf;
        streams.set_vertex(vi as usize, sphere_vertex(cube_to_sphere(p_start)));

        let seam_z = if !first_column {
            -r + 1
        } else if min_pole {
            side.seam_step * r * r
        } else if r == 1 {
            side.seam_step
        } else {
            -r + 1
        };
        let mut triangle = IVec3::new(
            vi,
            if first_column && min_pole { 0 } else { vi - r },
            vi + seam_z,
        );
        streams.set_triangle(ti as usize, triangle);
        vi += 1;
        ti += 1;

        let z_add = if first_column && min_pole { r } else { 1 };
        let z_add_last = if first_column && min_pole {
            r
        } else if !first_column && !min_pole {
            r * ((side.seam_step + 1) * r - u) + u
        } else {
            (side.seam_step + 1) * r * r - r + 1
        };

        for v in 1..r {
            let p = cube_to_sphere(p_start + side.v_vector * v as f32 / rf);
            streams.set_vertex(vi as usize, sphere_vertex(p));

            triangle.x += 1;
            triangle.y = triangle.z;
            triangle.z += if v == r - 1 { z_add_last } else { z_add };

            streams.set_triangle(ti as usize, IVec3::new(triangle.x - 1, triangle.y, triangle.x));
            streams.set_triangle(ti as usize + 1, triangle);
            vi += 1;
            ti += 2;
        }

        let last = if min_pole {
            triangle.z + r
        } else if u == r {
            1
        } else {
            triangle.z + 1
        };
        streams.set_triangle(ti as usize, IVec3::new(triangle.x, triangle.z, last));
    }
}
