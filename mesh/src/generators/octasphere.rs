//! Spheres subdivided from an octahedron
//!
//! The octahedron is cut into four rhombi, each running from the bottom pole
//! across two equator corners to the top pole. A rhombus is filled column by
//! column. Unit 0 writes four copies of each pole plus the texture seam
//! along -Z.

use std::f32::consts::PI;
use std::marker::PhantomData;

use glam::{IVec4, Quat, Vec2, Vec3, Vec4};

use super::{MeshGenerator, latitude_tangent, resolution_accessors};
use crate::bounds::Bounds;
use crate::streams::MeshStreams;
use crate::vertex::Vertex;

#[derive(Clone, Copy)]
struct Rhombus {
    id: i32,
    left_corner: Vec3,
    right_corner: Vec3,
}

const RHOMBI: [Rhombus; 4] = [
    Rhombus {
        id: 0,
        left_corner: Vec3::NEG_Z,
        right_corner: Vec3::X,
    },
    Rhombus {
        id: 1,
        left_corner: Vec3::X,
        right_corner: Vec3::Z,
    },
    Rhombus {
        id: 2,
        left_corner: Vec3::Z,
        right_corner: Vec3::NEG_X,
    },
    Rhombus {
        id: 3,
        left_corner: Vec3::NEG_X,
        right_corner: Vec3::NEG_Z,
    },
];

/// Equirectangular texture coordinate of a unit sphere point
///
/// The seam at -Z maps to u = 1 rather than 0.
pub(crate) fn sphere_tex_coord(p: Vec3) -> Vec2 {
    let mut uv = Vec2::new(
        p.x.atan2(p.z) / (-2.0 * PI) + 0.5,
        p.y.clamp(-1.0, 1.0).asin() / PI + 0.5,
    );
    if uv.x < 1e-6 {
        uv.x = 1.0;
    }
    uv
}

/// How points inside a rhombus are placed on the sphere
trait Placement {
    /// Bottom vertex of column `u` (1-based) and its texture coordinate
    fn column_start(rhombus: &Rhombus, u: i32, r: i32) -> (Vec3, Vec2);

    /// Vertex `v` of column `u`
    fn column_point(rhombus: &Rhombus, u: i32, v: i32, r: i32) -> Vec3;

    /// Seam vertex `v` of `2R - 1`, with its texture v coordinate
    fn seam_point(v: i32, r: i32) -> (Vec3, f32);
}

/// Points spaced evenly on the flat octahedron, then normalized
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Normalized;

impl Placement for Normalized {
    fn column_start(rhombus: &Rhombus, u: i32, r: i32) -> (Vec3, Vec2) {
        let t = u as f32 / r as f32;
        let p = (Vec3::NEG_Y + (rhombus.right_corner - Vec3::NEG_Y) * t).normalize();
        (p, sphere_tex_coord(p))
    }

    fn column_point(rhombus: &Rhombus, u: i32, v: i32, r: i32) -> Vec3 {
        let t = u as f32 / r as f32;
        let s = v as f32 / r as f32;
        let p = if v <= r - u {
            let dir = rhombus.right_corner - Vec3::NEG_Y;
            let start = Vec3::NEG_Y + dir * t;
            let end = rhombus.left_corner + dir * t;
            start.lerp(end, s)
        } else {
            let dir = Vec3::Y - rhombus.left_corner;
            let start = rhombus.right_corner + dir * (t - 1.0);
            let end = rhombus.left_corner + dir * t;
            start.lerp(end, s)
        };
        p.normalize()
    }

    fn seam_point(v: i32, r: i32) -> (Vec3, f32) {
        let p = if v < r {
            Vec3::NEG_Y.lerp(Vec3::NEG_Z, v as f32 / r as f32)
        } else {
            Vec3::NEG_Z.lerp(Vec3::Y, (v - r) as f32 / r as f32)
        }
        .normalize();
        (p, sphere_tex_coord(p).y)
    }
}

/// Points placed by equal angles along great circles
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Geodesic;

impl Geodesic {
    /// Point at latitude step `h` of `2R` toward `corner`
    fn meridian_point(corner: Vec3, h: f32, r: i32) -> Vec3 {
        let (sin, cos) = (PI + PI * h / (2 * r) as f32).sin_cos();
        Vec3::new(0.0, cos, 0.0) - corner * sin
    }
}

impl Placement for Geodesic {
    fn column_start(rhombus: &Rhombus, u: i32, r: i32) -> (Vec3, Vec2) {
        let p = Self::meridian_point(rhombus.right_corner, u as f32, r);
        let uv = Vec2::new(rhombus.id as f32 * 0.25 + 0.25, u as f32 / (2 * r) as f32);
        (p, uv)
    }

    fn column_point(rhombus: &Rhombus, u: i32, v: i32, r: i32) -> Vec3 {
        let h = (u + v) as f32;
        let p_right = Self::meridian_point(rhombus.right_corner, h, r);
        let p_left = Self::meridian_point(rhombus.left_corner, h, r);
        let axis = p_right.cross(p_left).normalize();
        let fraction = if v <= r - u {
            v as f32 / h
        } else {
            (r - u) as f32 / (2.0 * r as f32 - h)
        };
        let angle = p_right.dot(p_left).clamp(-1.0, 1.0).acos() * fraction;
        Quat::from_axis_angle(axis, angle) * p_right
    }

    fn seam_point(v: i32, r: i32) -> (Vec3, f32) {
        let (sin, cos) = (PI + PI * v as f32 / (2 * r) as f32).sin_cos();
        (Vec3::new(0.0, cos, sin), v as f32 / (2 * r) as f32)
    }
}

fn sphere_vertex_with_uv(position: Vec3, tex_coord0: Vec2) -> Vertex {
    Vertex {
        position,
        normal: position,
        tangent: latitude_tangent(position),
        tex_coord0,
    }
}

fn execute_poles_and_seam<P: Placement, S: MeshStreams>(r: i32, streams: &mut S) {
    let half = 0.5f32.sqrt();
    let mut tangent = Vec4::new(half, 0.0, half, -1.0);
    let mut u = 0.125;
    for i in 0..4 {
        let mut vertex = Vertex {
            position: Vec3::NEG_Y,
            normal: Vec3::NEG_Y,
            tangent,
            tex_coord0: Vec2::new(u, 0.0),
        };
        streams.set_vertex(i, vertex);

        vertex.position = Vec3::Y;
        vertex.normal = Vec3::Y;
        vertex.tex_coord0.y = 1.0;
        streams.set_vertex(i + 4, vertex);

        tangent = Vec4::new(-tangent.z, 0.0, tangent.x, -1.0);
        u += 0.25;
    }

    for v in 1..2 * r {
        let (position, tex_v) = P::seam_point(v, r);
        let vertex = Vertex {
            position,
            normal: position,
            tangent: Vec4::new(1.0, 0.0, 0.0, -1.0),
            tex_coord0: Vec2::new(0.0, tex_v),
        };
        streams.set_vertex((v + 7) as usize, vertex);
    }
}

fn execute_regular<P: Placement, S: MeshStreams>(r: i32, i: i32, streams: &mut S) {
    let column = i / 4;
    let rhombus = RHOMBI[(i % 4) as usize];
    let id = rhombus.id;
    let mut vi = r * (r * id + column + 2) + 7;
    let mut ti = 2 * r * (r * id + column);
    let first_column = column == 0;

    // Triangle pair (x, y, z) and (x, z, w) of the quad left of the current
    // vertex; the first column borders the previous rhombus or the seam
    let mut quad = IVec4::new(
        vi,
        if first_column { id } else { vi - r },
        if !first_column {
            vi - r + 1
        } else if id == 0 {
            8
        } else {
            vi - r * (r + column)
        },
        vi + 1,
    );

    let u = column + 1;
    let (start, uv) = P::column_start(&rhombus, u, r);
    streams.set_vertex(vi as usize, sphere_vertex_with_uv(start, uv));
    vi += 1;

    let z_step = if first_column && id != 0 { r } else { 1 };
    for v in 1..r {
        let p = P::column_point(&rhombus, u, v, r);
        streams.set_vertex(vi as usize, sphere_vertex_with_uv(p, sphere_tex_coord(p)));
        set_quad(streams, ti as usize, quad);
        quad.y = quad.z;
        quad += IVec4::new(1, 0, z_step, 1);
        vi += 1;
        ti += 2;
    }

    quad.z = r * r * id + r + u + 6;
    quad.w = if u < r { quad.z + 1 } else { id + 4 };
    set_quad(streams, ti as usize, quad);
}

fn set_quad<S: MeshStreams>(streams: &mut S, ti: usize, quad: IVec4) {
    streams.set_triangle(ti, quad.truncate());
    streams.set_triangle(ti + 1, glam::IVec3::new(quad.x, quad.z, quad.w));
}

/// Shared octasphere generator, specialized by vertex placement
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OctasphereGenerator<P> {
    resolution: u32,
    _placement: PhantomData<P>,
}

impl<P> Default for OctasphereGenerator<P> {
    fn default() -> Self {
        Self {
            resolution: 1,
            _placement: PhantomData,
        }
    }
}

/// Octahedron subdivided evenly, then normalized onto the unit sphere
pub type Octasphere = OctasphereGenerator<Normalized>;

/// Octahedron subdivided along great circles, giving more uniform cells
/// than [`Octasphere`]
pub type GeoOctasphere = OctasphereGenerator<Geodesic>;

impl MeshGenerator for OctasphereGenerator<Normalized> {
    const NAME: &'static str = "octasphere";

    fn vertex_count(&self) -> usize {
        octasphere_vertex_count(self.resolution)
    }

    fn index_count(&self) -> usize {
        octasphere_index_count(self.resolution)
    }

    fn job_length(&self) -> usize {
        4 * self.resolution as usize + 1
    }

    fn bounds(&self) -> Bounds {
        Bounds::from_size(Vec3::ZERO, Vec3::splat(2.0))
    }

    resolution_accessors!();

    fn execute<S: MeshStreams>(&self, i: usize, streams: &mut S) {
        octasphere_execute::<Normalized, S>(self.resolution, i, streams);
    }
}

impl MeshGenerator for OctasphereGenerator<Geodesic> {
    const NAME: &'static str = "geo octasphere";

    fn vertex_count(&self) -> usize {
        octasphere_vertex_count(self.resolution)
    }

    fn index_count(&self) -> usize {
        octasphere_index_count(self.resolution)
    }

    fn job_length(&self) -> usize {
        4 * self.resolution as usize + 1
    }

    fn bounds(&self) -> Bounds {
        Bounds::from_size(Vec3::ZERO, Vec3::splat(2.0))
    }

    resolution_accessors!();

    fn execute<S: MeshStreams>(&self, i: usize, streams: &mut S) {
        octasphere_execute::<Geodesic, S>(self.resolution, i, streams);
    }
}

fn octasphere_vertex_count(resolution: u32) -> usize {
    let r = resolution as usize;
    4 * r * r + 2 * r + 7
}

fn octasphere_index_count(resolution: u32) -> usize {
    let r = resolution as usize;
    6 * 4 * r * r
}

fn octasphere_execute<P: Placement, S: MeshStreams>(resolution: u32, i: usize, streams: &mut S) {
    let r = resolution as i32;
    if i == 0 {
        execute_poles_and_seam::<P, S>(r, streams);
    } else {
        execute_regular::<P, S>(r, i as i32 - 1, streams);
    }
}
