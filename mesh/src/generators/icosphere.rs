//! Spheres subdivided from an icosahedron
//!
//! The icosahedron is cut into five strips of four triangles, each running
//! from the bottom pole to the top pole. A strip is filled column by column,
//! `2R` vertices per column. The first unit also writes both poles. Vertices
//! are shared across strips; normals equal positions and there are no
//! texture coordinates.

use std::f32::consts::PI;
use std::marker::PhantomData;

use glam::{IVec3, IVec4, Quat, Vec3};

use super::{MeshGenerator, resolution_accessors, sphere_vertex};
use crate::bounds::Bounds;
use crate::streams::MeshStreams;

/// Icosahedron vertex `id` of the lower (`y_sign = -1`) or upper ring
fn corner(id: i32, y_sign: f32) -> Vec3 {
    let root5 = 5.0f32.sqrt();
    let (sin, cos) = (0.2 * PI * id as f32).sin_cos();
    Vec3::new(0.4 * root5 * sin, y_sign * 0.2 * root5, -0.4 * root5 * cos)
}

/// Angle between the pole and an adjacent corner
fn edge_angle() -> f32 {
    Vec3::Y.dot(corner(0, 1.0)).acos()
}

/// Great-circle edge from `start` toward `end`
#[derive(Clone, Copy)]
struct Edge {
    start: Vec3,
    end: Vec3,
    axis: Vec3,
}

impl Edge {
    fn new(start: Vec3, end: Vec3) -> Self {
        Self {
            start,
            end,
            axis: start.cross(end).normalize(),
        }
    }
}

struct Strip {
    id: i32,
    bottom_left: Edge,
    bottom_right: Edge,
    mid_left: Edge,
    mid_center: Edge,
    mid_right: Edge,
    top_left: Edge,
    top_right: Edge,
}

impl Strip {
    fn new(id: i32) -> Self {
        let low_left = corner(2 * id, -1.0);
        let low_right = corner(if id == 4 { 0 } else { 2 * id + 2 }, -1.0);
        let high_left = corner(if id == 0 { 9 } else { 2 * id - 1 }, 1.0);
        let high_right = corner(2 * id + 1, 1.0);
        Self {
            id,
            bottom_left: Edge::new(Vec3::NEG_Y, low_left),
            bottom_right: Edge::new(Vec3::NEG_Y, low_right),
            mid_left: Edge::new(low_left, high_left),
            mid_center: Edge::new(low_left, high_right),
            mid_right: Edge::new(low_right, high_right),
            top_left: Edge::new(high_left, Vec3::Y),
            top_right: Edge::new(high_right, Vec3::Y),
        }
    }
}

/// How points along edges and across faces are interpolated
trait Interpolation {
    /// Point a fraction `t` along `edge`
    fn along(edge: &Edge, t: f32, edge_angle: f32) -> Vec3;

    /// Point a fraction `t` of the way from `right` to `left`
    fn across(right: Vec3, left: Vec3, t: f32) -> Vec3;
}

/// Linear interpolation on the flat icosahedron faces
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Linear;

impl Interpolation for Linear {
    fn along(edge: &Edge, t: f32, _edge_angle: f32) -> Vec3 {
        edge.start.lerp(edge.end, t)
    }

    fn across(right: Vec3, left: Vec3, t: f32) -> Vec3 {
        right.lerp(left, t)
    }
}

/// Equal-angle steps along great circles
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Spherical;

impl Interpolation for Spherical {
    fn along(edge: &Edge, t: f32, edge_angle: f32) -> Vec3 {
        Quat::from_axis_angle(edge.axis, edge_angle * t) * edge.start
    }

    fn across(right: Vec3, left: Vec3, t: f32) -> Vec3 {
        let axis = right.cross(left).normalize_or_zero();
        if axis == Vec3::ZERO {
            return right;
        }
        let angle = right.dot(left).clamp(-1.0, 1.0).acos() * t;
        Quat::from_axis_angle(axis, angle) * right
    }
}

/// Shared icosphere generator, specialized by interpolation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IcosphereGenerator<I> {
    resolution: u32,
    _interpolation: PhantomData<I>,
}

impl<I> Default for IcosphereGenerator<I> {
    fn default() -> Self {
        Self {
            resolution: 1,
            _interpolation: PhantomData,
        }
    }
}

/// Icosahedron subdivided evenly on its faces, then normalized
pub type Icosphere = IcosphereGenerator<Linear>;

/// Icosahedron subdivided along great circles
pub type GeoIcosphere = IcosphereGenerator<Spherical>;

impl MeshGenerator for IcosphereGenerator<Linear> {
    const NAME: &'static str = "icosphere";

    fn vertex_count(&self) -> usize {
        icosphere_vertex_count(self.resolution)
    }

    fn index_count(&self) -> usize {
        icosphere_index_count(self.resolution)
    }

    fn job_length(&self) -> usize {
        5 * self.resolution as usize
    }

    fn bounds(&self) -> Bounds {
        Bounds::from_size(Vec3::ZERO, Vec3::splat(2.0))
    }

    resolution_accessors!();

    fn execute<S: MeshStreams>(&self, i: usize, streams: &mut S) {
        icosphere_execute::<Linear, S>(self.resolution as i32, i as i32, streams);
    }
}

impl MeshGenerator for IcosphereGenerator<Spherical> {
    const NAME: &'static str = "geo icosphere";

    fn vertex_count(&self) -> usize {
        icosphere_vertex_count(self.resolution)
    }

    fn index_count(&self) -> usize {
        icosphere_index_count(self.resolution)
    }

    fn job_length(&self) -> usize {
        5 * self.resolution as usize
    }

    fn bounds(&self) -> Bounds {
        Bounds::from_size(Vec3::ZERO, Vec3::splat(2.0))
    }

    resolution_accessors!();

    fn execute<S: MeshStreams>(&self, i: usize, streams: &mut S) {
        icosphere_execute::<Spherical, S>(self.resolution as i32, i as i32, streams);
    }
}

fn icosphere_vertex_count(resolution: u32) -> usize {
    let r = resolution as usize;
    5 * 2 * r * r + 2
}

fn icosphere_index_count(resolution: u32) -> usize {
    let r = resolution as usize;
    6 * 5 * 2 * r * r
}

fn icosphere_execute<I: Interpolation, S: MeshStreams>(r: i32, i: i32, streams: &mut S) {
    let rv = 2 * r;
    let column = i / 5;
    let strip = Strip::new(i % 5);
    let mut vi = rv * (r * strip.id + column) + 2;
    let mut ti = 2 * rv * (r * strip.id + column);
    let first_column = column == 0;
    let angle = edge_angle();

    // The first column borders the last column of the previous strip
    let mut quad = IVec4::new(
        vi,
        if first_column { 0 } else { vi - rv },
        if !first_column {
            vi - rv + 1
        } else if strip.id == 0 {
            4 * rv * r + 2
        } else {
            vi - rv * (r + column)
        },
        vi + 1,
    );

    if i == 0 {
        streams.set_vertex(0, sphere_vertex(Vec3::NEG_Y));
        streams.set_vertex(1, sphere_vertex(Vec3::Y));
    }

    let u = column + 1;
    let start = I::along(&strip.bottom_right, u as f32 / r as f32, angle).normalize();
    streams.set_vertex(vi as usize, sphere_vertex(start));
    vi += 1;

    for v in 1..rv {
        let h = (u + v) as f32;
        let rf = r as f32;
        let (left, right, edge_scale, face_scale) = if v <= r - u {
            (&strip.bottom_left, &strip.bottom_right, h / rf, v as f32 / h)
        } else if v < r {
            (
                &strip.mid_center,
                &strip.mid_right,
                h / rf - 1.0,
                (r - u) as f32 / (rv as f32 - h),
            )
        } else if v <= rv - u {
            (
                &strip.mid_left,
                &strip.mid_center,
                h / rf - 1.0,
                (v - r) as f32 / (h - rf),
            )
        } else {
            (
                &strip.top_left,
                &strip.top_right,
                h / rf - 2.0,
                (r - u) as f32 / (3.0 * rf - h),
            )
        };

        let p_left = I::along(left, edge_scale, angle);
        let p_right = I::along(right, edge_scale, angle);
        let p = I::across(p_right, p_left, face_scale).normalize();
        streams.set_vertex(vi as usize, sphere_vertex(p));

        set_quad(streams, ti as usize, quad);
        quad.y = quad.z;
        let z_step = if first_column && v <= r - u { rv } else { 1 };
        quad += IVec4::new(1, 0, z_step, 1);
        vi += 1;
        ti += 2;
    }

    if !first_column {
        let last_strip = if strip.id == 0 { 5 } else { strip.id };
        quad.z = rv * r * last_strip - r + u + 1;
    }
    quad.w = if u < r { quad.z + 1 } else { 1 };
    set_quad(streams, ti as usize, quad);
}

fn set_quad<S: MeshStreams>(streams: &mut S, ti: usize, quad: IVec4) {
    streams.set_triangle(ti, quad.truncate());
    streams.set_triangle(ti + 1, IVec3::new(quad.x, quad.z, quad.w));
}
