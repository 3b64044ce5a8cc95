//! Vertex and triangle types shared by generators and stream sinks

use bytemuck::{Pod, Zeroable};
use glam::{IVec3, Vec2, Vec3, Vec4};

/// A generated vertex
///
/// The tangent's `w` holds the bitangent handedness (±1).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tangent: Vec4,
    pub tex_coord0: Vec2,
}

/// Triangle stored as three 16-bit vertex indices
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct TriangleU16 {
    pub a: u16,
    pub b: u16,
    pub c: u16,
}

impl TriangleU16 {
    pub const fn new(a: u16, b: u16, c: u16) -> Self {
        Self { a, b, c }
    }

    pub fn to_array(self) -> [u16; 3] {
        [self.a, self.b, self.c]
    }
}

impl From<IVec3> for TriangleU16 {
    /// Narrowing conversion. Jobs reject meshes whose vertex count does not
    /// fit 16-bit indices before any triangle is written.
    #[inline]
    fn from(t: IVec3) -> Self {
        debug_assert!(
            t.cmpge(IVec3::ZERO).all() && t.cmple(IVec3::splat(u16::MAX as i32)).all(),
            "triangle index out of u16 range: {t}"
        );
        Self {
            a: t.x as u16,
            b: t.y as u16,
            c: t.z as u16,
        }
    }
}
