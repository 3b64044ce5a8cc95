use bytemuck::{Pod, Zeroable};
use glam::IVec3;
use half::f16;

use super::{AttributeDescriptor, MeshStreams, TriangleStream, VertexAttribute, VertexFormat, VertexLayout};
use crate::bounds::Bounds;
use crate::packing::{
    pack_octahedral_u32, pack_position_f16, pack_tangent, pack_uv_unorm16, unpack_octahedral_u32,
    unpack_position_f16, unpack_tangent, unpack_uv_unorm16,
};
use crate::vertex::Vertex;

/// Packed vertex: [f16x4, unorm16x2, octahedral u32, tangent u32] = 20 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PackedVertex {
    pub position: [f16; 4],
    pub tex_coord0: [u16; 2],
    pub normal: u32,
    pub tangent: u32,
}

impl From<Vertex> for PackedVertex {
    #[inline]
    fn from(vertex: Vertex) -> Self {
        Self {
            position: pack_position_f16(vertex.position),
            tex_coord0: pack_uv_unorm16(vertex.tex_coord0),
            normal: pack_octahedral_u32(vertex.normal),
            tangent: pack_tangent(vertex.tangent),
        }
    }
}

impl PackedVertex {
    /// Decode back to full precision (lossy)
    pub fn unpack(&self) -> Vertex {
        Vertex {
            position: unpack_position_f16(self.position),
            normal: unpack_octahedral_u32(self.normal),
            tangent: unpack_tangent(self.tangent),
            tex_coord0: unpack_uv_unorm16(self.tex_coord0),
        }
    }
}

/// Single interleaved stream of [`PackedVertex`]
///
/// Texture coordinates are stored as unorm16 and must lie in [0, 1].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackedStream {
    pub bounds: Bounds,
    pub vertices: Vec<PackedVertex>,
    pub triangles: TriangleStream,
}

impl PackedStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn indices(&self) -> &[u16] {
        self.triangles.indices()
    }
}

impl MeshStreams for PackedStream {
    fn setup(&mut self, bounds: Bounds, vertex_count: usize, index_count: usize) {
        self.bounds = bounds;
        self.vertices.clear();
        self.vertices.resize(vertex_count, PackedVertex::default());
        self.triangles.setup(index_count);
    }

    #[inline]
    fn set_vertex(&mut self, index: usize, vertex: Vertex) {
        self.vertices[index] = vertex.into();
    }

    #[inline]
    fn set_triangle(&mut self, index: usize, triangle: IVec3) {
        self.triangles.set(index, triangle);
    }

    fn layout(&self) -> VertexLayout {
        VertexLayout::new(vec![
            AttributeDescriptor::new(VertexAttribute::Position, VertexFormat::Float16, 4, 0),
            AttributeDescriptor::new(VertexAttribute::TexCoord0, VertexFormat::Unorm16, 2, 0),
            AttributeDescriptor::new(VertexAttribute::Normal, VertexFormat::Octahedral32, 1, 0),
            AttributeDescriptor::new(VertexAttribute::Tangent, VertexFormat::Octahedral32, 1, 0),
        ])
    }
}
