use bytemuck::{Pod, Zeroable};
use glam::IVec3;

use super::{AttributeDescriptor, MeshStreams, TriangleStream, VertexAttribute, VertexFormat, VertexLayout};
use crate::bounds::Bounds;
use crate::vertex::Vertex;

/// Interleaved vertex: position, normal, tangent, uv (48 bytes)
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Stream0 {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tangent: [f32; 4],
    pub tex_coord0: [f32; 2],
}

impl From<Vertex> for Stream0 {
    #[inline]
    fn from(vertex: Vertex) -> Self {
        Self {
            position: vertex.position.to_array(),
            normal: vertex.normal.to_array(),
            tangent: vertex.tangent.to_array(),
            tex_coord0: vertex.tex_coord0.to_array(),
        }
    }
}

impl From<Stream0> for Vertex {
    #[inline]
    fn from(s: Stream0) -> Self {
        Self {
            position: s.position.into(),
            normal: s.normal.into(),
            tangent: s.tangent.into(),
            tex_coord0: s.tex_coord0.into(),
        }
    }
}

/// All attributes interleaved in a single vertex stream
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SingleStream {
    pub bounds: Bounds,
    pub vertices: Vec<Stream0>,
    pub triangles: TriangleStream,
}

impl SingleStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertex buffer as raw bytes
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn vertex(&self, index: usize) -> Vertex {
        self.vertices[index].into()
    }

    pub fn indices(&self) -> &[u16] {
        self.triangles.indices()
    }

    pub fn index_bytes(&self) -> &[u8] {
        self.triangles.bytes()
    }
}

impl MeshStreams for SingleStream {
    fn setup(&mut self, bounds: Bounds, vertex_count: usize, index_count: usize) {
        self.bounds = bounds;
        self.vertices.clear();
        self.vertices.resize(vertex_count, Stream0::default());
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
            AttributeDescriptor::new(VertexAttribute::Position, VertexFormat::Float32, 3, 0),
            AttributeDescriptor::new(VertexAttribute::Normal, VertexFormat::Float32, 3, 0),
            AttributeDescriptor::new(VertexAttribute::Tangent, VertexFormat::Float32, 4, 0),
            AttributeDescriptor::new(VertexAttribute::TexCoord0, VertexFormat::Float32, 2, 0),
        ])
    }
}
