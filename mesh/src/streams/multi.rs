use glam::{IVec3, Vec2, Vec3, Vec4};

use super::{AttributeDescriptor, MeshStreams, TriangleStream, VertexAttribute, VertexFormat, VertexLayout};
use crate::bounds::Bounds;
use crate::vertex::Vertex;

/// One vertex stream per attribute
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultiStream {
    pub bounds: Bounds,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub tangents: Vec<Vec4>,
    pub tex_coords: Vec<Vec2>,
    pub triangles: TriangleStream,
}

impl MultiStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw bytes of vertex stream `stream` (0 = positions, 1 = normals,
    /// 2 = tangents, 3 = uvs)
    pub fn stream_bytes(&self, stream: u32) -> Option<&[u8]> {
        match stream {
            0 => Some(bytemuck::cast_slice(&self.positions)),
            1 => Some(bytemuck::cast_slice(&self.normals)),
            2 => Some(bytemuck::cast_slice(&self.tangents)),
            3 => Some(bytemuck::cast_slice(&self.tex_coords)),
            _ => None,
        }
    }

    pub fn vertex(&self, index: usize) -> Vertex {
        Vertex {
            position: self.positions[index],
            normal: self.normals[index],
            tangent: self.tangents[index],
            tex_coord0: self.tex_coords[index],
        }
    }

    pub fn indices(&self) -> &[u16] {
        self.triangles.indices()
    }
}

impl MeshStreams for MultiStream {
    fn setup(&mut self, bounds: Bounds, vertex_count: usize, index_count: usize) {
        self.bounds = bounds;
        self.positions = vec![Vec3::ZERO; vertex_count];
        self.normals = vec![Vec3::ZERO; vertex_count];
        self.tangents = vec![Vec4::ZERO; vertex_count];
        self.tex_coords = vec![Vec2::ZERO; vertex_count];
        self.triangles.setup(index_count);
    }

    #[inline]
    fn set_vertex(&mut self, index: usize, vertex: Vertex) {
        self.positions[index] = vertex.position;
        self.normals[index] = vertex.normal;
        self.tangents[index] = vertex.tangent;
        self.tex_coords[index] = vertex.tex_coord0;
    }

    #[inline]
    fn set_triangle(&mut self, index: usize, triangle: IVec3) {
        self.triangles.set(index, triangle);
    }

    fn layout(&self) -> VertexLayout {
        VertexLayout::new(vec![
            AttributeDescriptor::new(VertexAttribute::Position, VertexFormat::Float32, 3, 0),
            AttributeDescriptor::new(VertexAttribute::Normal, VertexFormat::Float32, 3, 1),
            AttributeDescriptor::new(VertexAttribute::Tangent, VertexFormat::Float32, 4, 2),
            AttributeDescriptor::new(VertexAttribute::TexCoord0, VertexFormat::Float32, 2, 3),
        ])
    }
}
