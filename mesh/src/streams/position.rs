use glam::{IVec3, Vec3};

use super::{AttributeDescriptor, MeshStreams, TriangleStream, VertexAttribute, VertexFormat, VertexLayout};
use crate::bounds::Bounds;
use crate::vertex::Vertex;

/// Positions only; normals, tangents and uvs are dropped
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionStream {
    pub bounds: Bounds,
    pub positions: Vec<Vec3>,
    pub triangles: TriangleStream,
}

impl PositionStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn indices(&self) -> &[u16] {
        self.triangles.indices()
    }
}

impl MeshStreams for PositionStream {
    fn setup(&mut self, bounds: Bounds, vertex_count: usize, index_count: usize) {
        self.bounds = bounds;
        self.positions = vec![Vec3::ZERO; vertex_count];
        self.triangles.setup(index_count);
    }

    #[inline]
    fn set_vertex(&mut self, index: usize, vertex: Vertex) {
        self.positions[index] = vertex.position;
    }

    #[inline]
    fn set_triangle(&mut self, index: usize, triangle: IVec3) {
        self.triangles.set(index, triangle);
    }

    fn layout(&self) -> VertexLayout {
        VertexLayout::new(vec![AttributeDescriptor::new(
            VertexAttribute::Position,
            VertexFormat::Float32,
            3,
            0,
        )])
    }
}
