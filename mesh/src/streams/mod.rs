//! Vertex stream sinks
//!
//! Generators emit [`Vertex`] values and index triples through
//! [`MeshStreams`]. A sink decides the buffer layout: one interleaved stream,
//! one stream per attribute, positions only, or packed attributes. The same
//! generator writes into any of them unchanged.

mod multi;
mod packed;
mod position;
mod single;

pub use multi::MultiStream;
pub use packed::{PackedStream, PackedVertex};
pub use position::PositionStream;
pub use single::{SingleStream, Stream0};

use glam::IVec3;
use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::vertex::{TriangleU16, Vertex};

/// Destination for generated vertices and triangles
pub trait MeshStreams {
    /// Allocate buffers for the declared counts
    ///
    /// `index_count` is three times the number of triangles.
    fn setup(&mut self, bounds: Bounds, vertex_count: usize, index_count: usize);

    fn set_vertex(&mut self, index: usize, vertex: Vertex);

    /// Store triangle number `index`
    fn set_triangle(&mut self, index: usize, triangle: IVec3);

    /// Attribute layout of the vertex buffers
    fn layout(&self) -> VertexLayout;
}

/// Vertex attribute kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VertexAttribute {
    Position,
    Normal,
    Tangent,
    TexCoord0,
}

/// Per-component storage format
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VertexFormat {
    Float32,
    Float16,
    Unorm16,
    /// Octahedral direction packed into one u32
    Octahedral32,
}

impl VertexFormat {
    /// Bytes per component
    pub const fn size(self) -> u32 {
        match self {
            VertexFormat::Float32 | VertexFormat::Octahedral32 => 4,
            VertexFormat::Float16 | VertexFormat::Unorm16 => 2,
        }
    }
}

/// Placement of one attribute inside a vertex stream
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    pub attribute: VertexAttribute,
    pub format: VertexFormat,
    /// Component count
    pub dimension: u32,
    /// Index of the vertex stream holding this attribute
    pub stream: u32,
}

impl AttributeDescriptor {
    pub const fn new(attribute: VertexAttribute, format: VertexFormat, dimension: u32, stream: u32) -> Self {
        Self {
            attribute,
            format,
            dimension,
            stream,
        }
    }

    /// Size of this attribute in bytes
    pub const fn size(&self) -> u32 {
        self.format.size() * self.dimension
    }
}

/// Full vertex buffer description, attributes in stream order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexLayout {
    pub attributes: Vec<AttributeDescriptor>,
}

impl VertexLayout {
    pub fn new(attributes: Vec<AttributeDescriptor>) -> Self {
        Self { attributes }
    }

    /// Number of vertex streams
    pub fn stream_count(&self) -> u32 {
        self.attributes.iter().map(|a| a.stream + 1).max().unwrap_or(0)
    }

    /// Bytes per vertex in `stream`
    pub fn stride(&self, stream: u32) -> u32 {
        self.attributes
            .iter()
            .filter(|a| a.stream == stream)
            .map(|a| a.size())
            .sum()
    }

    /// Byte offset of `attribute` within its stream
    pub fn offset(&self, attribute: VertexAttribute) -> Option<u32> {
        let target = self.attributes.iter().find(|a| a.attribute == attribute)?;
        Some(
            self.attributes
                .iter()
                .take_while(|a| a.attribute != attribute)
                .filter(|a| a.stream == target.stream)
                .map(|a| a.size())
                .sum(),
        )
    }
}

/// 16-bit triangle list shared by every sink
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriangleStream {
    pub triangles: Vec<TriangleU16>,
}

impl TriangleStream {
    fn setup(&mut self, index_count: usize) {
        debug_assert_eq!(index_count % 3, 0, "index count must be a multiple of 3");
        self.triangles.clear();
        self.triangles.resize(index_count / 3, TriangleU16::default());
    }

    #[inline]
    fn set(&mut self, index: usize, triangle: IVec3) {
        self.triangles[index] = triangle.into();
    }

    /// Flat index list
    pub fn indices(&self) -> &[u16] {
        bytemuck::cast_slice(&self.triangles)
    }

    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }

    pub fn index_count(&self) -> usize {
        self.triangles.len() * 3
    }
}
