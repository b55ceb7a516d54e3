//! Draw triangles!
use bytemuck::{Pod, Zeroable};

use sectorvg_core::color::PackedSrgb;
use sectorvg_core::math::{Box2D, Point};

/// A set of vertices and indices representing a list of triangles.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Indexed<T> {
    /// The vertices of the mesh
    pub vertices: Vec<T>,

    /// The list of vertex indices that defines the triangles of the mesh.
    ///
    /// Therefore, this list should always have a length that is a multiple of 3.
    pub indices: Vec<u32>,
}

impl<T> Default for Indexed<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Indexed<T> {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }
}

/// A two-dimensional vertex with a color.
#[derive(Copy, Clone, Debug, PartialEq, Zeroable, Pod)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct SolidVertex2D {
    /// The vertex position in 2D space.
    pub position: [f32; 2],

    /// The color of the vertex, with global alpha already applied.
    pub color: PackedSrgb,
}

impl SolidVertex2D {
    pub fn new(position: impl Into<[f32; 2]>, color: impl Into<PackedSrgb>) -> Self {
        Self {
            position: position.into(),
            color: color.into(),
        }
    }
}

/// A mesh of triangles with per-vertex colors, in surface coordinates.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolidMesh {
    /// The vertices and indices of the mesh.
    pub buffers: Indexed<SolidVertex2D>,
}

impl SolidMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.indices.is_empty()
    }

    /// The axis-aligned bounding box of all vertices, or `None` if the mesh
    /// has no vertices.
    pub fn bounds(&self) -> Option<Box2D> {
        if self.buffers.vertices.is_empty() {
            return None;
        }

        Some(Box2D::from_points(
            self.buffers
                .vertices
                .iter()
                .map(|v| Point::new(v.position[0], v.position[1])),
        ))
    }

    /// The raw bytes of the vertex buffer, ready to be uploaded to the GPU.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.buffers.vertices)
    }

    /// The raw bytes of the index buffer, ready to be uploaded to the GPU.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.buffers.indices)
    }
}
