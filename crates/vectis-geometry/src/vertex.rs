//! Vertex format for generated shape meshes.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use static_assertions::const_assert_eq;
use vectis_render::{Color, wgpu};

/// Vertex shared by every shape mesh.
///
/// Positions are stored on the centerline. The visible edge is produced by
/// pushing the vertex along `offset`, scaled by half the world thickness and
/// the per-point `thickness`, so the global thickness stays a uniform.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ShapeVertex {
    /// Centerline position in local space
    pub position: [f32; 3],
    /// Extrusion in half-thickness units (already includes miter length and AA margin)
    pub offset: [f32; 3],
    /// Linear RGBA color
    pub color: [f32; 4],
    /// Per-point thickness multiplier
    pub thickness: f32,
    /// Signed distance from the centerline; `|side| = 1` is the true edge
    pub side: f32,
}

const_assert_eq!(std::mem::size_of::<ShapeVertex>(), 48);

impl ShapeVertex {
    /// Create a vertex that is extruded from `position`.
    pub fn extruded(position: Vec3, offset: Vec3, color: Color, thickness: f32, side: f32) -> Self {
        Self {
            position: position.to_array(),
            offset: offset.to_array(),
            color: color.to_array(),
            thickness,
            side,
        }
    }

    /// Create a vertex that stays where it is (fills).
    pub fn fixed(position: Vec3, color: Color, side: f32) -> Self {
        Self::extruded(position, Vec3::ZERO, color, 0.0, side)
    }

    /// Final position for a given half thickness in world units.
    pub fn resolve(&self, half_thickness: f32) -> Vec3 {
        Vec3::from_array(self.position)
            + Vec3::from_array(self.offset) * (half_thickness * self.thickness)
    }

    /// Get the WGPU vertex buffer layout.
    pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 12,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 24,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: 40,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32,
                },
                wgpu::VertexAttribute {
                    offset: 44,
                    shader_location: 4,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}

/// Output from mesh generation: vertices and indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TessellatedMesh<V> {
    /// Vertex data
    pub vertices: Vec<V>,
    /// Index data (triangles)
    pub indices: Vec<u32>,
}

impl<V> TessellatedMesh<V> {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Check if the mesh is empty.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of indices.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Get the number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Index the next pushed vertex will get.
    #[inline]
    pub fn next_index(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Push a triangle by absolute vertex indices.
    #[inline]
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Clear all data, keeping the allocations.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }
}

impl TessellatedMesh<ShapeVertex> {
    /// Vertex data as bytes, ready for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}
