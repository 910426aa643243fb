//! The host GPU boundary.
//!
//! Vectis never creates GPU objects itself. The host implements
//! [`ShapeBackend`] on top of its device; the shape renderer only decides
//! *when* to upload meshes, push uniforms and draw.

use crate::{MaterialKey, MaterialKind, MaterialParameter, PropertyId, RenderResult};
use vectis_core::math::Aabb;

/// Identifies the GPU-side mesh of one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshHandle(pub u64);

/// Vertex and index data for one submesh, borrowed from the shape.
#[derive(Debug, Clone, Copy)]
pub struct SubmeshUpload<'a> {
    pub material: MaterialKind,
    /// Raw vertex bytes (`bytemuck::cast_slice` of the vertex array).
    pub vertices: &'a [u8],
    /// Size of one vertex in bytes.
    pub vertex_stride: u64,
    pub indices: &'a [u32],
}

impl SubmeshUpload<'_> {
    pub fn vertex_count(&self) -> usize {
        if self.vertex_stride == 0 {
            return 0;
        }
        self.vertices.len() / self.vertex_stride as usize
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// A single draw submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub handle: MeshHandle,
    /// Index into the submeshes of the last upload.
    pub submesh: u32,
    pub material: MaterialKey,
    pub sort_order: i32,
    pub bounds: Aabb,
}

/// Host-implemented GPU operations.
pub trait ShapeBackend {
    /// Replace the buffers of `handle`, allocating them on first use.
    fn upload_mesh(&mut self, handle: MeshHandle, submeshes: &[SubmeshUpload<'_>]) -> RenderResult<()>;

    /// Set a uniform on the material instance of `handle`.
    fn set_parameter(&mut self, handle: MeshHandle, id: PropertyId, value: &MaterialParameter);

    /// Queue a draw of one submesh.
    fn draw(&mut self, call: &DrawCall);

    /// Free every GPU resource of `handle`.
    fn release(&mut self, handle: MeshHandle);
}
