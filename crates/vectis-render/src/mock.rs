//! Recording backend for tests.
//!
//! [`MockBackend`] stores every call instead of touching a GPU so tests can
//! assert on what the shape renderer decided to do.

use crate::{
    DrawCall, MaterialKind, MaterialParameter, MeshHandle, PropertyId, RenderError, RenderResult,
    ShapeBackend, SubmeshUpload,
};
use ahash::HashMap;

/// Summary of one uploaded submesh.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedSubmesh {
    pub material: MaterialKind,
    pub vertex_count: usize,
    pub index_count: usize,
    pub vertex_bytes: Vec<u8>,
    pub indices: Vec<u32>,
}

/// Records a backend call for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    UploadMesh {
        handle: MeshHandle,
        submeshes: Vec<UploadedSubmesh>,
    },
    SetParameter {
        handle: MeshHandle,
        id: PropertyId,
        value: MaterialParameter,
    },
    Draw(DrawCall),
    Release(MeshHandle),
}

/// Mock implementation of [`ShapeBackend`].
#[derive(Debug, Default)]
pub struct MockBackend {
    calls: Vec<BackendCall>,
    meshes: HashMap<MeshHandle, Vec<UploadedSubmesh>>,
    fail_uploads: bool,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent upload fail.
    pub fn set_fail_uploads(&mut self, fail: bool) {
        self.fail_uploads = fail;
    }

    /// All recorded calls, oldest first.
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Forget recorded calls (resident meshes are kept).
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn count_uploads(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, BackendCall::UploadMesh { .. }))
            .count()
    }

    pub fn count_parameter_sets(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, BackendCall::SetParameter { .. }))
            .count()
    }

    /// Draw calls in submission order.
    pub fn draws(&self) -> Vec<DrawCall> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                BackendCall::Draw(call) => Some(*call),
                _ => None,
            })
            .collect()
    }

    /// Most recent value set for `id` on `handle`.
    pub fn parameter(&self, handle: MeshHandle, id: PropertyId) -> Option<MaterialParameter> {
        self.calls.iter().rev().find_map(|c| match c {
            BackendCall::SetParameter {
                handle: h,
                id: i,
                value,
            } if *h == handle && *i == id => Some(*value),
            _ => None,
        })
    }

    /// Submeshes currently resident for `handle`.
    pub fn mesh(&self, handle: MeshHandle) -> Option<&[UploadedSubmesh]> {
        self.meshes.get(&handle).map(Vec::as_slice)
    }

    pub fn resident_meshes(&self) -> usize {
        self.meshes.len()
    }
}

impl ShapeBackend for MockBackend {
    fn upload_mesh(&mut self, handle: MeshHandle, submeshes: &[SubmeshUpload<'_>]) -> RenderResult<()> {
        if self.fail_uploads {
            return Err(RenderError::UploadFailed {
                handle,
                message: "mock upload failure".to_string(),
            });
        }

        let uploaded = submeshes
            .iter()
            .map(|s| UploadedSubmesh {
                material: s.material,
                vertex_count: s.vertex_count(),
                index_count: s.index_count(),
                vertex_bytes: s.vertices.to_vec(),
                indices: s.indices.to_vec(),
            })
            .collect::<Vec<_>>();

        self.meshes.insert(handle, uploaded.clone());
        self.calls.push(BackendCall::UploadMesh {
            handle,
            submeshes: uploaded,
        });
        Ok(())
    }

    fn set_parameter(&mut self, handle: MeshHandle, id: PropertyId, value: &MaterialParameter) {
        self.calls.push(BackendCall::SetParameter {
            handle,
            id,
            value: *value,
        });
    }

    fn draw(&mut self, call: &DrawCall) {
        self.calls.push(BackendCall::Draw(*call));
    }

    fn release(&mut self, handle: MeshHandle) {
        self.meshes.remove(&handle);
        self.calls.push(BackendCall::Release(handle));
    }
}
