//! Dirty tracking for shape meshes and material parameters.

use bitflags::bitflags;

bitflags! {
    /// What a shape needs before it can be drawn again.
    ///
    /// Geometry edits set `MESH` and force regeneration. Edits that can be
    /// expressed as shader uniforms (thickness, tint, thickness space) only
    /// set `PROPERTIES`, which is far cheaper to service.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ShapeDirtyFlags: u8 {
        /// Vertex/index data is out of date.
        const MESH       = 1 << 0;
        /// Material uniforms are out of date.
        const PROPERTIES = 1 << 1;
    }
}

impl ShapeDirtyFlags {
    #[inline]
    pub fn needs_mesh(&self) -> bool {
        self.contains(Self::MESH)
    }

    #[inline]
    pub fn needs_properties(&self) -> bool {
        self.contains(Self::PROPERTIES)
    }

    #[inline]
    pub fn mesh_state(&self) -> MeshState {
        if self.needs_mesh() {
            MeshState::Dirty
        } else {
            MeshState::Clean
        }
    }
}

/// Whether a shape's mesh buffer matches its current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshState {
    Clean,
    Dirty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_state() {
        assert_eq!(ShapeDirtyFlags::empty().mesh_state(), MeshState::Clean);
        assert_eq!(ShapeDirtyFlags::PROPERTIES.mesh_state(), MeshState::Clean);
        assert_eq!(ShapeDirtyFlags::MESH.mesh_state(), MeshState::Dirty);
    }

    #[test]
    fn test_marking_is_idempotent() {
        let mut flags = ShapeDirtyFlags::MESH;
        flags.insert(ShapeDirtyFlags::MESH);
        assert_eq!(flags, ShapeDirtyFlags::MESH);
        flags.remove(ShapeDirtyFlags::MESH);
        assert!(!flags.needs_mesh());
        assert!(!flags.needs_properties());
    }
}
