//! The trait every drawable shape implements.
//!
//! Shapes own their data, their generated meshes and a [`ShapeBase`]. The
//! [`ShapeRenderer`](crate::ShapeRenderer) only talks to them through this
//! trait: it asks whether the mesh is stale, regenerates it, reads the
//! submeshes for upload and collects uniforms when properties changed.

use crate::{
    GeometryMode, MeshGenConfig, MeshState, ScreenMetrics, ShapeBase, ShapeDirtyFlags, ShapeId, ShapeSchema,
    ShapeVertex, TessellatedMesh, ThicknessSpace,
};
use vectis_core::math::Aabb;
use vectis_render::{BlendMode, MaterialKind, MaterialParameter, ParameterBinding, PropertyTable, ShapeProperty};

/// One drawable part of a shape's mesh.
#[derive(Debug, Clone, Copy)]
pub struct SubmeshView<'a> {
    pub material: MaterialKind,
    pub mesh: &'a TessellatedMesh<ShapeVertex>,
}

pub trait Renderable {
    fn base(&self) -> &ShapeBase;
    fn base_mut(&mut self) -> &mut ShapeBase;

    /// Field schema of this shape type.
    fn schema(&self) -> &'static ShapeSchema;

    /// Rebuild the mesh from the current state. Called by [`Renderable::regenerate`].
    fn rebuild_mesh(&mut self, config: &MeshGenConfig);

    /// Parts of the current mesh, in submesh order.
    fn submeshes(&self) -> Vec<SubmeshView<'_>>;

    /// Local-space bounds of everything the shape draws, `None` when it draws nothing.
    fn bounds(&self, metrics: &ScreenMetrics) -> Option<Aabb>;

    /// Uniform values for the shape's materials.
    fn material_parameters(&self, table: &PropertyTable, config: &MeshGenConfig) -> Vec<ParameterBinding>;

    fn id(&self) -> ShapeId {
        self.base().id()
    }

    fn dirty_flags(&self) -> ShapeDirtyFlags {
        self.base().dirty()
    }

    /// Whether the mesh must be regenerated before the next draw.
    fn is_dirty(&self) -> bool {
        self.dirty_flags().needs_mesh()
    }

    fn mesh_state(&self) -> MeshState {
        self.dirty_flags().mesh_state()
    }

    fn properties_dirty(&self) -> bool {
        self.dirty_flags().needs_properties()
    }

    /// Rebuild the mesh and mark it clean.
    fn regenerate(&mut self, config: &MeshGenConfig) {
        self.rebuild_mesh(config);
        self.base_mut().clear(ShapeDirtyFlags::MESH);
    }

    fn mark_properties_synced(&mut self) {
        self.base_mut().clear(ShapeDirtyFlags::PROPERTIES);
    }

    fn blend_mode(&self) -> BlendMode {
        self.base().blend_mode()
    }

    fn sort_order(&self) -> i32 {
        self.base().sort_order()
    }
}

/// The uniforms every stroked shape pushes.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StrokeUniforms {
    pub thickness: f32,
    pub thickness_space: ThicknessSpace,
    pub geometry: GeometryMode,
}

impl StrokeUniforms {
    pub fn bindings(&self, base: &ShapeBase, table: &PropertyTable, config: &MeshGenConfig) -> Vec<ParameterBinding> {
        let bind = |property, value| ParameterBinding::new(table.id(property), value);
        vec![
            bind(ShapeProperty::Thickness, MaterialParameter::Float(self.thickness)),
            bind(
                ShapeProperty::ThicknessSpace,
                MaterialParameter::Int(self.thickness_space.shader_index()),
            ),
            bind(ShapeProperty::Alignment, MaterialParameter::Int(self.geometry.shader_index())),
            bind(ShapeProperty::ScaleMode, MaterialParameter::Int(base.scale_mode().shader_index())),
            bind(ShapeProperty::AntialiasMargin, MaterialParameter::Float(config.aa_margin)),
            bind(ShapeProperty::Color, MaterialParameter::Color(base.tint())),
        ]
    }
}

/// Uniforms of filled shapes, which have no thickness.
pub(crate) fn fill_bindings(base: &ShapeBase, table: &PropertyTable, config: &MeshGenConfig) -> Vec<ParameterBinding> {
    vec![
        ParameterBinding::new(
            table.id(ShapeProperty::ScaleMode),
            MaterialParameter::Int(base.scale_mode().shader_index()),
        ),
        ParameterBinding::new(
            table.id(ShapeProperty::AntialiasMargin),
            MaterialParameter::Float(config.aa_margin),
        ),
        ParameterBinding::new(table.id(ShapeProperty::Color), MaterialParameter::Color(base.tint())),
    ]
}
