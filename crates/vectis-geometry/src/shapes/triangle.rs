use crate::renderable::{SubmeshView, fill_bindings};
use crate::schema::{FieldDescriptor, FieldKind, ShapeSchema, UpdateKind};
use crate::{MeshGenConfig, Renderable, ScreenMetrics, ShapeBase, ShapeVertex, TessellatedMesh};
use glam::Vec3;
use vectis_core::math::Aabb;
use vectis_render::{Color, MaterialKind, ParameterBinding, PropertyTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TriangleColorMode {
    #[default]
    Single,
    PerCorner,
}

pub mod fields {
    use super::*;

    pub const A: FieldDescriptor = FieldDescriptor::new("a", "A", FieldKind::Vec3, UpdateKind::Geometry);
    pub const B: FieldDescriptor = FieldDescriptor::new("b", "B", FieldKind::Vec3, UpdateKind::Geometry);
    pub const C: FieldDescriptor = FieldDescriptor::new("c", "C", FieldKind::Vec3, UpdateKind::Geometry);
    pub const COLOR_MODE: FieldDescriptor = FieldDescriptor::new(
        "color_mode",
        "Color Mode",
        FieldKind::Enum(&["Single", "Per Corner"]),
        UpdateKind::Geometry,
    );
    pub const COLORS: FieldDescriptor = FieldDescriptor::new("colors", "Colors", FieldKind::Color, UpdateKind::Geometry);
}

pub static TRIANGLE_SCHEMA: ShapeSchema = ShapeSchema {
    shape: "Triangle",
    fields: &[fields::A, fields::B, fields::C, fields::COLOR_MODE, fields::COLORS],
};

/// A filled triangle.
#[derive(Debug, Clone)]
pub struct Triangle {
    base: ShapeBase,
    corners: [Vec3; 3],
    color_mode: TriangleColorMode,
    colors: [Color; 3],
    mesh: TessellatedMesh<ShapeVertex>,
}

impl Default for Triangle {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::new(0.5, 1.0, 0.0), Vec3::X)
    }
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self {
            base: ShapeBase::new(),
            corners: [a, b, c],
            color_mode: TriangleColorMode::default(),
            colors: [Color::WHITE; 3],
            mesh: TessellatedMesh::new(),
        }
    }

    pub fn corners(&self) -> [Vec3; 3] {
        self.corners
    }

    pub fn color_mode(&self) -> TriangleColorMode {
        self.color_mode
    }

    /// Colors at A, B, C after applying the color mode.
    pub fn corner_colors(&self) -> [Color; 3] {
        match self.color_mode {
            TriangleColorMode::Single => [self.colors[0]; 3],
            TriangleColorMode::PerCorner => self.colors,
        }
    }

    pub fn mesh(&self) -> &TessellatedMesh<ShapeVertex> {
        &self.mesh
    }

    pub fn set_a(&mut self, a: Vec3) -> bool {
        fields::A.assign(self.base.dirty_mut(), &mut self.corners[0], a)
    }

    pub fn set_b(&mut self, b: Vec3) -> bool {
        fields::B.assign(self.base.dirty_mut(), &mut self.corners[1], b)
    }

    pub fn set_c(&mut self, c: Vec3) -> bool {
        fields::C.assign(self.base.dirty_mut(), &mut self.corners[2], c)
    }

    pub fn set_color_mode(&mut self, mode: TriangleColorMode) -> bool {
        fields::COLOR_MODE.assign(self.base.dirty_mut(), &mut self.color_mode, mode)
    }

    /// Colors for A, B and C. In `Single` mode only A's is used.
    pub fn set_colors(&mut self, colors: [Color; 3]) -> bool {
        fields::COLORS.assign(self.base.dirty_mut(), &mut self.colors, colors)
    }
}

impl Renderable for Triangle {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn schema(&self) -> &'static ShapeSchema {
        &TRIANGLE_SCHEMA
    }

    fn rebuild_mesh(&mut self, _config: &MeshGenConfig) {
        self.mesh.clear();
        for (corner, color) in self.corners.into_iter().zip(self.corner_colors()) {
            self.mesh.vertices.push(ShapeVertex::fixed(corner, color, 0.0));
        }
        self.mesh.push_triangle(0, 1, 2);
    }

    fn submeshes(&self) -> Vec<SubmeshView<'_>> {
        vec![SubmeshView {
            material: MaterialKind::Triangle,
            mesh: &self.mesh,
        }]
    }

    fn bounds(&self, _metrics: &ScreenMetrics) -> Option<Aabb> {
        Aabb::from_points(self.corners)
    }

    fn material_parameters(&self, table: &PropertyTable, config: &MeshGenConfig) -> Vec<ParameterBinding> {
        fill_bindings(&self.base, table, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_corner_colors_are_baked() {
        let mut triangle = Triangle::default();
        triangle.set_colors([Color::RED, Color::GREEN, Color::BLUE]);
        triangle.regenerate(&MeshGenConfig::default());
        assert!(triangle.mesh().vertices.iter().all(|v| v.color == Color::RED.to_array()));

        triangle.set_color_mode(TriangleColorMode::PerCorner);
        assert!(triangle.is_dirty());
        triangle.regenerate(&MeshGenConfig::default());
        assert_eq!(triangle.mesh().vertices[2].color, Color::BLUE.to_array());
    }
}
