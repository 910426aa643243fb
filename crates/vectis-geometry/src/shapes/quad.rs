use crate::renderable::{SubmeshView, fill_bindings};
use crate::schema::{FieldDescriptor, FieldKind, ShapeSchema, UpdateKind};
use crate::{MeshGenConfig, Renderable, ScreenMetrics, ShapeBase, ShapeVertex, TessellatedMesh};
use glam::Vec3;
use vectis_core::math::Aabb;
use vectis_render::{Color, MaterialKind, ParameterBinding, PropertyTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QuadColorMode {
    /// Color `a` everywhere.
    #[default]
    Single,
    /// `a` on the A/B edge, `c` on the C/D edge.
    Horizontal,
    /// `d` on the A/D edge, `b` on the B/C edge.
    Vertical,
    /// One color per corner.
    PerCorner,
}

/// Corner colors of a quad. Which ones are used depends on the color mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadColors {
    pub a: Color,
    pub b: Color,
    pub c: Color,
    pub d: Color,
}

impl Default for QuadColors {
    fn default() -> Self {
        Self {
            a: Color::WHITE,
            b: Color::WHITE,
            c: Color::WHITE,
            d: Color::WHITE,
        }
    }
}

impl QuadColors {
    /// Colors at corners A, B, C, D.
    pub fn resolve(&self, mode: QuadColorMode) -> [Color; 4] {
        match mode {
            QuadColorMode::Single => [self.a; 4],
            QuadColorMode::Horizontal => [self.a, self.a, self.c, self.c],
            QuadColorMode::Vertical => [self.d, self.b, self.b, self.d],
            QuadColorMode::PerCorner => [self.a, self.b, self.c, self.d],
        }
    }
}

pub mod fields {
    use super::*;

    pub const A: FieldDescriptor = FieldDescriptor::new("a", "A", FieldKind::Vec3, UpdateKind::Geometry);
    pub const B: FieldDescriptor = FieldDescriptor::new("b", "B", FieldKind::Vec3, UpdateKind::Geometry);
    pub const C: FieldDescriptor = FieldDescriptor::new("c", "C", FieldKind::Vec3, UpdateKind::Geometry);
    pub const D: FieldDescriptor = FieldDescriptor::new("d", "D", FieldKind::Vec3, UpdateKind::Geometry);
    pub const AUTO_SET_D: FieldDescriptor =
        FieldDescriptor::new("auto_set_d", "Auto-set D", FieldKind::Bool, UpdateKind::Geometry);
    pub const COLOR_MODE: FieldDescriptor = FieldDescriptor::new(
        "color_mode",
        "Color Mode",
        FieldKind::Enum(&["Single", "Horizontal", "Vertical", "Per Corner"]),
        UpdateKind::Geometry,
    );
    pub const COLORS: FieldDescriptor = FieldDescriptor::new("colors", "Colors", FieldKind::Color, UpdateKind::Geometry);
}

pub static QUAD_SCHEMA: ShapeSchema = ShapeSchema {
    shape: "Quad",
    fields: &[
        fields::A,
        fields::B,
        fields::C,
        fields::D,
        fields::AUTO_SET_D,
        fields::COLOR_MODE,
        fields::COLORS,
    ],
};

/// A filled quadrilateral through corners A, B, C, D.
#[derive(Debug, Clone)]
pub struct Quad {
    base: ShapeBase,
    corners: [Vec3; 4],
    auto_set_d: bool,
    color_mode: QuadColorMode,
    colors: QuadColors,
    mesh: TessellatedMesh<ShapeVertex>,
}

impl Default for Quad {
    fn default() -> Self {
        Self::new(
            Vec3::new(-0.5, -0.5, 0.0),
            Vec3::new(-0.5, 0.5, 0.0),
            Vec3::new(0.5, 0.5, 0.0),
            Vec3::new(0.5, -0.5, 0.0),
        )
    }
}

impl Quad {
    pub fn new(a: Vec3, b: Vec3, c: Vec3, d: Vec3) -> Self {
        Self {
            base: ShapeBase::new(),
            corners: [a, b, c, d],
            auto_set_d: false,
            color_mode: QuadColorMode::default(),
            colors: QuadColors::default(),
            mesh: TessellatedMesh::new(),
        }
    }

    /// D completing the parallelogram through A, B, C.
    pub fn d_auto(&self) -> Vec3 {
        let [a, b, c, _] = self.corners;
        a + (c - b)
    }

    /// Corners as drawn, with D replaced by [`Quad::d_auto`] when enabled.
    pub fn corners(&self) -> [Vec3; 4] {
        let [a, b, c, d] = self.corners;
        [a, b, c, if self.auto_set_d { self.d_auto() } else { d }]
    }

    pub fn auto_set_d(&self) -> bool {
        self.auto_set_d
    }

    pub fn color_mode(&self) -> QuadColorMode {
        self.color_mode
    }

    pub fn colors(&self) -> QuadColors {
        self.colors
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

    pub fn set_d(&mut self, d: Vec3) -> bool {
        fields::D.assign(self.base.dirty_mut(), &mut self.corners[3], d)
    }

    pub fn set_auto_set_d(&mut self, enabled: bool) -> bool {
        fields::AUTO_SET_D.assign(self.base.dirty_mut(), &mut self.auto_set_d, enabled)
    }

    pub fn set_color_mode(&mut self, mode: QuadColorMode) -> bool {
        fields::COLOR_MODE.assign(self.base.dirty_mut(), &mut self.color_mode, mode)
    }

    pub fn set_colors(&mut self, colors: QuadColors) -> bool {
        fields::COLORS.assign(self.base.dirty_mut(), &mut self.colors, colors)
    }
}

impl Renderable for Quad {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn schema(&self) -> &'static ShapeSchema {
        &QUAD_SCHEMA
    }

    fn rebuild_mesh(&mut self, _config: &MeshGenConfig) {
        self.mesh.clear();
        let colors = self.colors.resolve(self.color_mode);
        for (corner, color) in self.corners().into_iter().zip(colors) {
            self.mesh.vertices.push(ShapeVertex::fixed(corner, color, 0.0));
        }
        self.mesh.push_triangle(0, 1, 2);
        self.mesh.push_triangle(0, 2, 3);
    }

    fn submeshes(&self) -> Vec<SubmeshView<'_>> {
        vec![SubmeshView {
            material: MaterialKind::Quad,
            mesh: &self.mesh,
        }]
    }

    fn bounds(&self, _metrics: &ScreenMetrics) -> Option<Aabb> {
        Aabb::from_points(self.corners())
    }

    fn material_parameters(&self, table: &PropertyTable, config: &MeshGenConfig) -> Vec<ParameterBinding> {
        fill_bindings(&self.base, table, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_set_d() {
        let mut quad = Quad::new(Vec3::ZERO, Vec3::Y, Vec3::new(1.0, 1.0, 0.0), Vec3::new(5.0, 5.0, 5.0));
        assert_eq!(quad.corners()[3], Vec3::new(5.0, 5.0, 5.0));
        assert!(quad.set_auto_set_d(true));
        assert_eq!(quad.corners()[3], Vec3::X);
        assert!(quad.is_dirty());
    }

    #[test]
    fn test_color_modes() {
        let colors = QuadColors {
            a: Color::RED,
            b: Color::GREEN,
            c: Color::BLUE,
            d: Color::BLACK,
        };
        assert_eq!(colors.resolve(QuadColorMode::Single), [Color::RED; 4]);
        assert_eq!(
            colors.resolve(QuadColorMode::Horizontal),
            [Color::RED, Color::RED, Color::BLUE, Color::BLUE]
        );
        assert_eq!(
            colors.resolve(QuadColorMode::Vertical),
            [Color::BLACK, Color::GREEN, Color::GREEN, Color::BLACK]
        );
    }

    #[test]
    fn test_mesh_is_two_triangles() {
        let mut quad = Quad::default();
        quad.regenerate(&MeshGenConfig::default());
        assert_eq!(quad.mesh().vertex_count(), 4);
        assert_eq!(quad.mesh().indices, vec![0, 1, 2, 0, 2, 3]);
        let bounds = quad.bounds(&ScreenMetrics::default()).unwrap();
        assert_eq!(bounds.size(), Vec3::new(1.0, 1.0, 0.0));
    }
}
