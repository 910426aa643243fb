use crate::frame::FrameBuilder;
use crate::joins::{ExtrudeStyle, FanArc, emit_round_fan};
use crate::renderable::{StrokeUniforms, SubmeshView};
use crate::schema::{FieldDescriptor, FieldKind, ShapeSchema, UpdateKind};
use crate::dash::{self, DashStyle, Dashes};
use crate::{
    GeometryMode, MeshGenConfig, Renderable, ScreenMetrics, ShapeBase, ShapeVertex, TessellatedMesh, ThicknessSpace,
};
use glam::Vec3;
use std::f32::consts::PI;
use vectis_core::math::{Aabb, try_normalize};
use vectis_render::{Color, MaterialKind, ParameterBinding, PropertyTable};

/// How the ends of a line are finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineEndCap {
    /// Ends stop exactly at the endpoints.
    None,
    /// Ends extend by half the thickness.
    Square,
    /// Ends are half discs.
    #[default]
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineColorMode {
    #[default]
    Single,
    /// Gradient from the start color to the end color.
    Double,
}

pub mod fields {
    use super::*;

    pub const START: FieldDescriptor = FieldDescriptor::new("start", "Start", FieldKind::Vec3, UpdateKind::Geometry);
    pub const END: FieldDescriptor = FieldDescriptor::new("end", "End", FieldKind::Vec3, UpdateKind::Geometry);
    pub const GEOMETRY: FieldDescriptor = FieldDescriptor::new(
        "geometry",
        "Geometry",
        FieldKind::Enum(&["Flat 2D", "Oriented 3D"]),
        UpdateKind::GeometryAndMaterial,
    );
    pub const THICKNESS: FieldDescriptor =
        FieldDescriptor::new("thickness", "Thickness", FieldKind::Float, UpdateKind::Material);
    pub const THICKNESS_SPACE: FieldDescriptor = FieldDescriptor::new(
        "thickness_space",
        "Thickness Space",
        FieldKind::Enum(&["Meters", "Pixels", "Noots"]),
        UpdateKind::Material,
    );
    pub const COLOR_MODE: FieldDescriptor = FieldDescriptor::new(
        "color_mode",
        "Color Mode",
        FieldKind::Enum(&["Single", "Double"]),
        UpdateKind::Geometry,
    );
    pub const COLOR_START: FieldDescriptor =
        FieldDescriptor::new("color_start", "Start Color", FieldKind::Color, UpdateKind::Geometry);
    pub const COLOR_END: FieldDescriptor =
        FieldDescriptor::new("color_end", "End Color", FieldKind::Color, UpdateKind::Geometry);
    pub const END_CAPS: FieldDescriptor = FieldDescriptor::new(
        "end_caps",
        "End Caps",
        FieldKind::Enum(&["None", "Square", "Round"]),
        UpdateKind::Geometry,
    );
}

pub static LINE_SCHEMA: ShapeSchema = ShapeSchema {
    shape: "Line",
    fields: &[
        fields::START,
        fields::END,
        fields::GEOMETRY,
        fields::THICKNESS,
        fields::THICKNESS_SPACE,
        fields::COLOR_MODE,
        fields::COLOR_START,
        fields::COLOR_END,
        fields::END_CAPS,
        dash::fields::DASHED,
        dash::fields::DASH_STYLE,
        dash::fields::MATCH_DASH_SPACING_TO_SIZE,
    ],
};

/// A single thick segment with optional end caps.
#[derive(Debug, Clone)]
pub struct Line {
    base: ShapeBase,
    start: Vec3,
    end: Vec3,
    geometry: GeometryMode,
    thickness: f32,
    thickness_space: ThicknessSpace,
    color_mode: LineColorMode,
    color_start: Color,
    color_end: Color,
    end_caps: LineEndCap,
    dashes: Dashes,
    mesh: TessellatedMesh<ShapeVertex>,
}

impl Default for Line {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::X)
    }
}

impl Line {
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self {
            base: ShapeBase::new(),
            start,
            end,
            geometry: GeometryMode::default(),
            thickness: 0.125,
            thickness_space: ThicknessSpace::default(),
            color_mode: LineColorMode::default(),
            color_start: Color::WHITE,
            color_end: Color::WHITE,
            end_caps: LineEndCap::default(),
            dashes: Dashes::default(),
            mesh: TessellatedMesh::new(),
        }
    }

    pub fn start(&self) -> Vec3 {
        self.start
    }

    pub fn end(&self) -> Vec3 {
        self.end
    }

    pub fn geometry(&self) -> GeometryMode {
        self.geometry
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn thickness_space(&self) -> ThicknessSpace {
        self.thickness_space
    }

    pub fn color_mode(&self) -> LineColorMode {
        self.color_mode
    }

    pub fn end_caps(&self) -> LineEndCap {
        self.end_caps
    }

    pub fn dashes(&self) -> Dashes {
        self.dashes
    }

    /// Colors at the start and end, after applying the color mode.
    pub fn end_colors(&self) -> (Color, Color) {
        match self.color_mode {
            LineColorMode::Single => (self.color_start, self.color_start),
            LineColorMode::Double => (self.color_start, self.color_end),
        }
    }

    pub fn mesh(&self) -> &TessellatedMesh<ShapeVertex> {
        &self.mesh
    }

    pub fn set_start(&mut self, start: Vec3) -> bool {
        fields::START.assign(self.base.dirty_mut(), &mut self.start, start)
    }

    pub fn set_end(&mut self, end: Vec3) -> bool {
        fields::END.assign(self.base.dirty_mut(), &mut self.end, end)
    }

    pub fn set_geometry(&mut self, geometry: GeometryMode) -> bool {
        fields::GEOMETRY.assign(self.base.dirty_mut(), &mut self.geometry, geometry)
    }

    pub fn set_thickness(&mut self, thickness: f32) -> bool {
        fields::THICKNESS.assign(self.base.dirty_mut(), &mut self.thickness, thickness.max(0.0))
    }

    pub fn set_thickness_space(&mut self, space: ThicknessSpace) -> bool {
        fields::THICKNESS_SPACE.assign(self.base.dirty_mut(), &mut self.thickness_space, space)
    }

    pub fn set_color_mode(&mut self, mode: LineColorMode) -> bool {
        fields::COLOR_MODE.assign(self.base.dirty_mut(), &mut self.color_mode, mode)
    }

    pub fn set_color_start(&mut self, color: Color) -> bool {
        fields::COLOR_START.assign(self.base.dirty_mut(), &mut self.color_start, color)
    }

    pub fn set_color_end(&mut self, color: Color) -> bool {
        fields::COLOR_END.assign(self.base.dirty_mut(), &mut self.color_end, color)
    }

    pub fn set_end_caps(&mut self, caps: LineEndCap) -> bool {
        fields::END_CAPS.assign(self.base.dirty_mut(), &mut self.end_caps, caps)
    }

    pub fn set_dashed(&mut self, dashed: bool) -> bool {
        dash::fields::DASHED.assign(self.base.dirty_mut(), &mut self.dashes.dashed, dashed)
    }

    pub fn set_dash_style(&mut self, style: DashStyle) -> bool {
        dash::fields::DASH_STYLE.assign(self.base.dirty_mut(), &mut self.dashes.style, style.sanitized())
    }

    pub fn set_match_dash_spacing_to_size(&mut self, matched: bool) -> bool {
        dash::fields::MATCH_DASH_SPACING_TO_SIZE.assign(
            self.base.dirty_mut(),
            &mut self.dashes.match_spacing_to_size,
            matched,
        )
    }
}

impl Renderable for Line {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn schema(&self) -> &'static ShapeSchema {
        &LINE_SCHEMA
    }

    fn rebuild_mesh(&mut self, config: &MeshGenConfig) {
        self.mesh.clear();

        let start = self.geometry.project(self.start);
        let end = self.geometry.project(self.end);
        let Some(tangent) = try_normalize(end - start) else {
            tracing::trace!("Line {:?} has zero length", self.base.id());
            return;
        };
        let side = FrameBuilder::new(self.geometry, &[start, end], config).next_side(tangent);

        let scale = config.extrusion_scale();
        let (start_color, end_color) = self.end_colors();
        let extend = match self.end_caps {
            LineEndCap::Square => tangent * scale,
            LineEndCap::None | LineEndCap::Round => Vec3::ZERO,
        };
        let edge = side * scale;

        let base = self.mesh.next_index();
        self.mesh.vertices.extend_from_slice(&[
            ShapeVertex::extruded(start, -edge - extend, start_color, 1.0, -scale),
            ShapeVertex::extruded(end, -edge + extend, end_color, 1.0, -scale),
            ShapeVertex::extruded(end, edge + extend, end_color, 1.0, scale),
            ShapeVertex::extruded(start, edge - extend, start_color, 1.0, scale),
        ]);
        self.mesh.push_triangle(base, base + 1, base + 2);
        self.mesh.push_triangle(base, base + 2, base + 3);

        if self.end_caps == LineEndCap::Round {
            let facing = tangent.cross(side);
            let segments = config.round_segments(PI);
            for (center, toward, color) in [(start, -tangent, start_color), (end, tangent, end_color)] {
                let arc = FanArc {
                    from: side,
                    toward,
                    angle: PI,
                    segments,
                    facing,
                };
                let style = ExtrudeStyle {
                    color,
                    thickness: 1.0,
                    scale,
                };
                emit_round_fan(&mut self.mesh, center, &arc, &style);
            }
        }
    }

    fn submeshes(&self) -> Vec<SubmeshView<'_>> {
        vec![SubmeshView {
            material: MaterialKind::Line,
            mesh: &self.mesh,
        }]
    }

    /// Zero-length lines draw nothing.
    fn bounds(&self, metrics: &ScreenMetrics) -> Option<Aabb> {
        let start = self.geometry.project(self.start);
        let end = self.geometry.project(self.end);
        try_normalize(end - start)?;
        let half = 0.5 * self.thickness_space.to_world(self.thickness, metrics);
        Some(Aabb::new(start, end).expanded(half))
    }

    fn material_parameters(&self, table: &PropertyTable, config: &MeshGenConfig) -> Vec<ParameterBinding> {
        let mut bindings = StrokeUniforms {
            thickness: self.thickness,
            thickness_space: self.thickness_space,
            geometry: self.geometry,
        }
        .bindings(&self.base, table, config);
        bindings.extend(self.dashes.bindings(table));
        bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vectis_render::{MaterialParameter, ShapeProperty};

    fn mesh_for(caps: LineEndCap) -> TessellatedMesh<ShapeVertex> {
        let mut line = Line::new(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0));
        line.set_end_caps(caps);
        line.regenerate(&MeshGenConfig::default().with_aa_margin(0.0));
        line.mesh().clone()
    }

    #[test]
    fn test_square_caps_lengthen_the_line() {
        let plain = mesh_for(LineEndCap::None);
        let square = mesh_for(LineEndCap::Square);
        let extent = |mesh: &TessellatedMesh<ShapeVertex>| {
            let xs: Vec<f32> = mesh.vertices.iter().map(|v| v.resolve(0.5).x).collect();
            xs.iter().cloned().fold(f32::MIN, f32::max) - xs.iter().cloned().fold(f32::MAX, f32::min)
        };
        assert_eq!(extent(&plain), 2.0);
        assert_eq!(extent(&square), 3.0);
    }

    #[test]
    fn test_round_caps_add_two_half_fans() {
        let round = mesh_for(LineEndCap::Round);
        assert_eq!(round.triangle_count(), 2 + 2 * 16);
    }

    #[test]
    fn test_double_color_mode() {
        let mut line = Line::default();
        line.set_color_start(Color::RED);
        line.set_color_end(Color::BLUE);
        assert_eq!(line.end_colors(), (Color::RED, Color::RED));
        line.set_color_mode(LineColorMode::Double);
        assert_eq!(line.end_colors(), (Color::RED, Color::BLUE));
        assert!(line.is_dirty());
    }

    #[test]
    fn test_thickness_is_a_uniform() {
        let mut line = Line::default();
        line.regenerate(&MeshGenConfig::default());
        line.mark_properties_synced();
        line.set_thickness(2.0);
        assert!(!line.is_dirty());
        assert!(line.properties_dirty());
    }

    #[test]
    fn test_zero_length_line_is_empty() {
        let mut line = Line::new(Vec3::ONE, Vec3::ONE);
        line.regenerate(&MeshGenConfig::default());
        assert!(line.mesh().is_empty());
        assert_eq!(line.bounds(&ScreenMetrics::default()), None);
    }

    #[test]
    fn test_dash_settings_are_uniforms() {
        let mut line = Line::default();
        line.regenerate(&MeshGenConfig::default());
        line.mark_properties_synced();

        assert!(line.set_dashed(true));
        assert!(line.set_dash_style(DashStyle::new(2.0, 0.5).with_offset(0.25)));
        assert!(line.set_match_dash_spacing_to_size(true));
        assert!(!line.set_dashed(true));
        assert!(!line.is_dirty());
        assert!(line.properties_dirty());

        let table = PropertyTable::sequential();
        let bindings = line.material_parameters(&table, &MeshGenConfig::default());
        let value = |property| {
            let id = table.id(property);
            bindings.iter().find(|b| b.id == id).map(|b| b.value)
        };
        assert_eq!(value(ShapeProperty::DashSize), Some(MaterialParameter::Float(2.0)));
        assert_eq!(value(ShapeProperty::DashSpacing), Some(MaterialParameter::Float(2.0)));
        assert_eq!(value(ShapeProperty::DashOffset), Some(MaterialParameter::Float(0.25)));
        assert_eq!(value(ShapeProperty::Thickness), Some(MaterialParameter::Float(0.125)));
    }

    #[test]
    fn test_dash_fields_in_schema() {
        for name in ["dashed", "dash_style", "match_dash_spacing_to_size"] {
            let field = LINE_SCHEMA.field(name).unwrap();
            assert_eq!(field.update, UpdateKind::Material);
        }
    }
}
