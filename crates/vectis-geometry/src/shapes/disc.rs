use crate::dash::{self, DashStyle, Dashes};
use crate::joins::{ExtrudeStyle, FanArc, emit_round_fan};
use crate::renderable::{StrokeUniforms, SubmeshView};
use crate::schema::{FieldDescriptor, FieldKind, ShapeSchema, UpdateKind};
use crate::{
    GeometryMode, MeshGenConfig, Renderable, ScreenMetrics, ShapeBase, ShapeVertex, TessellatedMesh, ThicknessSpace,
};
use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, PI, TAU};
use vectis_core::math::Aabb;
use vectis_render::{Color, MaterialKind, MaterialParameter, ParameterBinding, PropertyTable, ShapeProperty};

/// Disc variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DiscKind {
    /// Filled circle.
    #[default]
    Disc,
    /// Filled circle sector.
    Pie,
    /// Circle outline.
    Ring,
    /// Outline of a circle sector.
    Arc,
}

impl DiscKind {
    pub fn has_thickness(self) -> bool {
        matches!(self, DiscKind::Ring | DiscKind::Arc)
    }

    pub fn has_sector(self) -> bool {
        matches!(self, DiscKind::Pie | DiscKind::Arc)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ArcEndCap {
    #[default]
    None,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DiscColorMode {
    /// `inner_start` everywhere.
    #[default]
    Single,
    /// `inner_start` at the center (or inner edge), `outer_start` at the rim.
    Radial,
    /// `inner_start` at the start angle, `inner_end` at the end angle.
    Angular,
    /// All four colors, blended by radius and angle.
    Bilinear,
}

/// The four corner colors of a disc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscColors {
    pub inner_start: Color,
    pub outer_start: Color,
    pub inner_end: Color,
    pub outer_end: Color,
}

impl Default for DiscColors {
    fn default() -> Self {
        Self::splat(Color::WHITE)
    }
}

impl DiscColors {
    pub fn splat(color: Color) -> Self {
        Self {
            inner_start: color,
            outer_start: color,
            inner_end: color,
            outer_end: color,
        }
    }

    /// Color at `radial` (0 inner, 1 outer) and `angular` (0 start, 1 end).
    pub fn sample(&self, mode: DiscColorMode, radial: f32, angular: f32) -> Color {
        match mode {
            DiscColorMode::Single => self.inner_start,
            DiscColorMode::Radial => self.inner_start.lerp(self.outer_start, radial),
            DiscColorMode::Angular => self.inner_start.lerp(self.inner_end, angular),
            DiscColorMode::Bilinear => Color::bilinear(
                self.inner_start,
                self.outer_start,
                self.inner_end,
                self.outer_end,
                angular,
                radial,
            ),
        }
    }
}

pub mod fields {
    use super::*;

    pub const KIND: FieldDescriptor = FieldDescriptor::new(
        "kind",
        "Type",
        FieldKind::Enum(&["Disc", "Pie", "Ring", "Arc"]),
        UpdateKind::Geometry,
    );
    pub const RADIUS: FieldDescriptor = FieldDescriptor::new("radius", "Radius", FieldKind::Float, UpdateKind::Geometry);
    pub const RADIUS_SPACE: FieldDescriptor = FieldDescriptor::new(
        "radius_space",
        "Radius Space",
        FieldKind::Enum(&["Meters", "Pixels", "Noots"]),
        UpdateKind::Material,
    );
    pub const THICKNESS: FieldDescriptor =
        FieldDescriptor::new("thickness", "Thickness", FieldKind::Float, UpdateKind::Material);
    pub const THICKNESS_SPACE: FieldDescriptor = FieldDescriptor::new(
        "thickness_space",
        "Thickness Space",
        FieldKind::Enum(&["Meters", "Pixels", "Noots"]),
        UpdateKind::Material,
    );
    pub const ANGLE_START: FieldDescriptor =
        FieldDescriptor::new("angle_start", "Angle start", FieldKind::Angle, UpdateKind::Geometry);
    pub const ANGLE_END: FieldDescriptor =
        FieldDescriptor::new("angle_end", "Angle end", FieldKind::Angle, UpdateKind::Geometry);
    pub const ARC_END_CAPS: FieldDescriptor = FieldDescriptor::new(
        "arc_end_caps",
        "Round Caps",
        FieldKind::Enum(&["None", "Round"]),
        UpdateKind::Geometry,
    );
    pub const COLOR_MODE: FieldDescriptor = FieldDescriptor::new(
        "color_mode",
        "Color Mode",
        FieldKind::Enum(&["Single", "Radial", "Angular", "Bilinear"]),
        UpdateKind::Geometry,
    );
    pub const COLORS: FieldDescriptor = FieldDescriptor::new("colors", "Colors", FieldKind::Color, UpdateKind::Geometry);
}

pub static DISC_SCHEMA: ShapeSchema = ShapeSchema {
    shape: "Disc",
    fields: &[
        fields::KIND,
        fields::RADIUS,
        fields::RADIUS_SPACE,
        fields::THICKNESS,
        fields::THICKNESS_SPACE,
        fields::ANGLE_START,
        fields::ANGLE_END,
        fields::ARC_END_CAPS,
        fields::COLOR_MODE,
        fields::COLORS,
        dash::fields::DASHED,
        dash::fields::DASH_STYLE,
        dash::fields::MATCH_DASH_SPACING_TO_SIZE,
    ],
};

/// Discs, pies, rings and arcs in the local XY plane.
///
/// Fills bake their radius into the vertices. Rings and arcs place their
/// vertices on the circle of `radius` and extrude across it, so the ring
/// thickness is a uniform just like a polyline's.
///
/// Vertex positions are in `radius_space` units; the `_RadiusSpace` uniform
/// scales them to world units, so switching a disc to pixels does not
/// rebuild its mesh.
#[derive(Debug, Clone)]
pub struct Disc {
    base: ShapeBase,
    kind: DiscKind,
    radius: f32,
    radius_space: ThicknessSpace,
    thickness: f32,
    thickness_space: ThicknessSpace,
    angle_start: f32,
    angle_end: f32,
    arc_end_caps: ArcEndCap,
    color_mode: DiscColorMode,
    colors: DiscColors,
    dashes: Dashes,
    mesh: TessellatedMesh<ShapeVertex>,
}

impl Default for Disc {
    fn default() -> Self {
        Self::new(DiscKind::Disc, 1.0)
    }
}

impl Disc {
    pub fn new(kind: DiscKind, radius: f32) -> Self {
        Self {
            base: ShapeBase::new(),
            kind,
            radius: radius.max(0.0),
            radius_space: ThicknessSpace::default(),
            thickness: 0.5,
            thickness_space: ThicknessSpace::default(),
            angle_start: 0.0,
            angle_end: FRAC_PI_2,
            arc_end_caps: ArcEndCap::default(),
            color_mode: DiscColorMode::default(),
            colors: DiscColors::default(),
            dashes: Dashes::default(),
            mesh: TessellatedMesh::new(),
        }
    }

    pub fn kind(&self) -> DiscKind {
        self.kind
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn radius_space(&self) -> ThicknessSpace {
        self.radius_space
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn thickness_space(&self) -> ThicknessSpace {
        self.thickness_space
    }

    pub fn angles(&self) -> (f32, f32) {
        (self.angle_start, self.angle_end)
    }

    pub fn arc_end_caps(&self) -> ArcEndCap {
        self.arc_end_caps
    }

    pub fn color_mode(&self) -> DiscColorMode {
        self.color_mode
    }

    pub fn colors(&self) -> DiscColors {
        self.colors
    }

    pub fn dashes(&self) -> Dashes {
        self.dashes
    }

    pub fn mesh(&self) -> &TessellatedMesh<ShapeVertex> {
        &self.mesh
    }

    pub fn set_kind(&mut self, kind: DiscKind) -> bool {
        fields::KIND.assign(self.base.dirty_mut(), &mut self.kind, kind)
    }

    pub fn set_radius(&mut self, radius: f32) -> bool {
        fields::RADIUS.assign(self.base.dirty_mut(), &mut self.radius, radius.max(0.0))
    }

    pub fn set_radius_space(&mut self, space: ThicknessSpace) -> bool {
        fields::RADIUS_SPACE.assign(self.base.dirty_mut(), &mut self.radius_space, space)
    }

    pub fn set_thickness(&mut self, thickness: f32) -> bool {
        fields::THICKNESS.assign(self.base.dirty_mut(), &mut self.thickness, thickness.max(0.0))
    }

    pub fn set_thickness_space(&mut self, space: ThicknessSpace) -> bool {
        fields::THICKNESS_SPACE.assign(self.base.dirty_mut(), &mut self.thickness_space, space)
    }

    pub fn set_angle_start(&mut self, radians: f32) -> bool {
        fields::ANGLE_START.assign(self.base.dirty_mut(), &mut self.angle_start, radians)
    }

    pub fn set_angle_end(&mut self, radians: f32) -> bool {
        fields::ANGLE_END.assign(self.base.dirty_mut(), &mut self.angle_end, radians)
    }

    pub fn set_arc_end_caps(&mut self, caps: ArcEndCap) -> bool {
        fields::ARC_END_CAPS.assign(self.base.dirty_mut(), &mut self.arc_end_caps, caps)
    }

    pub fn set_color_mode(&mut self, mode: DiscColorMode) -> bool {
        fields::COLOR_MODE.assign(self.base.dirty_mut(), &mut self.color_mode, mode)
    }

    pub fn set_colors(&mut self, colors: DiscColors) -> bool {
        fields::COLORS.assign(self.base.dirty_mut(), &mut self.colors, colors)
    }

    /// Dashes apply to rings and arcs; fills ignore them.
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

    /// Start angle and signed sweep actually drawn, at most one full turn.
    fn sweep(&self) -> (f32, f32) {
        if self.kind.has_sector() {
            (self.angle_start, (self.angle_end - self.angle_start).clamp(-TAU, TAU))
        } else {
            (0.0, TAU)
        }
    }

    fn covers_area(&self, sweep: f32) -> bool {
        let empty_sweep = sweep == 0.0 || sweep.is_nan();
        !empty_sweep && (self.kind.has_thickness() || self.radius > 0.0)
    }

    fn build_fill(&mut self, start: f32, sweep: f32, segments: u32) {
        for k in 0..=segments {
            let t = k as f32 / segments as f32;
            let direction = radial(start + sweep * t);
            let inner = self.colors.sample(self.color_mode, 0.0, t);
            let outer = self.colors.sample(self.color_mode, 1.0, t);
            self.mesh.vertices.push(ShapeVertex::fixed(Vec3::ZERO, inner, 0.0));
            self.mesh
                .vertices
                .push(ShapeVertex::fixed(direction * self.radius, outer, 1.0));
        }
        self.push_slices(segments, sweep, false);
    }

    fn build_ring(&mut self, start: f32, sweep: f32, segments: u32, config: &MeshGenConfig) {
        let scale = config.extrusion_scale();
        for k in 0..=segments {
            let t = k as f32 / segments as f32;
            let direction = radial(start + sweep * t);
            let center = direction * self.radius;
            let inner = self.colors.sample(self.color_mode, 0.0, t);
            let outer = self.colors.sample(self.color_mode, 1.0, t);
            self.mesh
                .vertices
                .push(ShapeVertex::extruded(center, -direction * scale, inner, 1.0, -scale));
            self.mesh
                .vertices
                .push(ShapeVertex::extruded(center, direction * scale, outer, 1.0, scale));
        }
        self.push_slices(segments, sweep, true);

        if self.kind == DiscKind::Arc && self.arc_end_caps == ArcEndCap::Round {
            let forward = sweep.signum();
            let segments = config.round_segments(PI);
            let ends = [(start, -forward, 0.0), (start + sweep, forward, 1.0)];
            for (angle, away, t) in ends {
                let direction = radial(angle);
                let arc = FanArc {
                    from: direction,
                    toward: tangent(angle) * away,
                    angle: PI,
                    segments,
                    facing: Vec3::Z,
                };
                let style = ExtrudeStyle {
                    color: self.colors.sample(self.color_mode, 0.5, t),
                    thickness: 1.0,
                    scale,
                };
                emit_round_fan(&mut self.mesh, direction * self.radius, &arc, &style);
            }
        }
    }

    /// Index the `(inner, outer)` vertex pairs pushed by the builders.
    fn push_slices(&mut self, segments: u32, sweep: f32, quads: bool) {
        let flip = sweep < 0.0;
        let mut push = |a, b, c| {
            if flip {
                self.mesh.push_triangle(a, c, b);
            } else {
                self.mesh.push_triangle(a, b, c);
            }
        };
        for k in 0..segments {
            let inner = 2 * k;
            let outer = inner + 1;
            push(inner, outer, inner + 3);
            if quads {
                push(inner, inner + 3, inner + 2);
            }
        }
    }
}

fn radial(angle: f32) -> Vec3 {
    Vec3::new(angle.cos(), angle.sin(), 0.0)
}

fn tangent(angle: f32) -> Vec3 {
    Vec3::new(-angle.sin(), angle.cos(), 0.0)
}

impl Renderable for Disc {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn schema(&self) -> &'static ShapeSchema {
        &DISC_SCHEMA
    }

    fn rebuild_mesh(&mut self, config: &MeshGenConfig) {
        self.mesh.clear();

        let (start, sweep) = self.sweep();
        if !self.covers_area(sweep) {
            tracing::trace!("Disc {:?} covers no area", self.base.id());
            return;
        }

        let segments = config.disc_segments(sweep);
        if self.kind.has_thickness() {
            self.build_ring(start, sweep, segments, config);
        } else {
            self.build_fill(start, sweep, segments);
        }
    }

    fn submeshes(&self) -> Vec<SubmeshView<'_>> {
        vec![SubmeshView {
            material: MaterialKind::Disc,
            mesh: &self.mesh,
        }]
    }

    /// Bounds of the full circle, grown by half the ring thickness.
    fn bounds(&self, metrics: &ScreenMetrics) -> Option<Aabb> {
        if !self.covers_area(self.sweep().1) {
            return None;
        }
        let radius = self.radius_space.to_world(self.radius, metrics);
        let reach = if self.kind.has_thickness() {
            radius + 0.5 * self.thickness_space.to_world(self.thickness, metrics)
        } else {
            radius
        };
        Some(Aabb::from_center_size(
            Vec3::ZERO,
            Vec3::new(2.0 * reach, 2.0 * reach, 0.0),
        ))
    }

    fn material_parameters(&self, table: &PropertyTable, config: &MeshGenConfig) -> Vec<ParameterBinding> {
        let mut bindings = StrokeUniforms {
            thickness: self.thickness,
            thickness_space: self.thickness_space,
            geometry: GeometryMode::Flat2D,
        }
        .bindings(&self.base, table, config);
        bindings.push(ParameterBinding::new(
            table.id(ShapeProperty::RadiusSpace),
            MaterialParameter::Int(self.radius_space.shader_index()),
        ));
        bindings.extend(self.dashes.bindings(table));
        bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generated(disc: &mut Disc) -> &TessellatedMesh<ShapeVertex> {
        disc.regenerate(&MeshGenConfig::default());
        disc.mesh()
    }

    #[test]
    fn test_full_disc_uses_disc_resolution() {
        let mut disc = Disc::default();
        assert_eq!(generated(&mut disc).triangle_count(), 64);
    }

    #[test]
    fn test_ring_thickness_is_a_uniform() {
        let mut disc = Disc::new(DiscKind::Ring, 2.0);
        assert_eq!(generated(&mut disc).triangle_count(), 128);
        disc.mark_properties_synced();
        disc.set_thickness(1.0);
        assert!(!disc.is_dirty());
        disc.set_radius(3.0);
        assert!(disc.is_dirty());
    }

    #[test]
    fn test_arc_round_caps() {
        let mut disc = Disc::new(DiscKind::Arc, 1.0);
        disc.set_angle_end(PI);
        let plain = generated(&mut disc).triangle_count();
        assert_eq!(plain, 64);

        disc.set_arc_end_caps(ArcEndCap::Round);
        let capped = generated(&mut disc).triangle_count();
        assert_eq!(capped, plain + 2 * 16);
    }

    #[test]
    fn test_color_modes() {
        let colors = DiscColors {
            inner_start: Color::RED,
            outer_start: Color::GREEN,
            inner_end: Color::BLUE,
            outer_end: Color::WHITE,
        };
        assert_eq!(colors.sample(DiscColorMode::Single, 1.0, 1.0), Color::RED);
        assert_eq!(colors.sample(DiscColorMode::Radial, 1.0, 0.0), Color::GREEN);
        assert_eq!(colors.sample(DiscColorMode::Angular, 0.0, 1.0), Color::BLUE);
        assert_eq!(colors.sample(DiscColorMode::Bilinear, 1.0, 1.0), Color::WHITE);
    }

    #[test]
    fn test_radial_colors_reach_the_rim() {
        let mut disc = Disc::default();
        disc.set_color_mode(DiscColorMode::Radial);
        disc.set_colors(DiscColors {
            outer_start: Color::BLUE,
            ..DiscColors::splat(Color::RED)
        });
        let mesh = generated(&mut disc);
        assert_eq!(mesh.vertices[0].color, Color::RED.to_array());
        assert_eq!(mesh.vertices[1].color, Color::BLUE.to_array());
    }

    #[test]
    fn test_empty_pie() {
        let mut disc = Disc::new(DiscKind::Pie, 1.0);
        disc.set_angle_end(0.0);
        assert!(generated(&mut disc).is_empty());
        assert_eq!(disc.bounds(&ScreenMetrics::default()), None);
    }

    #[test]
    fn test_huge_sweep_is_one_turn() {
        let mut disc = Disc::new(DiscKind::Arc, 1.0);
        disc.set_angle_end(1.0e7);
        assert_eq!(generated(&mut disc).triangle_count(), 128);

        disc.set_angle_end(-1.0e7);
        assert_eq!(generated(&mut disc).triangle_count(), 128);

        disc.set_angle_end(f32::NAN);
        assert!(generated(&mut disc).is_empty());
    }

    #[test]
    fn test_bounds() {
        let ring = Disc::new(DiscKind::Ring, 2.0);
        let bounds = ring.bounds(&ScreenMetrics::default()).unwrap();
        assert_eq!(bounds.max, Vec3::new(2.25, 2.25, 0.0));
        let fill = Disc::new(DiscKind::Disc, 2.0);
        assert_eq!(fill.bounds(&ScreenMetrics::default()).unwrap().min, Vec3::new(-2.0, -2.0, 0.0));
    }

    #[test]
    fn test_radius_space_scales_bounds_not_mesh() {
        let mut disc = Disc::new(DiscKind::Disc, 20.0);
        generated(&mut disc);
        disc.mark_properties_synced();

        assert!(disc.set_radius_space(ThicknessSpace::Pixels));
        assert!(!disc.is_dirty());
        assert!(disc.properties_dirty());

        let metrics = ScreenMetrics::new(0.05, 800.0);
        let bounds = disc.bounds(&metrics).unwrap();
        assert_eq!(bounds.max, Vec3::new(1.0, 1.0, 0.0));

        let table = PropertyTable::sequential();
        let bindings = disc.material_parameters(&table, &MeshGenConfig::default());
        let radius_space = table.id(ShapeProperty::RadiusSpace);
        assert!(bindings.contains(&ParameterBinding::new(radius_space, MaterialParameter::Int(1))));
    }

    #[test]
    fn test_dashed_ring_keeps_its_mesh() {
        let mut disc = Disc::new(DiscKind::Ring, 2.0);
        generated(&mut disc);
        disc.mark_properties_synced();

        disc.set_dashed(true);
        disc.set_dash_style(DashStyle::new(1.0, 3.0));
        assert!(!disc.is_dirty());

        let table = PropertyTable::sequential();
        let bindings = disc.material_parameters(&table, &MeshGenConfig::default());
        let dash_size = table.id(ShapeProperty::DashSize);
        assert!(bindings.contains(&ParameterBinding::new(dash_size, MaterialParameter::Float(1.0))));
        assert_eq!(DISC_SCHEMA.field("radius_space").unwrap().update, UpdateKind::Material);
    }
}
