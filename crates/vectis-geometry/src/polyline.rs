//! Polyline shape: an ordered point sequence drawn as a thick line.

use crate::mesh_gen::{PolylineMesh, PolylineSnapshot, generate_polyline_mesh_into};
use crate::renderable::{StrokeUniforms, SubmeshView};
use crate::schema::{FieldDescriptor, FieldKind, ShapeSchema, UpdateKind};
use crate::{
    GeometryMode, MeshGenConfig, PolylineJoins, PolylinePoint, Renderable, ScreenMetrics, ShapeBase, ShapeError,
    ShapeResult, ThicknessSpace,
};
use glam::{Vec2, Vec3};
use vectis_core::math::Aabb;
use vectis_render::{Color, MaterialKind, ParameterBinding, PropertyTable};

/// Field descriptors of [`Polyline`].
pub mod fields {
    use super::*;

    pub const POINTS: FieldDescriptor = FieldDescriptor::new("points", "Points", FieldKind::Points, UpdateKind::Geometry);
    pub const GEOMETRY: FieldDescriptor = FieldDescriptor::new(
        "geometry",
        "Geometry",
        FieldKind::Enum(&["Flat 2D", "Oriented 3D"]),
        UpdateKind::GeometryAndMaterial,
    );
    pub const JOINS: FieldDescriptor = FieldDescriptor::new(
        "joins",
        "Joins",
        FieldKind::Enum(&["None", "Miter", "Round", "Bevel"]),
        UpdateKind::Geometry,
    );
    pub const CLOSED: FieldDescriptor = FieldDescriptor::new("closed", "Closed", FieldKind::Bool, UpdateKind::Geometry);
    pub const THICKNESS: FieldDescriptor =
        FieldDescriptor::new("thickness", "Thickness", FieldKind::Float, UpdateKind::Material);
    pub const THICKNESS_SPACE: FieldDescriptor = FieldDescriptor::new(
        "thickness_space",
        "Thickness Space",
        FieldKind::Enum(&["Meters", "Pixels", "Noots"]),
        UpdateKind::Material,
    );
}

pub static POLYLINE_SCHEMA: ShapeSchema = ShapeSchema {
    shape: "Polyline",
    fields: &[
        fields::POINTS,
        fields::GEOMETRY,
        fields::JOINS,
        fields::CLOSED,
        fields::THICKNESS,
        fields::THICKNESS_SPACE,
    ],
};

/// A thick line through an ordered list of points.
///
/// Point edits and changes to joins, closedness or alignment make the mesh
/// stale. Thickness and thickness space are uniforms and never do.
///
/// ```
/// use vectis_geometry::{Polyline, PolylineJoins, Renderable};
/// use glam::Vec3;
///
/// let mut polyline = Polyline::new();
/// polyline.set_closed(false);
/// polyline.set_joins(PolylineJoins::Round);
/// polyline.append(Vec3::new(0.0, -2.0, 0.0).into());
/// assert_eq!(polyline.count(), 4);
/// assert!(polyline.is_dirty());
/// ```
#[derive(Debug, Clone)]
pub struct Polyline {
    base: ShapeBase,
    points: Vec<PolylinePoint>,
    geometry: GeometryMode,
    joins: PolylineJoins,
    closed: bool,
    thickness: f32,
    thickness_space: ThicknessSpace,
    mesh: PolylineMesh,
}

impl Default for Polyline {
    fn default() -> Self {
        Self::new()
    }
}

impl Polyline {
    pub const DEFAULT_THICKNESS: f32 = 0.125;

    /// A closed white triangle.
    pub fn new() -> Self {
        Self::from_points([
            PolylinePoint::new(Vec3::new(0.0, 1.0, 0.0)),
            PolylinePoint::new(Vec3::new(0.866, -0.5, 0.0)),
            PolylinePoint::new(Vec3::new(-0.866, -0.5, 0.0)),
        ])
    }

    /// A closed polyline through `points` with default settings.
    pub fn from_points(points: impl IntoIterator<Item = PolylinePoint>) -> Self {
        Self {
            base: ShapeBase::new(),
            points: points.into_iter().collect(),
            geometry: GeometryMode::default(),
            joins: PolylineJoins::default(),
            closed: true,
            thickness: Self::DEFAULT_THICKNESS,
            thickness_space: ThicknessSpace::default(),
            mesh: PolylineMesh::new(),
        }
    }

    // Point sequence

    pub fn count(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PolylinePoint] {
        &self.points
    }

    pub fn get(&self, index: usize) -> ShapeResult<PolylinePoint> {
        self.points.get(index).copied().ok_or(ShapeError::OutOfRange {
            index,
            count: self.points.len(),
        })
    }

    pub fn set(&mut self, index: usize, point: PolylinePoint) -> ShapeResult<()> {
        *self.point_mut(index)? = point;
        Ok(())
    }

    pub fn set_point_position(&mut self, index: usize, position: Vec3) -> ShapeResult<()> {
        self.point_mut(index)?.position = position;
        Ok(())
    }

    pub fn set_point_color(&mut self, index: usize, color: Color) -> ShapeResult<()> {
        self.point_mut(index)?.color = color;
        Ok(())
    }

    pub fn set_point_thickness(&mut self, index: usize, thickness: f32) -> ShapeResult<()> {
        self.point_mut(index)?.thickness = thickness.max(0.0);
        Ok(())
    }

    /// Replace every point.
    pub fn replace_all(&mut self, points: impl IntoIterator<Item = PolylinePoint>) {
        self.points.clear();
        self.points.extend(points);
        self.touch_points();
    }

    /// Replace every point from positions, optionally with a parallel color list.
    ///
    /// Points get unit thickness and, without colors, white. On
    /// [`ShapeError::LengthMismatch`] the current points are kept.
    pub fn replace_all_positions(&mut self, positions: &[Vec3], colors: Option<&[Color]>) -> ShapeResult<()> {
        check_colors(positions.len(), colors)?;
        self.points.clear();
        self.points.extend(positions.iter().enumerate().map(|(i, &position)| {
            let color = colors.map_or(Color::WHITE, |c| c[i]);
            PolylinePoint::new(position).with_color(color)
        }));
        self.touch_points();
        Ok(())
    }

    /// [`Polyline::replace_all_positions`] for 2D positions (z = 0).
    pub fn replace_all_positions_2d(&mut self, positions: &[Vec2], colors: Option<&[Color]>) -> ShapeResult<()> {
        check_colors(positions.len(), colors)?;
        self.points.clear();
        self.points.extend(positions.iter().enumerate().map(|(i, &position)| {
            let color = colors.map_or(Color::WHITE, |c| c[i]);
            PolylinePoint::from_2d(position).with_color(color)
        }));
        self.touch_points();
        Ok(())
    }

    pub fn append(&mut self, point: PolylinePoint) {
        self.points.push(point);
        self.touch_points();
    }

    pub fn append_range(&mut self, points: impl IntoIterator<Item = PolylinePoint>) {
        self.points.extend(points);
        self.touch_points();
    }

    pub fn add_point(&mut self, position: Vec3) {
        self.append(PolylinePoint::new(position));
    }

    pub fn add_point_colored(&mut self, position: Vec3, color: Color) {
        self.append(PolylinePoint::new(position).with_color(color));
    }

    pub fn add_point_thick(&mut self, position: Vec3, thickness: f32) {
        self.append(PolylinePoint::new(position).with_thickness(thickness));
    }

    pub fn add_point_with(&mut self, position: Vec3, color: Color, thickness: f32) {
        self.append(PolylinePoint::new(position).with_color(color).with_thickness(thickness));
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.touch_points();
    }

    fn point_mut(&mut self, index: usize) -> ShapeResult<&mut PolylinePoint> {
        let count = self.points.len();
        let point = self
            .points
            .get_mut(index)
            .ok_or(ShapeError::OutOfRange { index, count })?;
        fields::POINTS.touch(self.base.dirty_mut());
        Ok(point)
    }

    fn touch_points(&mut self) {
        fields::POINTS.touch(self.base.dirty_mut());
    }

    // Shape settings

    pub fn geometry(&self) -> GeometryMode {
        self.geometry
    }

    pub fn joins(&self) -> PolylineJoins {
        self.joins
    }

    pub fn closed(&self) -> bool {
        self.closed
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn thickness_space(&self) -> ThicknessSpace {
        self.thickness_space
    }

    /// Shape-wide tint multiplied with the point colors.
    pub fn color(&self) -> Color {
        self.base.tint()
    }

    pub fn set_geometry(&mut self, geometry: GeometryMode) -> bool {
        fields::GEOMETRY.assign(self.base.dirty_mut(), &mut self.geometry, geometry)
    }

    pub fn set_joins(&mut self, joins: PolylineJoins) -> bool {
        fields::JOINS.assign(self.base.dirty_mut(), &mut self.joins, joins)
    }

    pub fn set_closed(&mut self, closed: bool) -> bool {
        fields::CLOSED.assign(self.base.dirty_mut(), &mut self.closed, closed)
    }

    /// Negative values are clamped to zero.
    pub fn set_thickness(&mut self, thickness: f32) -> bool {
        fields::THICKNESS.assign(self.base.dirty_mut(), &mut self.thickness, thickness.max(0.0))
    }

    pub fn set_thickness_space(&mut self, space: ThicknessSpace) -> bool {
        fields::THICKNESS_SPACE.assign(self.base.dirty_mut(), &mut self.thickness_space, space)
    }

    pub fn set_color(&mut self, color: Color) -> bool {
        self.base.set_tint(color)
    }

    /// Input for the mesh generator.
    pub fn snapshot(&self) -> PolylineSnapshot<'_> {
        PolylineSnapshot {
            points: &self.points,
            closed: self.closed,
            joins: self.joins,
            geometry: self.geometry,
        }
    }

    /// Last generated mesh. Stale while [`Renderable::is_dirty`] is true.
    pub fn mesh(&self) -> &PolylineMesh {
        &self.mesh
    }

    fn uniforms(&self) -> StrokeUniforms {
        StrokeUniforms {
            thickness: self.thickness,
            thickness_space: self.thickness_space,
            geometry: self.geometry,
        }
    }
}

fn check_colors(points: usize, colors: Option<&[Color]>) -> ShapeResult<()> {
    match colors {
        Some(colors) if colors.len() != points => Err(ShapeError::LengthMismatch {
            points,
            colors: colors.len(),
        }),
        _ => Ok(()),
    }
}

impl Renderable for Polyline {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn schema(&self) -> &'static ShapeSchema {
        &POLYLINE_SCHEMA
    }

    fn rebuild_mesh(&mut self, config: &MeshGenConfig) {
        let snapshot = PolylineSnapshot {
            points: &self.points,
            closed: self.closed,
            joins: self.joins,
            geometry: self.geometry,
        };
        generate_polyline_mesh_into(&snapshot, config, &mut self.mesh);
        tracing::debug!(
            "Regenerated polyline {:?}: {} points, {} strip indices, {} join indices",
            self.base.id(),
            self.points.len(),
            self.mesh.strip.index_count(),
            self.mesh.joins.index_count()
        );
    }

    fn submeshes(&self) -> Vec<SubmeshView<'_>> {
        let mut views = vec![SubmeshView {
            material: MaterialKind::Polyline,
            mesh: &self.mesh.strip,
        }];
        if self.joins.has_join_mesh() {
            views.push(SubmeshView {
                material: MaterialKind::PolylineJoins,
                mesh: &self.mesh.joins,
            });
        }
        views
    }

    /// Box around the points, grown by half the thickest point.
    ///
    /// Fewer than two points draw nothing.
    fn bounds(&self, metrics: &ScreenMetrics) -> Option<Aabb> {
        if self.points.len() < 2 {
            return None;
        }

        let positions = self.points.iter().map(|p| self.geometry.project(p.position));
        let bounds = Aabb::from_points(positions)?;

        let max_point_thickness = self.points.iter().fold(0.0f32, |max, p| max.max(p.thickness));
        let world = self.thickness_space.to_world(self.thickness, metrics);
        Some(bounds.expanded(0.5 * world * max_point_thickness))
    }

    fn material_parameters(&self, table: &PropertyTable, config: &MeshGenConfig) -> Vec<ParameterBinding> {
        self.uniforms().bindings(&self.base, table, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShapeDirtyFlags;

    fn clean(mut polyline: Polyline) -> Polyline {
        polyline.regenerate(&MeshGenConfig::default());
        polyline.mark_properties_synced();
        polyline
    }

    #[test]
    fn test_defaults() {
        let polyline = Polyline::new();
        assert_eq!(polyline.count(), 3);
        assert!(polyline.closed());
        assert_eq!(polyline.joins(), PolylineJoins::Miter);
        assert_eq!(polyline.thickness(), 0.125);
        assert_eq!(polyline.thickness_space(), ThicknessSpace::Meters);
        assert_eq!(polyline.dirty_flags(), ShapeDirtyFlags::all());
    }

    #[test]
    fn test_out_of_range() {
        let mut polyline = clean(Polyline::new());
        assert_eq!(
            polyline.set_point_color(3, Color::RED),
            Err(ShapeError::OutOfRange { index: 3, count: 3 })
        );
        assert!(polyline.get(7).is_err());
        assert!(!polyline.is_dirty());
    }

    #[test]
    fn test_partial_mutators_keep_other_fields() {
        let mut polyline = clean(Polyline::new());
        polyline.set_point_thickness(1, 2.5).unwrap();
        polyline.set_point_color(1, Color::GREEN).unwrap();
        let point = polyline.get(1).unwrap();
        assert_eq!(point.position, Vec3::new(0.866, -0.5, 0.0));
        assert_eq!(point.color, Color::GREEN);
        assert_eq!(point.thickness, 2.5);
        assert!(polyline.is_dirty());
    }

    #[test]
    fn test_uniform_fields_do_not_dirty_mesh() {
        let mut polyline = clean(Polyline::new());
        assert!(polyline.set_thickness(0.5));
        assert!(polyline.set_thickness_space(ThicknessSpace::Pixels));
        assert!(polyline.set_color(Color::RED));
        assert!(!polyline.is_dirty());
        assert!(polyline.properties_dirty());

        assert!(polyline.set_geometry(GeometryMode::Oriented3D));
        assert!(polyline.is_dirty());
    }

    #[test]
    fn test_negative_thickness_clamped() {
        let mut polyline = Polyline::new();
        polyline.set_thickness(-1.0);
        assert_eq!(polyline.thickness(), 0.0);
    }

    #[test]
    fn test_bounds_grow_with_thickest_point() {
        let mut polyline = Polyline::from_points([
            PolylinePoint::new(Vec3::ZERO),
            PolylinePoint::new(Vec3::new(2.0, 0.0, 0.0)).with_thickness(4.0),
        ]);
        polyline.set_thickness(1.0);
        let bounds = polyline.bounds(&ScreenMetrics::default()).unwrap();
        assert_eq!(bounds.min, Vec3::new(-2.0, -2.0, -2.0));
        assert_eq!(bounds.max, Vec3::new(4.0, 2.0, 2.0));

        polyline.replace_all([PolylinePoint::new(Vec3::ONE)]);
        assert_eq!(polyline.bounds(&ScreenMetrics::default()), None);
    }

    #[test]
    fn test_join_submesh_only_for_round_and_bevel() {
        let mut polyline = Polyline::new();
        assert_eq!(polyline.submeshes().len(), 1);
        polyline.set_joins(PolylineJoins::Bevel);
        let materials: Vec<_> = polyline.submeshes().iter().map(|s| s.material).collect();
        assert_eq!(materials, vec![MaterialKind::Polyline, MaterialKind::PolylineJoins]);
    }
}
