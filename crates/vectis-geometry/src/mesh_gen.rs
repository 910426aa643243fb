//! Polyline mesh generation.
//!
//! The generator turns a [`PolylineSnapshot`] into a [`PolylineMesh`]: a strip
//! of one quad per segment plus, for `Round` and `Bevel` joins, a second mesh
//! filling the outer corners.
//!
//! Vertices stay on the centerline and carry their extrusion separately (see
//! [`ShapeVertex`]), so changing the polyline's thickness never requires a new
//! mesh.
//!
//! # Example
//!
//! ```
//! use vectis_geometry::{
//!     GeometryMode, MeshGenConfig, PolylineJoins, PolylinePoint, PolylineSnapshot,
//!     generate_polyline_mesh,
//! };
//! use glam::Vec3;
//!
//! let points = [
//!     PolylinePoint::new(Vec3::ZERO),
//!     PolylinePoint::new(Vec3::X),
//!     PolylinePoint::new(Vec3::new(1.0, 1.0, 0.0)),
//! ];
//! let snapshot = PolylineSnapshot {
//!     points: &points,
//!     closed: false,
//!     joins: PolylineJoins::Round,
//!     geometry: GeometryMode::Flat2D,
//! };
//! let mesh = generate_polyline_mesh(&snapshot, &MeshGenConfig::default());
//! assert_eq!(mesh.strip.index_count(), 12);
//! assert!(!mesh.joins.is_empty());
//! ```

use crate::frame::{FrameBuilder, GeometryMode};
use crate::joins::{ExtrudeStyle, Joint, PolylineJoins, emit_join, miter_offset};
use crate::{MeshGenConfig, PolylinePoint, ShapeVertex, TessellatedMesh};
use glam::Vec3;
use vectis_core::math::try_normalize;
use vectis_core::profiling::profile_function;

/// Read-only view of everything the generator needs.
#[derive(Debug, Clone, Copy)]
pub struct PolylineSnapshot<'a> {
    pub points: &'a [PolylinePoint],
    pub closed: bool,
    pub joins: PolylineJoins,
    pub geometry: GeometryMode,
}

impl PolylineSnapshot<'_> {
    /// Number of segments before degenerate ones are dropped.
    pub fn segment_count(&self) -> usize {
        match self.points.len() {
            0 | 1 => 0,
            n if self.closed => n,
            n => n - 1,
        }
    }
}

/// Generated polyline geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolylineMesh {
    /// One quad per segment.
    pub strip: TessellatedMesh<ShapeVertex>,
    /// Round/bevel corner fill. Always empty for `None` and `Miter`.
    pub joins: TessellatedMesh<ShapeVertex>,
}

impl PolylineMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.strip.is_empty() && self.joins.is_empty()
    }

    pub fn clear(&mut self) {
        self.strip.clear();
        self.joins.clear();
    }

    /// World positions of every strip vertex followed by every join vertex.
    pub fn resolve_positions(&self, half_thickness: f32) -> Vec<Vec3> {
        self.strip
            .vertices
            .iter()
            .chain(&self.joins.vertices)
            .map(|v| v.resolve(half_thickness))
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    start: usize,
    end: usize,
    tangent: Vec3,
    side: Vec3,
}

/// Generate a new mesh.
pub fn generate_polyline_mesh(snapshot: &PolylineSnapshot<'_>, config: &MeshGenConfig) -> PolylineMesh {
    let mut mesh = PolylineMesh::new();
    generate_polyline_mesh_into(snapshot, config, &mut mesh);
    mesh
}

/// Generate into an existing mesh, reusing its allocations.
pub fn generate_polyline_mesh_into(
    snapshot: &PolylineSnapshot<'_>,
    config: &MeshGenConfig,
    out: &mut PolylineMesh,
) {
    profile_function!();
    out.clear();

    let points = snapshot.points;
    let segment_count = snapshot.segment_count();
    if segment_count == 0 {
        tracing::trace!("Polyline with {} point(s) has nothing to draw", points.len());
        return;
    }

    let positions: Vec<Vec3> = points.iter().map(|p| snapshot.geometry.project(p.position)).collect();
    let mut frames = FrameBuilder::new(snapshot.geometry, &positions, config);

    let mut segments = Vec::with_capacity(segment_count);
    for start in 0..segment_count {
        let end = (start + 1) % points.len();
        let Some(tangent) = try_normalize(positions[end] - positions[start]) else {
            continue;
        };
        let side = frames.next_side(tangent);
        segments.push(Segment {
            start,
            end,
            tangent,
            side,
        });
    }

    if segments.len() < segment_count {
        tracing::trace!(
            "Skipped {} zero-length polyline segment(s)",
            segment_count - segments.len()
        );
    }
    if segments.is_empty() {
        return;
    }

    // Joint k sits between segments k and k + 1, wrapping when closed.
    let joint_count = if snapshot.closed && segments.len() >= 2 {
        segments.len()
    } else {
        segments.len() - 1
    };

    let mut end_offsets: Vec<Vec3> = segments.iter().map(|s| s.side).collect();
    let mut start_offsets = end_offsets.clone();

    if snapshot.joins == PolylineJoins::Miter {
        for k in 0..joint_count {
            let next = (k + 1) % segments.len();
            if let Some(miter) = miter_offset(segments[k].side, segments[next].side, config.miter_limit) {
                end_offsets[k] = miter.vector();
                start_offsets[next] = miter.vector();
            }
        }
    }

    let scale = config.extrusion_scale();
    out.strip.vertices.reserve(segments.len() * 4);
    out.strip.indices.reserve(segments.len() * 6);
    for (k, segment) in segments.iter().enumerate() {
        let start = &points[segment.start];
        let end = &points[segment.end];
        let start_pos = positions[segment.start];
        let end_pos = positions[segment.end];
        let start_offset = start_offsets[k] * scale;
        let end_offset = end_offsets[k] * scale;

        let base = out.strip.next_index();
        out.strip.vertices.extend_from_slice(&[
            ShapeVertex::extruded(start_pos, -start_offset, start.color, start.thickness, -scale),
            ShapeVertex::extruded(end_pos, -end_offset, end.color, end.thickness, -scale),
            ShapeVertex::extruded(end_pos, end_offset, end.color, end.thickness, scale),
            ShapeVertex::extruded(start_pos, start_offset, start.color, start.thickness, scale),
        ]);
        out.strip.push_triangle(base, base + 1, base + 2);
        out.strip.push_triangle(base, base + 2, base + 3);
    }

    if snapshot.joins.has_join_mesh() {
        for k in 0..joint_count {
            let incoming = &segments[k];
            let outgoing = &segments[(k + 1) % segments.len()];
            let point = &points[incoming.end];
            let joint = Joint {
                position: positions[incoming.end],
                tangent_in: incoming.tangent,
                side_in: incoming.side,
                tangent_out: outgoing.tangent,
                side_out: outgoing.side,
            };
            let style = ExtrudeStyle {
                color: point.color,
                thickness: point.thickness,
                scale,
            };
            emit_join(&mut out.joins, snapshot.joins, &joint, &style, config);
        }
    }

    tracing::trace!(
        "Generated polyline mesh: {} segment(s), {} strip vertices, {} join vertices",
        segments.len(),
        out.strip.vertex_count(),
        out.joins.vertex_count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(points: &[PolylinePoint], closed: bool, joins: PolylineJoins) -> PolylineSnapshot<'_> {
        PolylineSnapshot {
            points,
            closed,
            joins,
            geometry: GeometryMode::Flat2D,
        }
    }

    fn square() -> Vec<PolylinePoint> {
        [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]
        .into_iter()
        .map(PolylinePoint::new)
        .collect()
    }

    #[test]
    fn test_segment_count() {
        let points = square();
        assert_eq!(snapshot(&points, true, PolylineJoins::Miter).segment_count(), 4);
        assert_eq!(snapshot(&points, false, PolylineJoins::Miter).segment_count(), 3);
        assert_eq!(snapshot(&points[..1], true, PolylineJoins::Miter).segment_count(), 0);
    }

    #[test]
    fn test_open_strip_has_square_ends() {
        let points = square();
        let config = MeshGenConfig::default().with_aa_margin(0.0);
        let mesh = generate_polyline_mesh(&snapshot(&points, false, PolylineJoins::Miter), &config);
        assert_eq!(mesh.strip.vertex_count(), 12);
        // First vertex: start of the first segment, right side.
        assert_eq!(mesh.strip.vertices[0].offset, [0.0, -1.0, 0.0]);
        // Last segment's start sits on a mitered corner.
        let corner = Vec3::from_array(mesh.strip.vertices[11].offset);
        assert!((corner.length() - std::f32::consts::SQRT_2).abs() < 1e-5);
    }

    #[test]
    fn test_zero_length_segments_are_skipped() {
        let mut points = square();
        points.insert(1, points[1]);
        let mesh = generate_polyline_mesh(&snapshot(&points, false, PolylineJoins::None), &MeshGenConfig::default());
        assert_eq!(mesh.strip.index_count(), 18);

        let same = vec![PolylinePoint::new(Vec3::ONE); 3];
        let mesh = generate_polyline_mesh(&snapshot(&same, true, PolylineJoins::Round), &MeshGenConfig::default());
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_flat_mode_drops_z() {
        let points: Vec<_> = [Vec3::new(0.0, 0.0, 5.0), Vec3::new(1.0, 0.0, -3.0)]
            .into_iter()
            .map(PolylinePoint::new)
            .collect();
        let mesh = generate_polyline_mesh(&snapshot(&points, false, PolylineJoins::Miter), &MeshGenConfig::default());
        assert!(mesh.resolve_positions(0.5).iter().all(|p| p.z == 0.0));
    }

    #[test]
    fn test_reuses_buffers() {
        let points = square();
        let config = MeshGenConfig::default();
        let mut mesh = PolylineMesh::new();
        generate_polyline_mesh_into(&snapshot(&points, true, PolylineJoins::Bevel), &config, &mut mesh);
        let joins = mesh.joins.index_count();
        assert_eq!(joins, 12);
        generate_polyline_mesh_into(&snapshot(&points, true, PolylineJoins::Miter), &config, &mut mesh);
        assert!(mesh.joins.is_empty());
        assert_eq!(mesh.strip.index_count(), 24);
    }
}
