//! Join math for polyline corners, plus the round fan shared with caps.
//!
//! Miter joins are folded into the segment strip by moving the segment end
//! vertices along the miter direction. Round and bevel joins leave the strip
//! square and fill the wedge on the outer side of the corner with separate
//! geometry.

use crate::{MeshGenConfig, ShapeVertex, TessellatedMesh};
use glam::Vec3;
use std::f32::consts::PI;
use vectis_core::math::{GEOMETRIC_EPSILON, try_normalize};
use vectis_render::Color;

/// Corners closer to straight than this (in `|t_out · n_in|`) get no join geometry.
const STRAIGHT_TOLERANCE: f32 = 1e-5;

/// How consecutive polyline segments are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PolylineJoins {
    /// Segments overlap at corners; gaps on the outer side are accepted.
    None,
    /// Segment edges are extended until they meet.
    #[default]
    Miter,
    /// Outer corner filled with a circular fan.
    Round,
    /// Outer corner filled with a single triangle.
    Bevel,
}

impl PolylineJoins {
    /// Whether this style produces a separate join mesh.
    pub fn has_join_mesh(self) -> bool {
        matches!(self, PolylineJoins::Round | PolylineJoins::Bevel)
    }
}

/// Offset of a mitered corner, in half-thickness units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MiterOffset {
    /// Unit bisector of the two segment sides.
    pub direction: Vec3,
    /// Distance along `direction` to the corner, at least 1.
    pub length: f32,
}

impl MiterOffset {
    pub fn vector(&self) -> Vec3 {
        self.direction * self.length
    }

    /// How far the corner sticks out past a square segment end.
    pub fn extension(&self) -> f32 {
        self.length - 1.0
    }
}

/// Miter between two unit side vectors, clamped to `limit`.
///
/// Returns `None` when the sides are (nearly) opposite, i.e. the polyline
/// doubles back on itself and the miter would be unbounded.
pub fn miter_offset(side_in: Vec3, side_out: Vec3, limit: f32) -> Option<MiterOffset> {
    let direction = try_normalize(side_in + side_out)?;
    let cos_half = direction.dot(side_in);
    if cos_half <= GEOMETRIC_EPSILON {
        return None;
    }

    Some(MiterOffset {
        direction,
        length: (1.0 / cos_half).min(limit.max(1.0)),
    })
}

/// Attributes written to every extruded vertex of a fan or join.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ExtrudeStyle {
    pub color: Color,
    pub thickness: f32,
    /// `1 + aa_margin`
    pub scale: f32,
}

impl ExtrudeStyle {
    fn rim(&self, center: Vec3, direction: Vec3) -> ShapeVertex {
        ShapeVertex::extruded(center, direction * self.scale, self.color, self.thickness, self.scale)
    }

    fn hub(&self, center: Vec3) -> ShapeVertex {
        ShapeVertex::extruded(center, Vec3::ZERO, self.color, self.thickness, 0.0)
    }
}

/// Circular arc swept from `from` towards `toward` (both unit, orthogonal).
#[derive(Debug, Clone, Copy)]
pub(crate) struct FanArc {
    pub from: Vec3,
    pub toward: Vec3,
    pub angle: f32,
    pub segments: u32,
    /// Front face normal; triangles are wound counter-clockwise around it.
    pub facing: Vec3,
}

/// Emit a triangle fan around `center`. Returns the number of triangles.
pub(crate) fn emit_round_fan(
    mesh: &mut TessellatedMesh<ShapeVertex>,
    center: Vec3,
    arc: &FanArc,
    style: &ExtrudeStyle,
) -> u32 {
    let segments = arc.segments.max(1);
    let flip = arc.from.cross(arc.toward).dot(arc.facing) < 0.0;

    let hub = mesh.next_index();
    mesh.vertices.push(style.hub(center));
    for k in 0..=segments {
        let alpha = arc.angle * k as f32 / segments as f32;
        let direction = arc.from * alpha.cos() + arc.toward * alpha.sin();
        mesh.vertices.push(style.rim(center, direction));
    }

    for k in 0..segments {
        let a = hub + 1 + k;
        let b = a + 1;
        if flip {
            mesh.push_triangle(hub, b, a);
        } else {
            mesh.push_triangle(hub, a, b);
        }
    }

    segments
}

/// Two segments meeting at a point.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Joint {
    pub position: Vec3,
    pub tangent_in: Vec3,
    pub side_in: Vec3,
    pub tangent_out: Vec3,
    pub side_out: Vec3,
}

/// Fill the outer wedge of a corner for `Round` and `Bevel` joins.
///
/// Straight corners emit nothing. A full reversal gets a half fan for
/// `Round` and nothing for `Bevel` (the flat cut is the segment end itself).
/// Returns whether any geometry was emitted.
pub(crate) fn emit_join(
    mesh: &mut TessellatedMesh<ShapeVertex>,
    joins: PolylineJoins,
    joint: &Joint,
    style: &ExtrudeStyle,
    config: &MeshGenConfig,
) -> bool {
    if !joins.has_join_mesh() {
        return false;
    }

    let turn = joint.tangent_out.dot(joint.side_in);
    let reversal = turn.abs() < STRAIGHT_TOLERANCE && joint.tangent_in.dot(joint.tangent_out) < 0.0;
    if turn.abs() < STRAIGHT_TOLERANCE && !reversal {
        return false;
    }

    // Turning towards +side puts the gap on the -side.
    let outer = if turn > 0.0 && !reversal { -1.0 } else { 1.0 };
    let a = joint.side_in * outer;
    let b = joint.side_out * outer;
    let facing = joint.tangent_in.cross(joint.side_in);

    match joins {
        PolylineJoins::Bevel if reversal => false,
        PolylineJoins::Bevel => {
            let hub = mesh.next_index();
            mesh.vertices.push(style.hub(joint.position));
            mesh.vertices.push(style.rim(joint.position, a));
            mesh.vertices.push(style.rim(joint.position, b));
            if a.cross(b).dot(facing) >= 0.0 {
                mesh.push_triangle(hub, hub + 1, hub + 2);
            } else {
                mesh.push_triangle(hub, hub + 2, hub + 1);
            }
            true
        }
        PolylineJoins::Round => {
            let (toward, angle) = if reversal {
                (joint.tangent_in, PI)
            } else {
                let toward = try_normalize(b - a * a.dot(b)).unwrap_or(joint.tangent_in);
                (toward, a.dot(b).clamp(-1.0, 1.0).acos())
            };
            let arc = FanArc {
                from: a,
                toward,
                angle,
                segments: config.round_segments(angle),
                facing,
            };
            emit_round_fan(mesh, joint.position, &arc, style);
            true
        }
        PolylineJoins::None | PolylineJoins::Miter => false,
    }
}
