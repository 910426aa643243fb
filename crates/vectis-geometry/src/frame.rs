//! Side vectors for extruding segments.
//!
//! Every segment is extruded along a unit "side" vector perpendicular to its
//! tangent. In [`GeometryMode::Flat2D`] that is the 2D left normal. In
//! [`GeometryMode::Oriented3D`] it is `up × tangent`, with a fallback chain
//! for segments that run (almost) parallel to `up`:
//!
//! 1. the previous segment's side vector, parallel-transported onto the new
//!    tangent's normal plane,
//! 2. the previous binormal crossed with the new tangent,
//! 3. an arbitrary orthonormal vector (first segment only).
//!
//! The chain only looks backwards, so the result is deterministic for a given
//! point order.

use crate::MeshGenConfig;
use glam::Vec3;
use vectis_core::math::{newell_normal, project_onto_plane, try_normalize};

/// Alignment of generated geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeometryMode {
    /// Everything lies in the local XY plane (z = 0).
    #[default]
    Flat2D,
    /// Segments keep their 3D positions and are framed around an up reference.
    Oriented3D,
}

impl GeometryMode {
    /// Value pushed to the `_Alignment` uniform.
    pub fn shader_index(self) -> i32 {
        match self {
            GeometryMode::Flat2D => 0,
            GeometryMode::Oriented3D => 1,
        }
    }

    /// Position as it is used by the generators in this mode.
    #[inline]
    pub fn project(self, position: Vec3) -> Vec3 {
        match self {
            GeometryMode::Flat2D => position.truncate().extend(0.0),
            GeometryMode::Oriented3D => position,
        }
    }
}

/// Estimate an up reference from a point set.
///
/// Uses the polygon normal of the points, flipped to face +Z (then +Y, +X on
/// ties). Collinear or empty input gives +Z.
pub fn estimate_up(points: &[Vec3]) -> Vec3 {
    let Some(normal) = try_normalize(newell_normal(points)) else {
        return Vec3::Z;
    };

    let flip = if normal.z != 0.0 {
        normal.z < 0.0
    } else if normal.y != 0.0 {
        normal.y < 0.0
    } else {
        normal.x < 0.0
    };

    if flip { -normal } else { normal }
}

/// Hands out side vectors segment by segment.
#[derive(Debug, Clone)]
pub(crate) struct FrameBuilder {
    up: Vec3,
    threshold: f32,
    previous: Option<(Vec3, Vec3)>,
}

impl FrameBuilder {
    /// `points` must already be projected with [`GeometryMode::project`].
    pub fn new(mode: GeometryMode, points: &[Vec3], config: &MeshGenConfig) -> Self {
        let up = match mode {
            GeometryMode::Flat2D => Vec3::Z,
            GeometryMode::Oriented3D => config
                .up_reference
                .and_then(try_normalize)
                .unwrap_or_else(|| estimate_up(points)),
        };

        Self {
            up,
            threshold: config.frame_alignment_threshold,
            previous: None,
        }
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Side vector for the next segment, given its unit tangent.
    pub fn next_side(&mut self, tangent: Vec3) -> Vec3 {
        let candidate = self.up.cross(tangent);
        let side = if candidate.length() >= self.threshold {
            try_normalize(candidate)
        } else {
            None
        }
        .unwrap_or_else(|| self.inherited_side(tangent));

        self.previous = Some((tangent, side));
        side
    }

    fn inherited_side(&self, tangent: Vec3) -> Vec3 {
        let Some((prev_tangent, prev_side)) = self.previous else {
            return tangent.any_orthonormal_vector();
        };

        try_normalize(project_onto_plane(prev_side, tangent))
            .or_else(|| try_normalize(prev_tangent.cross(prev_side).cross(tangent)))
            .unwrap_or_else(|| tangent.any_orthonormal_vector())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_side_is_left_normal() {
        let mut frames = FrameBuilder::new(GeometryMode::Flat2D, &[], &MeshGenConfig::default());
        assert_eq!(frames.next_side(Vec3::X), Vec3::Y);
        assert_eq!(frames.next_side(Vec3::Y), -Vec3::X);
    }

    #[test]
    fn test_flat_projection_drops_z() {
        assert_eq!(
            GeometryMode::Flat2D.project(Vec3::new(1.0, 2.0, 3.0)),
            Vec3::new(1.0, 2.0, 0.0)
        );
        assert_eq!(
            GeometryMode::Oriented3D.project(Vec3::new(1.0, 2.0, 3.0)),
            Vec3::new(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn test_estimate_up_faces_positive_z() {
        let cw = [Vec3::ZERO, Vec3::Y, Vec3::X];
        assert_eq!(estimate_up(&cw), Vec3::Z);
        let ccw = [Vec3::ZERO, Vec3::X, Vec3::Y];
        assert_eq!(estimate_up(&ccw), Vec3::Z);
        assert_eq!(estimate_up(&[Vec3::ZERO, Vec3::X]), Vec3::Z);
    }

    #[test]
    fn test_segment_along_up_inherits_previous_side() {
        let config = MeshGenConfig::default().with_up_reference(Vec3::Z);
        let mut frames = FrameBuilder::new(GeometryMode::Oriented3D, &[], &config);
        let first = frames.next_side(Vec3::X);
        assert_eq!(first, Vec3::Y);

        // Straight up: up × tangent vanishes, the previous side is transported.
        let second = frames.next_side(Vec3::Z);
        assert!((second - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_side_stays_orthonormal_after_inheriting() {
        let config = MeshGenConfig::default().with_up_reference(Vec3::Z);
        let mut frames = FrameBuilder::new(GeometryMode::Oriented3D, &[], &config);
        frames.next_side(Vec3::X);
        let along_up = frames.next_side(Vec3::Z);
        let along_side = frames.next_side(along_up);
        assert!(along_side.dot(along_up).abs() < 1e-6);
        assert!((along_side.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_tangent_along_previous_side() {
        // A threshold of 1 rejects every up-derived side that is not exact.
        let config = MeshGenConfig::default()
            .with_up_reference(Vec3::Z)
            .with_frame_alignment_threshold(1.0);
        let mut frames = FrameBuilder::new(GeometryMode::Oriented3D, &[], &config);
        let diagonal = Vec3::new(1.0, 0.0, 1.0).normalize();
        let first = frames.next_side(diagonal);
        assert!(first.dot(diagonal).abs() < 1e-6);

        // Next tangent runs along the previous side.
        let second = frames.next_side(first);
        assert!(second.dot(first).abs() < 1e-5);
        assert!((second.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_first_segment_along_up_is_deterministic() {
        let config = MeshGenConfig::default().with_up_reference(Vec3::Z);
        let mut a = FrameBuilder::new(GeometryMode::Oriented3D, &[], &config);
        let mut b = FrameBuilder::new(GeometryMode::Oriented3D, &[], &config);
        let side = a.next_side(Vec3::Z);
        assert_eq!(side, b.next_side(Vec3::Z));
        assert!(side.dot(Vec3::Z).abs() < 1e-6);
    }
}
