//! Tunables for mesh generation.

use glam::Vec3;

/// Settings shared by every shape mesh generator.
///
/// All lengths are in units of the local half-thickness so the mesh never
/// has to be rebuilt when only the global thickness changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshGenConfig {
    /// Extra extrusion beyond the true edge, as a fraction of the half-thickness.
    /// The material fades coverage between `|side| = 1` and `|side| = 1 + aa_margin`.
    pub aa_margin: f32,
    /// Longest allowed miter, in half-thicknesses. Never below 1.
    pub miter_limit: f32,
    /// Fan segments per full turn for round joins and caps.
    pub round_join_resolution: u32,
    /// Segments per full turn for discs and rings.
    pub disc_resolution: u32,
    /// Minimum `|up × tangent|` for the up-derived frame of a 3D segment.
    /// Segments closer to the up axis inherit the previous segment's frame.
    pub frame_alignment_threshold: f32,
    /// Up reference for oriented 3D polylines. `None` estimates it from the points.
    pub up_reference: Option<Vec3>,
}

impl Default for MeshGenConfig {
    fn default() -> Self {
        Self {
            aa_margin: 0.1,
            miter_limit: 4.0,
            round_join_resolution: 32,
            disc_resolution: 64,
            frame_alignment_threshold: 1e-3,
            up_reference: None,
        }
    }
}

impl MeshGenConfig {
    /// Upper bound for both resolutions.
    pub const MAX_RESOLUTION: u32 = 4096;

    /// Set the antialiasing margin.
    pub fn with_aa_margin(mut self, margin: f32) -> Self {
        self.aa_margin = margin.max(0.0);
        self
    }

    /// Set the miter limit.
    pub fn with_miter_limit(mut self, limit: f32) -> Self {
        self.miter_limit = limit.max(1.0);
        self
    }

    /// Set the round join resolution.
    pub fn with_round_join_resolution(mut self, segments: u32) -> Self {
        self.round_join_resolution = segments.clamp(3, Self::MAX_RESOLUTION);
        self
    }

    /// Set the disc resolution.
    pub fn with_disc_resolution(mut self, segments: u32) -> Self {
        self.disc_resolution = segments.clamp(3, Self::MAX_RESOLUTION);
        self
    }

    /// Set the frame alignment threshold.
    pub fn with_frame_alignment_threshold(mut self, threshold: f32) -> Self {
        self.frame_alignment_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Use a fixed up reference for oriented 3D polylines.
    pub fn with_up_reference(mut self, up: Vec3) -> Self {
        self.up_reference = Some(up);
        self
    }

    /// Multiplier applied to every extrusion offset.
    #[inline]
    pub fn extrusion_scale(&self) -> f32 {
        1.0 + self.aa_margin
    }

    /// Fan segments for an arc spanning `angle` radians.
    ///
    /// Arcs beyond a full turn get the segments of one turn.
    pub fn round_segments(&self, angle: f32) -> u32 {
        arc_segments(angle, self.round_join_resolution)
    }

    /// Segments for a disc arc spanning `angle` radians.
    pub fn disc_segments(&self, angle: f32) -> u32 {
        arc_segments(angle, self.disc_resolution)
    }
}

fn arc_segments(angle: f32, per_turn: u32) -> u32 {
    if angle.is_nan() {
        return 1;
    }
    let turns = (angle.abs() / std::f32::consts::TAU).min(1.0);
    let per_turn = per_turn.clamp(3, MeshGenConfig::MAX_RESOLUTION);
    ((turns * per_turn as f32).ceil() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    #[test]
    fn test_setters_clamp() {
        let config = MeshGenConfig::default()
            .with_miter_limit(0.25)
            .with_aa_margin(-1.0)
            .with_round_join_resolution(0);
        assert_eq!(config.miter_limit, 1.0);
        assert_eq!(config.aa_margin, 0.0);
        assert_eq!(config.round_join_resolution, 3);
    }

    #[test]
    fn test_arc_segments() {
        let config = MeshGenConfig::default();
        assert_eq!(config.round_segments(TAU), 32);
        assert_eq!(config.round_segments(PI), 16);
        assert_eq!(config.round_segments(0.0), 1);
        assert_eq!(config.disc_segments(-TAU), 64);
    }

    #[test]
    fn test_arc_segments_are_bounded() {
        let config = MeshGenConfig::default();
        assert_eq!(config.disc_segments(1.0e7), 64);
        assert_eq!(config.round_segments(f32::INFINITY), 32);
        assert_eq!(config.disc_segments(f32::NAN), 1);

        let fine = MeshGenConfig::default().with_disc_resolution(u32::MAX);
        assert_eq!(fine.disc_resolution, MeshGenConfig::MAX_RESOLUTION);

        // Fields are public, so the cap also holds without the builder.
        let raw = MeshGenConfig {
            disc_resolution: u32::MAX,
            ..MeshGenConfig::default()
        };
        assert_eq!(raw.disc_segments(TAU), MeshGenConfig::MAX_RESOLUTION);
    }
}
