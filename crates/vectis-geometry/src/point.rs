use glam::{Vec2, Vec3};
use vectis_render::Color;

/// One vertex of a polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolylinePoint {
    pub position: Vec3,
    pub color: Color,
    /// Multiplier on the polyline's thickness.
    pub thickness: f32,
}

impl Default for PolylinePoint {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl PolylinePoint {
    /// White point with unit thickness.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            color: Color::WHITE,
            thickness: 1.0,
        }
    }

    pub fn from_2d(position: Vec2) -> Self {
        Self::new(position.extend(0.0))
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Negative values are clamped to zero.
    pub fn with_thickness(mut self, thickness: f32) -> Self {
        self.thickness = thickness.max(0.0);
        self
    }
}

impl From<Vec3> for PolylinePoint {
    fn from(position: Vec3) -> Self {
        Self::new(position)
    }
}

impl From<Vec2> for PolylinePoint {
    fn from(position: Vec2) -> Self {
        Self::from_2d(position)
    }
}
