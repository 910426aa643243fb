//! Unit interpretation for thickness values.

/// How a thickness value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThicknessSpace {
    /// World units.
    #[default]
    Meters,
    /// Screen pixels.
    Pixels,
    /// 1/100 of the shortest side of the viewport.
    Noots,
}

impl ThicknessSpace {
    /// Value pushed to the `_ThicknessSpace` uniform.
    pub fn shader_index(self) -> i32 {
        match self {
            ThicknessSpace::Meters => 0,
            ThicknessSpace::Pixels => 1,
            ThicknessSpace::Noots => 2,
        }
    }

    /// Convert a thickness in this space to world units.
    pub fn to_world(self, value: f32, metrics: &ScreenMetrics) -> f32 {
        match self {
            ThicknessSpace::Meters => value,
            ThicknessSpace::Pixels => value * metrics.world_units_per_pixel,
            ThicknessSpace::Noots => {
                value * metrics.min_viewport_px * 0.01 * metrics.world_units_per_pixel
            }
        }
    }
}

/// Screen-to-world conversion supplied by the host camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMetrics {
    /// Size of one pixel in world units at the shape's depth.
    pub world_units_per_pixel: f32,
    /// Shortest viewport side in pixels.
    pub min_viewport_px: f32,
}

impl ScreenMetrics {
    pub fn new(world_units_per_pixel: f32, min_viewport_px: f32) -> Self {
        Self {
            world_units_per_pixel: world_units_per_pixel.max(0.0),
            min_viewport_px: min_viewport_px.max(0.0),
        }
    }
}

impl Default for ScreenMetrics {
    fn default() -> Self {
        Self::new(1.0, 1080.0)
    }
}
