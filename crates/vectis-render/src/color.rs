/// An RGBA color with `f32` components.
///
/// Components are linear and nominally in `0.0..=1.0`; values above one are
/// allowed for HDR tints.
///
/// ```
/// use vectis_render::Color;
///
/// let orange = Color::from_hex(0xFF8800);
/// let faded = orange.with_alpha(0.5);
/// assert_eq!(faded.a, 0.5);
/// ```
///
/// The struct is `#[repr(C)]` and implements `bytemuck::Pod`, so it can be
/// written straight into vertex and uniform buffers.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    /// Create a color from RGB components with full opacity.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGBA components.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from 8-bit RGBA values (0–255 mapped to 0.0–1.0).
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create a color from a 24-bit RGB hex value (e.g. `0xFF8800`).
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as u8;
        let g = ((hex >> 8) & 0xFF) as u8;
        let b = (hex & 0xFF) as u8;
        Self::from_rgba_u8(r, g, b, 255)
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Linear interpolation between two colors, component-wise.
    pub fn lerp(self, other: Color, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Bilinear blend of four corner colors.
    ///
    /// `u` runs from the `*_start` to the `*_end` colors, `v` from `inner` to
    /// `outer`.
    pub fn bilinear(
        inner_start: Color,
        outer_start: Color,
        inner_end: Color,
        outer_end: Color,
        u: f32,
        v: f32,
    ) -> Self {
        let start = inner_start.lerp(outer_start, v);
        let end = inner_end.lerp(outer_end, v);
        start.lerp(end, u)
    }

    /// Component-wise product, used for tinting.
    pub fn multiply(self, other: Color) -> Self {
        Self {
            r: self.r * other.r,
            g: self.g * other.g,
            b: self.b * other.b,
            a: self.a * other.a,
        }
    }

    /// Convert to the equivalent `wgpu::Color` (f64 components).
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }

    /// Convert to an `[r, g, b, a]` array.
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 4]> for Color {
    fn from(arr: [f32; 4]) -> Self {
        Self::rgba(arr[0], arr[1], arr[2], arr[3])
    }
}

impl From<Color> for [f32; 4] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(Color::RED.lerp(Color::BLUE, 0.0), Color::RED);
        assert_eq!(Color::RED.lerp(Color::BLUE, 1.0), Color::BLUE);
        assert_eq!(
            Color::BLACK.lerp(Color::WHITE, 0.5),
            Color::rgb(0.5, 0.5, 0.5)
        );
    }

    #[test]
    fn test_bilinear_corners() {
        let (a, b, c, d) = (Color::RED, Color::GREEN, Color::BLUE, Color::WHITE);
        assert_eq!(Color::bilinear(a, b, c, d, 0.0, 0.0), a);
        assert_eq!(Color::bilinear(a, b, c, d, 0.0, 1.0), b);
        assert_eq!(Color::bilinear(a, b, c, d, 1.0, 0.0), c);
        assert_eq!(Color::bilinear(a, b, c, d, 1.0, 1.0), d);
    }

    #[test]
    fn test_hex() {
        let c = Color::from_hex(0xFF0000);
        assert_eq!(c, Color::RED);
    }

    #[test]
    fn test_tint_multiply() {
        let tint = Color::rgba(0.5, 1.0, 0.0, 0.5);
        assert_eq!(Color::WHITE.multiply(tint), tint);
        assert_eq!(Color::RED.multiply(tint), Color::rgba(0.5, 0.0, 0.0, 0.5));
        assert_eq!(tint.to_wgpu().a, 0.5);
    }
}
