//! Vector math shared by the mesh generators.
//!
//! Re-exports the [`glam`] types used across the workspace and adds the small
//! set of geometric helpers the generators need (plane projection, polygon
//! normals, tolerant comparisons).
//!
//! # Examples
//!
//! ```
//! use vectis_core::math::{Vec3, project_onto_plane};
//!
//! let v = project_onto_plane(Vec3::new(1.0, 1.0, 1.0), Vec3::Z);
//! assert_eq!(v, Vec3::new(1.0, 1.0, 0.0));
//! ```
//!
//! [`glam`]: https://docs.rs/glam

pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

/// Lengths below this are treated as zero.
pub const GEOMETRIC_EPSILON: f32 = 1e-6;

/// Remove the component of `v` along the unit vector `normal`.
#[inline]
pub fn project_onto_plane(v: Vec3, normal: Vec3) -> Vec3 {
    v - normal * v.dot(normal)
}

/// Normalize `v`, or `None` when it is too short to carry a direction.
#[inline]
pub fn try_normalize(v: Vec3) -> Option<Vec3> {
    let len = v.length();
    if len > GEOMETRIC_EPSILON && len.is_finite() {
        Some(v / len)
    } else {
        None
    }
}

/// Compare two floats with an absolute tolerance.
#[inline]
pub fn approx_eq(a: f32, b: f32, tolerance: f32) -> bool {
    (a - b).abs() <= tolerance
}

/// Newell's method: the (unnormalized) normal of the polygon through `points`.
///
/// The polygon is implicitly closed. Collinear or empty input yields a zero
/// vector.
pub fn newell_normal(points: &[Vec3]) -> Vec3 {
    let mut normal = Vec3::ZERO;
    for (i, current) in points.iter().enumerate() {
        let next = points[(i + 1) % points.len()];
        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }
    normal
}

/// Axis-aligned bounding box.
///
/// The default box is degenerate and sits at the origin, which is what a shape
/// with nothing to draw reports.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::new(first, first), |bounds, p| Self {
            min: bounds.min.min(p),
            max: bounds.max.max(p),
        }))
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Grow the box by `amount` on every side.
    pub fn expanded(&self, amount: f32) -> Self {
        Self::new(self.min - Vec3::splat(amount), self.max + Vec3::splat(amount))
    }

    /// Grow the box to also contain `other`.
    pub fn encapsulate(&mut self, other: &Aabb) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newell_normal_ccw_square() {
        let square = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let n = newell_normal(&square).normalize();
        assert!(approx_eq(n.z, 1.0, 1e-6));
    }

    #[test]
    fn test_newell_normal_collinear() {
        let line = [Vec3::ZERO, Vec3::X, Vec3::X * 2.0];
        assert_eq!(newell_normal(&line), Vec3::ZERO);
        assert_eq!(newell_normal(&[]), Vec3::ZERO);
    }

    #[test]
    fn test_aabb_from_points_and_encapsulate() {
        let mut a = Aabb::from_points([Vec3::new(1.0, -1.0, 0.0), Vec3::new(-2.0, 3.0, 0.5)]).unwrap();
        assert_eq!(a.min, Vec3::new(-2.0, -1.0, 0.0));
        assert_eq!(a.max, Vec3::new(1.0, 3.0, 0.5));

        a.encapsulate(&Aabb::from_center_size(Vec3::new(5.0, 0.0, 0.0), Vec3::splat(2.0)));
        assert_eq!(a.max.x, 6.0);
        assert!(a.contains(Vec3::new(0.0, 0.0, 0.25)));
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_try_normalize() {
        assert!(try_normalize(Vec3::ZERO).is_none());
        assert_eq!(try_normalize(Vec3::new(0.0, 3.0, 0.0)), Some(Vec3::Y));
    }
}
