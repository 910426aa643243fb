//! Static field schemas for shapes.
//!
//! Every editable field of a shape is declared once as a [`FieldDescriptor`].
//! The descriptor says how the field is presented to an editor and which
//! part of the shape goes stale when it changes. Setters route through
//! [`FieldDescriptor::assign`], so the declared update kind is the behavior.
//!
//! ```
//! use vectis_geometry::{POLYLINE_SCHEMA, UpdateKind};
//!
//! let thickness = POLYLINE_SCHEMA.field("thickness").unwrap();
//! assert_eq!(thickness.update, UpdateKind::Material);
//! ```

use crate::ShapeDirtyFlags;

/// What goes stale when a field changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateKind {
    /// The mesh has to be regenerated.
    Geometry,
    /// Only material uniforms have to be pushed.
    Material,
    /// Both, e.g. alignment changes the mesh and a uniform.
    GeometryAndMaterial,
    /// Neither; only affects how the renderer orders draws.
    DrawState,
}

impl UpdateKind {
    pub const fn dirty_flags(self) -> ShapeDirtyFlags {
        match self {
            UpdateKind::Geometry => ShapeDirtyFlags::MESH,
            UpdateKind::Material => ShapeDirtyFlags::PROPERTIES,
            UpdateKind::GeometryAndMaterial => ShapeDirtyFlags::MESH.union(ShapeDirtyFlags::PROPERTIES),
            UpdateKind::DrawState => ShapeDirtyFlags::empty(),
        }
    }
}

/// Value type of a field, for editors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Bool,
    Int,
    Float,
    /// Angle in radians.
    Angle,
    Vec3,
    Color,
    Enum(&'static [&'static str]),
    /// A sequence of polyline points.
    Points,
    /// A [`DashStyle`](crate::DashStyle).
    DashStyle,
}

/// One editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub update: UpdateKind,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind, update: UpdateKind) -> Self {
        Self {
            name,
            label,
            kind,
            update,
        }
    }

    /// Store `value` in `slot`, dirtying per [`FieldDescriptor::update`].
    ///
    /// Returns `false` and leaves `dirty` alone when the value is unchanged.
    pub fn assign<T: PartialEq>(&self, dirty: &mut ShapeDirtyFlags, slot: &mut T, value: T) -> bool {
        if *slot == value {
            return false;
        }
        *slot = value;
        dirty.insert(self.update.dirty_flags());
        true
    }

    /// Record a change made in place (e.g. a point edit).
    pub fn touch(&self, dirty: &mut ShapeDirtyFlags) {
        dirty.insert(self.update.dirty_flags());
    }
}

/// The fields of one shape type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeSchema {
    pub shape: &'static str,
    pub fields: &'static [FieldDescriptor],
}

impl ShapeSchema {
    /// Fields shared by every shape.
    pub const COMMON: &'static [FieldDescriptor] = &[
        common::COLOR,
        common::BLEND_MODE,
        common::SCALE_MODE,
        common::SORT_ORDER,
    ];

    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().chain(Self::COMMON).find(|f| f.name == name)
    }

    /// Every field including the common ones.
    pub fn iter(&self) -> impl Iterator<Item = &'static FieldDescriptor> {
        self.fields.iter().chain(Self::COMMON)
    }

    /// Names of fields whose changes regenerate the mesh.
    pub fn geometry_fields(&self) -> impl Iterator<Item = &'static str> {
        self.iter()
            .filter(|f| f.update.dirty_flags().needs_mesh())
            .map(|f| f.name)
    }
}

/// Descriptors of the fields in [`ShapeSchema::COMMON`].
pub mod common {
    use super::{FieldDescriptor, FieldKind, UpdateKind};

    pub const COLOR: FieldDescriptor = FieldDescriptor::new("color", "Color", FieldKind::Color, UpdateKind::Material);
    pub const BLEND_MODE: FieldDescriptor = FieldDescriptor::new(
        "blend_mode",
        "Blend Mode",
        FieldKind::Enum(&["Opaque", "Transparent", "Additive", "Multiplicative"]),
        UpdateKind::Material,
    );
    pub const SCALE_MODE: FieldDescriptor = FieldDescriptor::new(
        "scale_mode",
        "Scale Mode",
        FieldKind::Enum(&["Uniform", "Coordinate"]),
        UpdateKind::Material,
    );
    pub const SORT_ORDER: FieldDescriptor =
        FieldDescriptor::new("sort_order", "Sort Order", FieldKind::Int, UpdateKind::DrawState);
}
