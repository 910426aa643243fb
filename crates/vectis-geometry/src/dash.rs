//! Dash patterns for stroked shapes.
//!
//! Dashes are cut in the fragment stage from the distance along the stroke,
//! so every dash setting is a material uniform and editing one never
//! regenerates the mesh.
//!
//! ```
//! use vectis_geometry::{DashSnap, DashStyle, Line, Renderable, ShapeDirtyFlags};
//! use glam::Vec3;
//!
//! let mut line = Line::new(Vec3::ZERO, Vec3::X);
//! line.base_mut().clear(ShapeDirtyFlags::all());
//!
//! line.set_dashed(true);
//! line.set_dash_style(DashStyle::new(2.0, 1.0).with_snap(DashSnap::Tiling));
//! assert_eq!(line.dirty_flags(), ShapeDirtyFlags::PROPERTIES);
//! ```

use crate::schema::{FieldDescriptor, FieldKind, UpdateKind};
use vectis_render::{MaterialParameter, ParameterBinding, PropertyTable, ShapeProperty};

/// Shape of each dash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DashType {
    #[default]
    Basic,
    /// Dashes with round ends.
    Rounded,
    /// Dashes slanted by the stroke thickness.
    Angled,
}

impl DashType {
    pub fn shader_index(self) -> i32 {
        match self {
            DashType::Basic => 0,
            DashType::Rounded => 1,
            DashType::Angled => 2,
        }
    }
}

/// Unit of dash size and spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DashSpace {
    /// Multiples of the stroke thickness.
    #[default]
    Relative,
    /// World units.
    Meters,
    /// Size is a dash count over the whole stroke; spacing is a fraction of one period.
    FixedCount,
}

impl DashSpace {
    pub fn shader_index(self) -> i32 {
        match self {
            DashSpace::Relative => 0,
            DashSpace::Meters => 1,
            DashSpace::FixedCount => 2,
        }
    }
}

/// How the pattern is fitted to the stroke length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DashSnap {
    /// The pattern runs freely and may end mid-dash.
    #[default]
    Off,
    /// The period is adjusted so a whole number of periods fit.
    Tiling,
    /// Like `Tiling`, with a full dash at both ends.
    EndToEnd,
}

impl DashSnap {
    pub fn shader_index(self) -> i32 {
        match self {
            DashSnap::Off => 0,
            DashSnap::Tiling => 1,
            DashSnap::EndToEnd => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashStyle {
    pub kind: DashType,
    pub space: DashSpace,
    pub snap: DashSnap,
    pub size: f32,
    pub spacing: f32,
    /// Phase of the pattern, in periods.
    pub offset: f32,
}

impl Default for DashStyle {
    fn default() -> Self {
        Self::new(4.0, 4.0)
    }
}

impl DashStyle {
    pub fn new(size: f32, spacing: f32) -> Self {
        Self {
            kind: DashType::default(),
            space: DashSpace::default(),
            snap: DashSnap::default(),
            size: size.max(0.0),
            spacing: spacing.max(0.0),
            offset: 0.0,
        }
    }

    pub fn with_kind(mut self, kind: DashType) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_space(mut self, space: DashSpace) -> Self {
        self.space = space;
        self
    }

    pub fn with_snap(mut self, snap: DashSnap) -> Self {
        self.snap = snap;
        self
    }

    pub fn with_offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    /// Clamp size and spacing to non-negative values.
    pub(crate) fn sanitized(mut self) -> Self {
        self.size = self.size.max(0.0);
        self.spacing = self.spacing.max(0.0);
        self
    }
}

/// Dash settings carried by lines and discs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dashes {
    pub dashed: bool,
    pub style: DashStyle,
    /// Use the dash size as spacing, ignoring `style.spacing`.
    pub match_spacing_to_size: bool,
}

impl Dashes {
    /// Whether the stroke is actually cut into dashes.
    pub fn is_active(&self) -> bool {
        self.dashed && self.style.size > 0.0
    }

    /// Gap between dashes after applying `match_spacing_to_size`.
    pub fn spacing(&self) -> f32 {
        if self.match_spacing_to_size {
            self.style.size
        } else {
            self.style.spacing
        }
    }

    /// A `_DashSize` of zero draws a solid stroke.
    pub(crate) fn bindings(&self, table: &PropertyTable) -> [ParameterBinding; 6] {
        let bind = |property, value| ParameterBinding::new(table.id(property), value);
        let size = if self.is_active() { self.style.size } else { 0.0 };
        [
            bind(ShapeProperty::DashSize, MaterialParameter::Float(size)),
            bind(ShapeProperty::DashSpacing, MaterialParameter::Float(self.spacing())),
            bind(ShapeProperty::DashOffset, MaterialParameter::Float(self.style.offset)),
            bind(ShapeProperty::DashType, MaterialParameter::Int(self.style.kind.shader_index())),
            bind(ShapeProperty::DashSpace, MaterialParameter::Int(self.style.space.shader_index())),
            bind(ShapeProperty::DashSnap, MaterialParameter::Int(self.style.snap.shader_index())),
        ]
    }
}

/// Dash fields shared by the line and disc schemas.
pub mod fields {
    use super::*;

    pub const DASHED: FieldDescriptor = FieldDescriptor::new("dashed", "Dashed", FieldKind::Bool, UpdateKind::Material);
    pub const DASH_STYLE: FieldDescriptor =
        FieldDescriptor::new("dash_style", "Dash Style", FieldKind::DashStyle, UpdateKind::Material);
    pub const MATCH_DASH_SPACING_TO_SIZE: FieldDescriptor = FieldDescriptor::new(
        "match_dash_spacing_to_size",
        "Match Spacing to Size",
        FieldKind::Bool,
        UpdateKind::Material,
    );
}
