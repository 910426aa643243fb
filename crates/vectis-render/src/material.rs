//! Shape materials and the uniform values pushed to them.
//!
//! A shape's mesh is split into submeshes, each drawn with one
//! [`MaterialKind`]. Parameter-only changes (thickness, tint, thickness space)
//! travel as [`MaterialParameter`]s and never touch the mesh.

use crate::{BlendMode, Color, PropertyId};
use glam::Vec4;

/// Which shape shader a submesh is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    /// Polyline segment strip. Miter joins are resolved in this pass.
    Polyline,
    /// Dedicated round/bevel join geometry of a polyline.
    PolylineJoins,
    Line,
    Disc,
    Quad,
    Triangle,
}

impl MaterialKind {
    /// Shader label, used in pipeline names and logs.
    pub fn label(self) -> &'static str {
        match self {
            MaterialKind::Polyline => "Shapes/Polyline",
            MaterialKind::PolylineJoins => "Shapes/PolylineJoins",
            MaterialKind::Line => "Shapes/Line",
            MaterialKind::Disc => "Shapes/Disc",
            MaterialKind::Quad => "Shapes/Quad",
            MaterialKind::Triangle => "Shapes/Triangle",
        }
    }
}

/// A material variant: shader plus blend mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialKey {
    pub kind: MaterialKind,
    pub blend: BlendMode,
}

impl MaterialKey {
    pub fn new(kind: MaterialKind, blend: BlendMode) -> Self {
        Self { kind, blend }
    }
}

/// A uniform value bound to a shape material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialParameter {
    Float(f32),
    Int(i32),
    Color(Color),
    Vec4(Vec4),
}

impl MaterialParameter {
    /// Convert parameter to bytes for GPU upload.
    pub fn as_bytes(&self) -> Vec<u8> {
        match self {
            MaterialParameter::Float(v) => bytemuck::bytes_of(v).to_vec(),
            MaterialParameter::Int(v) => bytemuck::bytes_of(v).to_vec(),
            MaterialParameter::Color(c) => bytemuck::bytes_of(c).to_vec(),
            MaterialParameter::Vec4(v) => bytemuck::bytes_of(v).to_vec(),
        }
    }

    /// Size of the parameter in bytes.
    pub fn size(&self) -> u64 {
        match self {
            MaterialParameter::Float(_) | MaterialParameter::Int(_) => 4,
            MaterialParameter::Color(_) | MaterialParameter::Vec4(_) => 16,
        }
    }
}

/// One uniform assignment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterBinding {
    pub id: PropertyId,
    pub value: MaterialParameter,
}

impl ParameterBinding {
    pub fn new(id: PropertyId, value: MaterialParameter) -> Self {
        Self { id, value }
    }
}
