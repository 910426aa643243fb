//! State shared by every shape.

use crate::schema::common;
use crate::ShapeDirtyFlags;
use std::sync::atomic::{AtomicU64, Ordering};
use vectis_render::{BlendMode, Color};

/// Unique identifier of a shape, stable for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub u64);

impl ShapeId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// How the shape reacts to non-uniform transform scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScaleMode {
    /// Thickness scales with the transform's average scale.
    #[default]
    Uniform,
    /// Only coordinates scale; thickness keeps its value.
    Coordinate,
}

impl ScaleMode {
    pub fn shader_index(self) -> i32 {
        match self {
            ScaleMode::Uniform => 0,
            ScaleMode::Coordinate => 1,
        }
    }
}

/// Renderer settings and dirty state common to all shapes.
///
/// Cloning allocates a new [`ShapeId`] and marks the copy fully dirty, so a
/// cloned shape gets its own mesh on the next render instead of sharing the
/// original's.
#[derive(Debug)]
pub struct ShapeBase {
    id: ShapeId,
    tint: Color,
    blend_mode: BlendMode,
    scale_mode: ScaleMode,
    sort_order: i32,
    dirty: ShapeDirtyFlags,
}

impl Clone for ShapeBase {
    fn clone(&self) -> Self {
        Self {
            id: ShapeId::next(),
            tint: self.tint,
            blend_mode: self.blend_mode,
            scale_mode: self.scale_mode,
            sort_order: self.sort_order,
            dirty: ShapeDirtyFlags::all(),
        }
    }
}

impl Default for ShapeBase {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeBase {
    /// New shapes start fully dirty so their first render builds everything.
    pub fn new() -> Self {
        Self {
            id: ShapeId::next(),
            tint: Color::WHITE,
            blend_mode: BlendMode::default(),
            scale_mode: ScaleMode::default(),
            sort_order: 0,
            dirty: ShapeDirtyFlags::all(),
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn tint(&self) -> Color {
        self.tint
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    pub fn scale_mode(&self) -> ScaleMode {
        self.scale_mode
    }

    pub fn sort_order(&self) -> i32 {
        self.sort_order
    }

    pub fn dirty(&self) -> ShapeDirtyFlags {
        self.dirty
    }

    pub fn set_tint(&mut self, tint: Color) -> bool {
        common::COLOR.assign(&mut self.dirty, &mut self.tint, tint)
    }

    pub fn set_blend_mode(&mut self, blend_mode: BlendMode) -> bool {
        common::BLEND_MODE.assign(&mut self.dirty, &mut self.blend_mode, blend_mode)
    }

    pub fn set_scale_mode(&mut self, scale_mode: ScaleMode) -> bool {
        common::SCALE_MODE.assign(&mut self.dirty, &mut self.scale_mode, scale_mode)
    }

    pub fn set_sort_order(&mut self, sort_order: i32) -> bool {
        common::SORT_ORDER.assign(&mut self.dirty, &mut self.sort_order, sort_order)
    }

    /// Dirty flags for the shape's own fields.
    pub(crate) fn dirty_mut(&mut self) -> &mut ShapeDirtyFlags {
        &mut self.dirty
    }

    pub fn mark(&mut self, flags: ShapeDirtyFlags) {
        self.dirty.insert(flags);
    }

    pub fn clear(&mut self, flags: ShapeDirtyFlags) {
        self.dirty.remove(flags);
    }
}
