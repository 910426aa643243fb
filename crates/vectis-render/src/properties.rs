//! Process-wide shader property table.
//!
//! Shader uniforms are addressed by [`PropertyId`]s resolved once at startup
//! and read-only afterwards. Hosts that have their own id scheme (for example
//! an engine-side name hash) pass a resolver to [`init_properties_with`];
//! otherwise ids are assigned sequentially.
//!
//! ```
//! use vectis_render::{ShapeProperty, init_properties};
//!
//! let table = init_properties();
//! let thickness = table.id(ShapeProperty::Thickness);
//! assert_eq!(table.name(thickness), Some("_Thickness"));
//! ```

use ahash::HashMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// Every uniform a shape material can receive.
///
/// Only values that can change without touching the mesh live here. Per-point
/// colors and positions are baked into vertices; `Color` is a shape-wide tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeProperty {
    Thickness,
    ThicknessSpace,
    Alignment,
    ScaleMode,
    AntialiasMargin,
    Color,
    /// Dash length. Zero draws a solid stroke.
    DashSize,
    DashSpacing,
    DashOffset,
    DashType,
    DashSpace,
    DashSnap,
    /// Unit of a disc's radius, scaled to world units in the vertex stage.
    RadiusSpace,
}

impl ShapeProperty {
    pub const ALL: [ShapeProperty; 13] = [
        ShapeProperty::Thickness,
        ShapeProperty::ThicknessSpace,
        ShapeProperty::Alignment,
        ShapeProperty::ScaleMode,
        ShapeProperty::AntialiasMargin,
        ShapeProperty::Color,
        ShapeProperty::DashSize,
        ShapeProperty::DashSpacing,
        ShapeProperty::DashOffset,
        ShapeProperty::DashType,
        ShapeProperty::DashSpace,
        ShapeProperty::DashSnap,
        ShapeProperty::RadiusSpace,
    ];

    /// Uniform name as it appears in the shape shaders.
    pub const fn shader_name(self) -> &'static str {
        match self {
            ShapeProperty::Thickness => "_Thickness",
            ShapeProperty::ThicknessSpace => "_ThicknessSpace",
            ShapeProperty::Alignment => "_Alignment",
            ShapeProperty::ScaleMode => "_ScaleMode",
            ShapeProperty::AntialiasMargin => "_AAMargin",
            ShapeProperty::Color => "_Color",
            ShapeProperty::DashSize => "_DashSize",
            ShapeProperty::DashSpacing => "_DashSpacing",
            ShapeProperty::DashOffset => "_DashOffset",
            ShapeProperty::DashType => "_DashType",
            ShapeProperty::DashSpace => "_DashSpace",
            ShapeProperty::DashSnap => "_DashSnap",
            ShapeProperty::RadiusSpace => "_RadiusSpace",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Opaque handle for a shader uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId(pub u32);

/// Resolved ids for every [`ShapeProperty`].
#[derive(Debug)]
pub struct PropertyTable {
    ids: [PropertyId; ShapeProperty::ALL.len()],
    by_id: HashMap<PropertyId, ShapeProperty>,
}

impl PropertyTable {
    /// Build a table with sequential ids.
    pub fn sequential() -> Self {
        let mut next = 0u32;
        Self::build(|_| {
            let id = next;
            next += 1;
            id
        })
    }

    /// Build a table, asking `resolve` for the id of each uniform name.
    pub fn build(mut resolve: impl FnMut(&'static str) -> u32) -> Self {
        let ids = ShapeProperty::ALL.map(|property| PropertyId(resolve(property.shader_name())));
        let by_id = ShapeProperty::ALL
            .iter()
            .map(|&property| (ids[property.index()], property))
            .collect::<HashMap<_, _>>();

        if by_id.len() != ids.len() {
            tracing::warn!("Property resolver produced duplicate ids; reverse lookups are ambiguous");
        }

        Self { ids, by_id }
    }

    /// Id of a known property.
    #[inline]
    pub fn id(&self, property: ShapeProperty) -> PropertyId {
        self.ids[property.index()]
    }

    /// Reverse lookup of an id.
    pub fn property(&self, id: PropertyId) -> Option<ShapeProperty> {
        self.by_id.get(&id).copied()
    }

    /// Uniform name for an id.
    pub fn name(&self, id: PropertyId) -> Option<&'static str> {
        self.property(id).map(ShapeProperty::shader_name)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

static PROPERTY_TABLE: RwLock<Option<Arc<PropertyTable>>> = parking_lot::const_rwlock(None);

/// Initialize the global table with sequential ids.
///
/// Returns the existing table if one is already installed.
pub fn init_properties() -> Arc<PropertyTable> {
    init_properties_with(PropertyTable::sequential)
}

/// Initialize the global table using a host-provided builder.
///
/// The builder only runs if no table is installed yet.
pub fn init_properties_with(build: impl FnOnce() -> PropertyTable) -> Arc<PropertyTable> {
    if let Some(table) = PROPERTY_TABLE.read().as_ref() {
        return Arc::clone(table);
    }

    let mut slot = PROPERTY_TABLE.write();
    match slot.as_ref() {
        Some(table) => Arc::clone(table),
        None => {
            let table = Arc::new(build());
            tracing::debug!("Shader property table initialized ({} entries)", table.len());
            *slot = Some(Arc::clone(&table));
            table
        }
    }
}

/// The installed table, if [`init_properties`] has run.
pub fn properties() -> Option<Arc<PropertyTable>> {
    PROPERTY_TABLE.read().clone()
}

/// Drop the global table. Returns whether one was installed.
///
/// Outstanding `Arc`s stay valid; new lookups fail until re-initialized.
pub fn shutdown_properties() -> bool {
    PROPERTY_TABLE.write().take().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids_are_unique() {
        let table = PropertyTable::sequential();
        assert_eq!(table.len(), ShapeProperty::ALL.len());
        for property in ShapeProperty::ALL {
            assert_eq!(table.property(table.id(property)), Some(property));
        }
    }

    #[test]
    fn test_custom_resolver() {
        let table = PropertyTable::build(|name| {
            name.bytes()
                .fold(17u32, |hash, byte| hash.wrapping_mul(31).wrapping_add(byte as u32))
        });
        let id = table.id(ShapeProperty::Thickness);
        assert_eq!(table.name(id), Some("_Thickness"));
    }

    // The only test in this crate that touches the global table.
    #[test]
    fn test_init_shutdown_cycle() {
        let first = init_properties();
        let again = init_properties();
        assert!(Arc::ptr_eq(&first, &again));
        assert!(properties().is_some());

        assert!(shutdown_properties());
        assert!(properties().is_none());
        assert!(!shutdown_properties());

        // Old handles keep working after shutdown.
        assert_eq!(first.name(first.id(ShapeProperty::Alignment)), Some("_Alignment"));
        assert_eq!(first.name(first.id(ShapeProperty::RadiusSpace)), Some("_RadiusSpace"));

        let reinit = init_properties();
        assert!(!Arc::ptr_eq(&first, &reinit));
    }
}
