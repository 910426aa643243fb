//! Per-frame render shell for shapes.
//!
//! [`ShapeRenderer`] drives the regenerate/upload/draw cycle: once per frame
//! it walks the shapes in sort order, regenerates stale meshes, uploads them
//! through the host's [`ShapeBackend`], pushes uniforms only for shapes whose
//! material properties changed, and queues the draws.

use crate::{MeshGenConfig, Renderable, ScreenMetrics, ShapeDirtyFlags, ShapeId, ShapeVertex};
use ahash::HashSet;
use std::sync::Arc;
use vectis_core::math::Aabb;
use vectis_core::profiling::{profile_function, profile_scope};
use vectis_render::{
    DrawCall, MaterialKey, MeshHandle, PropertyTable, RenderError, RenderResult, ShapeBackend, SubmeshUpload,
};

/// Configuration for creating a [`ShapeRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeRendererDescriptor {
    /// Name used in logs.
    pub name: String,
    /// Camera-derived metrics for pixel and noot thickness.
    pub metrics: ScreenMetrics,
    /// Mesh generation settings.
    pub config: MeshGenConfig,
}

impl Default for ShapeRendererDescriptor {
    fn default() -> Self {
        Self {
            name: "Shapes".to_string(),
            metrics: ScreenMetrics::default(),
            config: MeshGenConfig::default(),
        }
    }
}

impl ShapeRendererDescriptor {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_metrics(mut self, metrics: ScreenMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_config(mut self, config: MeshGenConfig) -> Self {
        self.config = config;
        self
    }
}

/// What happened during one [`ShapeRenderer::render`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub shapes: usize,
    /// Meshes rebuilt because they were dirty.
    pub regenerated: usize,
    /// Meshes sent to the backend.
    pub uploads: usize,
    /// Individual uniform assignments.
    pub parameter_updates: usize,
    pub draws: usize,
    /// Submeshes skipped because they had no triangles.
    pub skipped_empty: usize,
    pub upload_failures: usize,
}

/// Drives shapes through regeneration, upload and draw.
///
/// Meshes stay resident on the backend, keyed by [`ShapeId`], until the host
/// calls [`ShapeRenderer::release`] for a discarded shape or
/// [`ShapeRenderer::release_all`].
///
/// # Example
///
/// ```
/// use vectis_geometry::{Polyline, Renderable, ShapeRenderer};
/// use vectis_render::mock::MockBackend;
///
/// vectis_render::init_properties();
/// let mut renderer = ShapeRenderer::new(MockBackend::default()).unwrap();
/// let mut polyline = Polyline::new();
///
/// let stats = renderer.render(&mut [&mut polyline]);
/// assert_eq!(stats.regenerated, 1);
/// assert!(!polyline.is_dirty());
/// ```
pub struct ShapeRenderer<B: ShapeBackend> {
    descriptor: ShapeRendererDescriptor,
    backend: B,
    properties: Arc<PropertyTable>,
    resident: HashSet<ShapeId>,
    last_stats: FrameStats,
}

impl<B: ShapeBackend> ShapeRenderer<B> {
    /// Create a renderer with the default descriptor.
    ///
    /// Fails if the shader property table has not been initialized.
    pub fn new(backend: B) -> RenderResult<Self> {
        Self::with_descriptor(backend, ShapeRendererDescriptor::default())
    }

    pub fn with_descriptor(backend: B, descriptor: ShapeRendererDescriptor) -> RenderResult<Self> {
        let properties = vectis_render::properties().ok_or(RenderError::PropertiesNotInitialized)?;
        tracing::debug!("Shape renderer '{}' created", descriptor.name);

        Ok(Self {
            descriptor,
            backend,
            properties,
            resident: HashSet::default(),
            last_stats: FrameStats::default(),
        })
    }

    pub fn descriptor(&self) -> &ShapeRendererDescriptor {
        &self.descriptor
    }

    /// Update screen metrics, e.g. after a resize or camera change.
    pub fn set_metrics(&mut self, metrics: ScreenMetrics) {
        self.descriptor.metrics = metrics;
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }

    /// Whether the backend currently holds buffers for `id`.
    pub fn is_resident(&self, id: ShapeId) -> bool {
        self.resident.contains(&id)
    }

    /// Render one frame.
    ///
    /// Shapes are processed in ascending `sort_order`; ties keep slice order.
    pub fn render(&mut self, shapes: &mut [&mut dyn Renderable]) -> FrameStats {
        profile_function!();

        let mut stats = FrameStats {
            shapes: shapes.len(),
            ..Default::default()
        };

        let mut order: Vec<usize> = (0..shapes.len()).collect();
        order.sort_by_key(|&i| shapes[i].sort_order());

        for i in order {
            self.render_shape(&mut *shapes[i], &mut stats);
        }

        tracing::trace!(
            "Frame '{}': {} shapes, {} regenerated, {} uploads, {} uniforms, {} draws",
            self.descriptor.name,
            stats.shapes,
            stats.regenerated,
            stats.uploads,
            stats.parameter_updates,
            stats.draws
        );
        self.last_stats = stats;
        stats
    }

    fn render_shape(&mut self, shape: &mut dyn Renderable, stats: &mut FrameStats) {
        let id = shape.id();
        let handle = MeshHandle(id.0);
        let resident = self.resident.contains(&id);

        let regenerate = shape.is_dirty();
        if regenerate {
            profile_scope!("regenerate");
            shape.regenerate(&self.descriptor.config);
            stats.regenerated += 1;
        }

        let mut fresh = false;
        if regenerate || !resident {
            match self.upload(shape, handle) {
                Ok(()) => {
                    stats.uploads += 1;
                    fresh = !resident;
                    self.resident.insert(id);
                }
                Err(e) => {
                    tracing::warn!("Failed to upload mesh of shape {:?}: {}", id, e);
                    stats.upload_failures += 1;
                    shape.base_mut().mark(ShapeDirtyFlags::MESH);
                    return;
                }
            }
        }

        if shape.properties_dirty() || fresh {
            let bindings = shape.material_parameters(&self.properties, &self.descriptor.config);
            for binding in &bindings {
                self.backend.set_parameter(handle, binding.id, &binding.value);
            }
            stats.parameter_updates += bindings.len();
            shape.mark_properties_synced();
        }

        let submeshes = shape.submeshes();
        let Some(bounds) = shape.bounds(&self.descriptor.metrics) else {
            stats.skipped_empty += submeshes.len();
            return;
        };
        let blend = shape.blend_mode();
        let sort_order = shape.sort_order();
        for (index, submesh) in submeshes.iter().enumerate() {
            if submesh.mesh.is_empty() {
                stats.skipped_empty += 1;
                continue;
            }
            self.backend.draw(&DrawCall {
                handle,
                submesh: index as u32,
                material: MaterialKey::new(submesh.material, blend),
                sort_order,
                bounds,
            });
            stats.draws += 1;
        }
    }

    fn upload(&mut self, shape: &dyn Renderable, handle: MeshHandle) -> RenderResult<()> {
        let submeshes = shape.submeshes();
        let uploads: Vec<SubmeshUpload<'_>> = submeshes
            .iter()
            .map(|submesh| SubmeshUpload {
                material: submesh.material,
                vertices: submesh.mesh.vertex_bytes(),
                vertex_stride: std::mem::size_of::<ShapeVertex>() as u64,
                indices: &submesh.mesh.indices,
            })
            .collect();
        self.backend.upload_mesh(handle, &uploads)
    }

    /// Free the GPU buffers of a shape. Returns whether it was resident.
    ///
    /// The renderer does not observe shapes being dropped. Hosts call this
    /// with the id of every shape they discard, otherwise its buffers stay
    /// resident until [`ShapeRenderer::release_all`].
    pub fn release(&mut self, id: ShapeId) -> bool {
        if !self.resident.remove(&id) {
            return false;
        }
        self.backend.release(MeshHandle(id.0));
        true
    }

    /// Free every resident mesh.
    pub fn release_all(&mut self) {
        for id in self.resident.drain() {
            self.backend.release(MeshHandle(id.0));
        }
    }

    /// Number of shapes with buffers on the backend.
    pub fn resident_count(&self) -> usize {
        self.resident.len()
    }

    /// Union of the bounds of `shapes`, or `None` if none of them draws anything.
    pub fn frame_bounds<'a>(&self, shapes: impl IntoIterator<Item = &'a dyn Renderable>) -> Option<Aabb> {
        shapes
            .into_iter()
            .filter_map(|shape| shape.bounds(&self.descriptor.metrics))
            .reduce(|mut total, bounds| {
                total.encapsulate(&bounds);
                total
            })
    }
}
