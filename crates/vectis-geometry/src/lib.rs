//! Vectis Geometry - Procedural meshes for vector shapes
//!
//! This crate provides:
//! - Polylines with miter, round and bevel joins, open or closed
//! - Lines with caps, discs/pies/rings/arcs, quads and triangles
//! - Dashed lines and discs, driven entirely by uniforms
//! - Flat 2D and oriented 3D framing of stroked geometry
//! - Dirty tracking that separates mesh rebuilds from uniform updates
//! - A render shell that uploads and draws through a host backend
//!
//! # Example
//!
//! ```
//! use vectis_geometry::*;
//! use vectis_render::mock::MockBackend;
//! use glam::Vec3;
//!
//! vectis_render::init_properties();
//! let mut renderer = ShapeRenderer::new(MockBackend::default()).unwrap();
//!
//! let mut polyline = Polyline::new();
//! polyline.set_joins(PolylineJoins::Round);
//! polyline.add_point(Vec3::new(0.0, -1.0, 0.0));
//!
//! let mut disc = Disc::new(DiscKind::Ring, 2.0);
//! disc.base_mut().set_sort_order(1);
//!
//! renderer.render(&mut [&mut polyline, &mut disc]);
//!
//! // Thickness is a uniform: no mesh rebuild on the next frame.
//! polyline.set_thickness(0.5);
//! let stats = renderer.render(&mut [&mut polyline, &mut disc]);
//! assert_eq!(stats.regenerated, 0);
//! ```

// Data
mod base;
mod dash;
mod dirty;
mod error;
mod point;
mod schema;
mod units;

// Generation
mod config;
mod frame;
mod joins;
mod mesh_gen;
mod vertex;

// Shapes
mod polyline;
pub mod shapes;

// Rendering
mod renderable;
mod renderer;

pub use base::*;
pub use dash::{DashSnap, DashSpace, DashStyle, DashType, Dashes, fields as dash_fields};
pub use dirty::*;
pub use error::*;
pub use point::*;
pub use schema::*;
pub use units::*;

pub use config::*;
pub use frame::{GeometryMode, estimate_up};
pub use joins::{MiterOffset, PolylineJoins, miter_offset};
pub use mesh_gen::*;
pub use vertex::*;

pub use polyline::{POLYLINE_SCHEMA, Polyline, fields as polyline_fields};
pub use shapes::*;

pub use renderable::{Renderable, SubmeshView};
pub use renderer::*;
