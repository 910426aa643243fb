//! Vectis Render
//!
//! The boundary between shape mesh generation and the host's GPU:
//! - [`Color`] and [`BlendMode`]
//! - shape materials and their uniform parameters
//! - the process-wide shader property table
//! - the [`ShapeBackend`] trait a host implements
//!
//! Enable the `mock` feature for [`mock::MockBackend`], a recording backend
//! used by tests.

mod backend;
mod blend;
mod color;
mod error;
mod material;
mod properties;

#[cfg(feature = "mock")]
pub mod mock;

pub use backend::*;
pub use blend::*;
pub use color::*;
pub use error::*;
pub use material::*;
pub use properties::*;

pub use wgpu;
