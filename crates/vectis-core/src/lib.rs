//! Vectis Core
//!
//! Shared plumbing for the vectis crates: logging bootstrap, profiling hooks
//! and the vector math helpers the mesh generators are built on.

pub mod logging;
pub mod math;
pub mod profiling;
