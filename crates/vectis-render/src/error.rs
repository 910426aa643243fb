//! Error types for the render boundary.

use crate::MeshHandle;
use std::fmt;

/// Errors surfaced by the renderer shell or a backend.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The shader property table has not been initialized.
    PropertiesNotInitialized,

    /// The backend refused a mesh upload.
    UploadFailed {
        handle: MeshHandle,
        message: String,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::PropertiesNotInitialized => {
                write!(f, "Shader property table is not initialized")
            }
            RenderError::UploadFailed { handle, message } => {
                write!(f, "Mesh upload failed for {}: {}", handle.0, message)
            }
        }
    }
}

impl std::error::Error for RenderError {}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
