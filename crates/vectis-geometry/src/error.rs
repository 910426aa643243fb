//! Errors raised by shape mutators.
//!
//! Only caller mistakes are errors. Degenerate geometry (too few points,
//! zero-length segments, reversing joins) is handled by the generators and
//! never reported here.

use std::fmt;

/// Errors that can occur when editing a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    /// Point index outside `0..count`.
    OutOfRange { index: usize, count: usize },

    /// A parallel color list does not match the number of points.
    LengthMismatch { points: usize, colors: usize },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::OutOfRange { index, count } => {
                write!(f, "Point index {} out of range (count: {})", index, count)
            }
            ShapeError::LengthMismatch { points, colors } => write!(
                f,
                "Point/color length mismatch: {} points, {} colors",
                points, colors
            ),
        }
    }
}

impl std::error::Error for ShapeError {}

/// Result type for shape edits.
pub type ShapeResult<T> = Result<T, ShapeError>;
