//! Shapes other than the polyline.

pub mod disc;
pub mod line;
pub mod quad;
pub mod triangle;

pub use disc::{ArcEndCap, DISC_SCHEMA, Disc, DiscColorMode, DiscColors, DiscKind};
pub use line::{LINE_SCHEMA, Line, LineColorMode, LineEndCap};
pub use quad::{QUAD_SCHEMA, Quad, QuadColorMode, QuadColors};
pub use triangle::{TRIANGLE_SCHEMA, Triangle, TriangleColorMode};
