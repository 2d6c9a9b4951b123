//! Geometric Primitives and Operations

pub mod simplify;
pub mod utilities;

// Re-export commonly used items
pub use simplify::{simplify_contour, simplify_outline, DEFAULT_TOLERANCE};
