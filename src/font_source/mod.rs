//! Font source data structures
//!
//! This module contains everything describing the font being assembled:
//! the input glyph metadata, the outline and glyph value types, and the
//! font-level identity and metrics.

pub mod data;
pub mod identity;
pub mod meta;
pub mod metrics;


// Explicit re-exports for public API
// Data structures
pub use data::{
    glyph_name_for, ContourData, FontProject, GlyphData, OutlineData, PointData, PointTypeData,
};
// Identity
pub use identity::{FontIdentity, IdentityPolicy, DEFAULT_FAMILY_NAME};
// Input metadata
pub use meta::{parse_descriptions, GlyphDescription, LineSpec};
// Metrics
pub use metrics::FontMetrics;
