//! Reading shapes and writing font projects
//!
//! Shape resources come in as SVG; finished projects go out as FontForge
//! SFD text or UFO directories.

pub mod conversions;
pub mod sfd;
pub mod svg;
pub mod ufo;
pub mod writer;

use crate::core::errors::BuildError;
use crate::font_source::OutlineData;

/// Where glyph outlines come from
pub trait OutlineSource {
    /// Load the outline drawn for a glyph's basename
    fn load_outline(&self, basename: &str) -> Result<OutlineData, BuildError>;
}

// Explicit re-exports for public API
pub use sfd::SfdWriter;
pub use svg::{SvgShapeLoader, DEFAULT_SHAPES_DIR};
pub use ufo::UfoWriter;
pub use writer::{writer_for, Destination, OutputFormat, ProjectWriter};
