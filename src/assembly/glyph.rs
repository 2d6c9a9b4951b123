//! Glyph assembly
//!
//! Turns one glyph description into one glyph: ink-bearing glyphs get their
//! outline loaded and simplified, spacing-only glyphs get none.

use crate::core::errors::BuildError;
use crate::data::OutlineSource;
use crate::font_source::{glyph_name_for, GlyphData, GlyphDescription};
use crate::geometry::simplify_outline;
use tracing::{debug, info};

/// Binds outlines and advance widths to codepoints
pub struct GlyphAssembler<'a, S: OutlineSource> {
    source: &'a S,
    tolerance: f64,
}

impl<'a, S: OutlineSource> GlyphAssembler<'a, S> {
    pub fn new(source: &'a S, tolerance: f64) -> Self {
        Self { source, tolerance }
    }

    /// Assemble the glyph for `codepoint` from its description
    ///
    /// Loader failures are returned as they are.
    pub fn assemble(
        &self,
        codepoint: char,
        description: &GlyphDescription,
    ) -> Result<GlyphData, BuildError> {
        let outline = if description.has_ink() {
            let loaded = self.source.load_outline(&description.basename)?;
            let simplified = simplify_outline(&loaded, self.tolerance);
            debug!(
                "U+{:04X} ({}): {} -> {} points",
                codepoint as u32,
                description.basename,
                loaded.point_count(),
                simplified.point_count()
            );
            Some(simplified)
        } else {
            info!(
                "Note: U+{:04X} ({}) rendered as spacing-only",
                codepoint as u32, description.basename
            );
            None
        };

        Ok(GlyphData {
            codepoint,
            name: glyph_name_for(codepoint),
            basename: description.basename.clone(),
            advance_width: description.width,
            outline,
        })
    }
}
