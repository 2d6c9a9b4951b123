//! Glyph and font project assembly
//!
//! Binds glyph descriptions to simplified outlines and collects the
//! resulting glyphs into a [`FontProject`](crate::font_source::FontProject).

pub mod builder;
pub mod glyph;

pub use builder::FontProjectBuilder;
pub use glyph::GlyphAssembler;
