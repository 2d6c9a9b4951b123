//! Font metrics and font-level info
//!
//! Vertical metrics written into the project header, and the conversion of
//! identity plus metrics into norad's `FontInfo` for UFO output.

use crate::font_source::identity::FontIdentity;

/// Vertical metrics shared by every glyph of the project
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontMetrics {
    pub units_per_em: f64,
    pub ascender: f64,
    pub descender: f64,
}

impl Default for FontMetrics {
    fn default() -> Self {
        // Shapes are authored on a 1000 unit em with an 80/20 split
        Self {
            units_per_em: 1000.0,
            ascender: 800.0,
            descender: -200.0,
        }
    }
}

impl FontMetrics {
    /// Descent as a positive distance below the baseline
    pub fn descent(&self) -> f64 {
        -self.descender
    }

    /// Convert identity and metrics to norad FontInfo
    pub fn to_norad_font_info(&self, identity: &FontIdentity) -> norad::FontInfo {
        let mut info = norad::FontInfo::default();

        // Set family and PostScript names
        if !identity.family_name.is_empty() {
            info.family_name = Some(identity.family_name.clone());
        }
        info.postscript_font_name = Some(identity.internal_name.clone());
        info.postscript_full_name = Some(identity.full_name.clone());

        // Set numeric values
        if let Some(units_per_em) =
            norad::fontinfo::NonNegativeIntegerOrFloat::new(self.units_per_em)
        {
            info.units_per_em = Some(units_per_em);
        }
        info.ascender = Some(self.ascender);
        info.descender = Some(self.descender);
        info
    }
}
