//! Font project data structures
//!
//! Plain value types passed by ownership through the pipeline: outlines are
//! produced by the loader, rewritten by the simplifier, bound to a codepoint
//! by the glyph assembler and collected into a [`FontProject`].

use crate::font_source::identity::FontIdentity;
use crate::font_source::metrics::FontMetrics;
use std::collections::BTreeMap;

/// A glyph's contour set
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutlineData {
    pub contours: Vec<ContourData>,
}

/// One closed contour, stored as a UFO-style point list
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContourData {
    pub points: Vec<PointData>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointData {
    pub x: f64,
    pub y: f64,
    pub point_type: PointTypeData,
    /// Incoming and outgoing tangents are collinear (on-curve points only)
    pub smooth: bool,
}

/// Point types, as UFO names them
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointTypeData {
    Move,
    Line,
    OffCurve,
    Curve,
    QCurve,
}

impl PointTypeData {
    pub fn is_on_curve(&self) -> bool {
        !matches!(self, PointTypeData::OffCurve)
    }
}

impl OutlineData {
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// Total number of points, on- and off-curve, across all contours
    pub fn point_count(&self) -> usize {
        self.contours.iter().map(|c| c.points.len()).sum()
    }
}

impl ContourData {
    pub fn on_curve_count(&self) -> usize {
        self.points
            .iter()
            .filter(|p| p.point_type.is_on_curve())
            .count()
    }
}

impl PointData {
    pub fn new(x: f64, y: f64, point_type: PointTypeData) -> Self {
        Self {
            x,
            y,
            point_type,
            smooth: false,
        }
    }
}

/// A glyph bound to one codepoint
///
/// `outline` is `None` exactly when the glyph is spacing-only. An ink-bearing
/// glyph whose shape file held no contours keeps `Some` with an empty
/// outline.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphData {
    pub codepoint: char,
    pub name: String,
    /// Shape file basename this glyph was described by
    pub basename: String,
    pub advance_width: u32,
    pub outline: Option<OutlineData>,
}

impl GlyphData {
    pub fn is_spacing_only(&self) -> bool {
        self.outline.is_none()
    }
}

/// Production glyph name for a codepoint: `uniXXXX` in the BMP, `uXXXXX` above
pub fn glyph_name_for(codepoint: char) -> String {
    let value = codepoint as u32;
    if value <= 0xFFFF {
        format!("uni{value:04X}")
    } else {
        format!("u{value:05X}")
    }
}

/// A fully assembled font, ready for a project writer
#[derive(Clone, Debug, PartialEq)]
pub struct FontProject {
    pub identity: FontIdentity,
    pub metrics: FontMetrics,
    /// Glyph table keyed and ordered by codepoint
    pub glyphs: BTreeMap<char, GlyphData>,
}

impl FontProject {
    pub fn glyph(&self, codepoint: char) -> Option<&GlyphData> {
        self.glyphs.get(&codepoint)
    }

    pub fn spacing_only_count(&self) -> usize {
        self.glyphs.values().filter(|g| g.is_spacing_only()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_names() {
        assert_eq!(glyph_name_for(' '), "uni0020");
        assert_eq!(glyph_name_for('A'), "uni0041");
        assert_eq!(glyph_name_for('\u{1F600}'), "u1F600");
    }

    #[test]
    fn test_on_curve_count_skips_handles() {
        let contour = ContourData {
            points: vec![
                PointData::new(0.0, 0.0, PointTypeData::Curve),
                PointData::new(10.0, 0.0, PointTypeData::OffCurve),
                PointData::new(20.0, 10.0, PointTypeData::OffCurve),
                PointData::new(20.0, 20.0, PointTypeData::Curve),
                PointData::new(0.0, 20.0, PointTypeData::Line),
            ],
        };
        assert_eq!(contour.on_curve_count(), 3);
    }
}
