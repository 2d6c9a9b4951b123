//! FontForge SFD output
//!
//! Renders a project as a `SplineFontDB: 3.0` text file. Splines are written
//! in cubic form, so quadratic segments are degree-raised. A spacing-only
//! glyph has no spline set at all, while an ink-bearing glyph whose outline
//! came back empty keeps an empty one.

use crate::core::errors::BuildError;
use crate::data::writer::{deliver_staged, Destination, ProjectWriter};
use crate::font_source::{ContourData, FontProject, GlyphData};
use crate::geometry::utilities::{end_tangent, is_smooth_join, start_tangent};
use kurbo::{ParamCurve, PathSeg, Point};
use std::fmt::Write;
use tracing::warn;

/// Encoding slots available in FontForge's `UnicodeFull` encoding
const UNICODE_FULL_SLOTS: u32 = 0x110000;

/// SFD point flags
const FLAG_SMOOTH: u8 = 0;
const FLAG_CORNER: u8 = 1;

#[derive(Clone, Copy, Debug, Default)]
pub struct SfdWriter;

impl ProjectWriter for SfdWriter {
    fn write_project(
        &self,
        project: &FontProject,
        destination: &Destination,
    ) -> Result<(), BuildError> {
        let text = render_sfd(project);
        deliver_staged(text.as_bytes(), destination)
    }
}

/// Render the whole project as SFD text
pub fn render_sfd(project: &FontProject) -> String {
    let mut out = String::new();
    write_header(&mut out, project);
    for (glyph_index, glyph) in project.glyphs.values().enumerate() {
        write_glyph(&mut out, glyph, glyph_index);
    }
    out.push_str("EndChars\nEndSplineFont\n");
    out
}

fn write_header(out: &mut String, project: &FontProject) {
    let identity = &project.identity;
    let metrics = &project.metrics;
    // Writing to a String cannot fail
    let _ = writeln!(out, "SplineFontDB: 3.0");
    let _ = writeln!(out, "FontName: {}", identity.internal_name);
    let _ = writeln!(out, "FullName: {}", identity.full_name);
    let _ = writeln!(out, "FamilyName: {}", identity.family_name);
    let _ = writeln!(out, "Weight: Regular");
    let _ = writeln!(out, "Copyright: ");
    let _ = writeln!(out, "Version: 001.000");
    let _ = writeln!(out, "ItalicAngle: 0");
    let _ = writeln!(out, "UnderlinePosition: -100");
    let _ = writeln!(out, "UnderlineWidth: 50");
    let _ = writeln!(out, "Ascent: {}", format_number(metrics.ascender));
    let _ = writeln!(out, "Descent: {}", format_number(metrics.descent()));
    let _ = writeln!(out, "InvalidEm: 0");
    let _ = writeln!(out, "LayerCount: 2");
    let _ = writeln!(out, "Layer: 0 0 \"Back\" 1");
    let _ = writeln!(out, "Layer: 1 0 \"Fore\" 0");
    let _ = writeln!(out, "Encoding: UnicodeFull");
    let _ = writeln!(out, "DisplaySize: -48");
    let _ = writeln!(out, "AntiAlias: 1");
    let _ = writeln!(out, "FitToEm: 0");
    let _ = writeln!(
        out,
        "BeginChars: {} {}",
        UNICODE_FULL_SLOTS,
        project.glyphs.len()
    );
}

fn write_glyph(out: &mut String, glyph: &GlyphData, glyph_index: usize) {
    let codepoint = glyph.codepoint as u32;
    let _ = writeln!(out);
    let _ = writeln!(out, "StartChar: {}", glyph.name);
    let _ = writeln!(out, "Encoding: {codepoint} {codepoint} {glyph_index}");
    let _ = writeln!(out, "Width: {}", glyph.advance_width);
    let _ = writeln!(out, "VWidth: 0");
    let _ = writeln!(out, "Flags: W");
    let _ = writeln!(out, "LayerCount: 2");
    if let Some(outline) = &glyph.outline {
        let _ = writeln!(out, "Fore");
        let _ = writeln!(out, "SplineSet");
        for contour in &outline.contours {
            write_contour(out, contour, &glyph.name);
        }
        let _ = writeln!(out, "EndSplineSet");
    }
    let _ = writeln!(out, "EndChar");
}

fn write_contour(out: &mut String, contour: &ContourData, glyph_name: &str) {
    let Some(segments) = contour.to_segments() else {
        warn!("Skipping a contour of {glyph_name} with no valid segments");
        return;
    };
    let count = segments.len();
    if count == 0 {
        return;
    }

    // The end of segment k joins it to segment k + 1
    let flag = |k: usize| {
        let smooth = matches!(
            (end_tangent(&segments[k]), start_tangent(&segments[(k + 1) % count])),
            (Some(a), Some(b)) if is_smooth_join(a, b)
        );
        if smooth {
            FLAG_SMOOTH
        } else {
            FLAG_CORNER
        }
    };

    let start = segments[0].start();
    let _ = writeln!(out, "{} m {}", format_point(start), flag(count - 1));
    for (k, segment) in segments.iter().enumerate() {
        match segment {
            PathSeg::Line(line) => {
                let _ = writeln!(out, " {} l {}", format_point(line.p1), flag(k));
            }
            PathSeg::Quad(quad) => {
                let cubic = quad.raise();
                let _ = writeln!(
                    out,
                    " {} {} {} c {}",
                    format_point(cubic.p1),
                    format_point(cubic.p2),
                    format_point(cubic.p3),
                    flag(k)
                );
            }
            PathSeg::Cubic(cubic) => {
                let _ = writeln!(
                    out,
                    " {} {} {} c {}",
                    format_point(cubic.p1),
                    format_point(cubic.p2),
                    format_point(cubic.p3),
                    flag(k)
                );
            }
        }
    }
}

fn format_point(point: Point) -> String {
    format!("{} {}", format_number(point.x), format_number(point.y))
}

/// Integers print bare, everything else with at most four decimals
fn format_number(value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() < 1e-9 {
        return format!("{}", rounded as i64);
    }
    let text = format!("{value:.4}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::{
        FontIdentity, FontMetrics, OutlineData, DEFAULT_FAMILY_NAME,
    };
    use kurbo::{CubicBez, Line, QuadBez};
    use std::collections::BTreeMap;

    fn glyph(codepoint: char, width: u32, outline: Option<OutlineData>) -> GlyphData {
        GlyphData {
            codepoint,
            name: crate::font_source::glyph_name_for(codepoint),
            basename: codepoint.to_string(),
            advance_width: width,
            outline,
        }
    }

    fn square() -> ContourData {
        let corners = [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)];
        let segments: Vec<PathSeg> = (0..4)
            .map(|i| PathSeg::Line(Line::new(corners[i], corners[(i + 1) % 4])))
            .collect();
        ContourData::from_segments(&segments)
    }

    fn project(glyphs: Vec<GlyphData>) -> FontProject {
        FontProject {
            identity: FontIdentity::fixed(DEFAULT_FAMILY_NAME),
            metrics: FontMetrics::default(),
            glyphs: glyphs.into_iter().map(|g| (g.codepoint, g)).collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn test_header_carries_identity_and_metrics() {
        let text = render_sfd(&project(Vec::new()));
        assert!(text.starts_with("SplineFontDB: 3.0\n"));
        assert!(text.contains("FontName: STDevGen_1stMix\n"));
        assert!(text.contains("FullName: STDevGen_1stMix-Normal\n"));
        assert!(text.contains("FamilyName: STDevGen_1stMix\n"));
        assert!(text.contains("Ascent: 800\n"));
        assert!(text.contains("Descent: 200\n"));
        assert!(text.contains("BeginChars: 1114112 0\n"));
        assert!(text.ends_with("EndChars\nEndSplineFont\n"));
    }

    #[test]
    fn test_glyphs_in_codepoint_order() {
        let text = render_sfd(&project(vec![
            glyph('A', 700, Some(OutlineData { contours: vec![square()] })),
            glyph(' ', 600, None),
        ]));
        let space = text.find("StartChar: uni0020").unwrap();
        let a = text.find("StartChar: uni0041").unwrap();
        assert!(space < a);
        assert!(text.contains("Encoding: 32 32 0\nWidth: 600\n"));
        assert!(text.contains("Encoding: 65 65 1\nWidth: 700\n"));
    }

    #[test]
    fn test_spacing_only_glyph_has_no_spline_set() {
        let text = render_sfd(&project(vec![glyph(' ', 600, None)]));
        assert!(!text.contains("SplineSet"));
        assert!(text.contains("LayerCount: 2\nEndChar\n"));
    }

    #[test]
    fn test_empty_outline_keeps_empty_spline_set() {
        let text = render_sfd(&project(vec![glyph('A', 700, Some(OutlineData::default()))]));
        assert!(text.contains("Fore\nSplineSet\nEndSplineSet\n"));
    }

    #[test]
    fn test_square_contour_closes_on_start() {
        let text = render_sfd(&project(vec![glyph(
            'A',
            700,
            Some(OutlineData { contours: vec![square()] }),
        )]));
        let expected = "SplineSet\n0 0 m 1\n 100 0 l 1\n 100 100 l 1\n 0 100 l 1\n 0 0 l 1\nEndSplineSet\n";
        assert!(text.contains(expected), "{text}");
    }

    #[test]
    fn test_quadratic_segments_are_raised() {
        let segments = vec![
            PathSeg::Quad(QuadBez::new((0.0, 0.0), (30.0, 90.0), (60.0, 0.0))),
            PathSeg::Line(Line::new((60.0, 0.0), (30.0, -30.0))),
            PathSeg::Line(Line::new((30.0, -30.0), (0.0, 0.0))),
        ];
        let contour = ContourData::from_segments(&segments);
        let text = render_sfd(&project(vec![glyph(
            'A',
            700,
            Some(OutlineData { contours: vec![contour] }),
        )]));
        assert!(text.contains(" 20 60 40 60 60 0 c 1\n"), "{text}");
    }

    #[test]
    fn test_smooth_joins_are_flagged() {
        let segments = vec![
            PathSeg::Cubic(CubicBez::new((0.0, 0.0), (0.0, 50.0), (25.0, 100.0), (50.0, 100.0))),
            PathSeg::Cubic(CubicBez::new((50.0, 100.0), (75.0, 100.0), (100.0, 50.0), (100.0, 0.0))),
            PathSeg::Line(Line::new((100.0, 0.0), (0.0, 0.0))),
        ];
        let contour = ContourData::from_segments(&segments);
        let text = render_sfd(&project(vec![glyph(
            'o',
            500,
            Some(OutlineData { contours: vec![contour] }),
        )]));
        assert!(text.contains(" 0 50 25 100 50 100 c 0\n"), "{text}");
        assert!(text.contains(" 75 100 100 50 100 0 c 1\n"), "{text}");
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(format_number(600.0), "600");
        assert_eq!(format_number(-200.0), "-200");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(1.0 / 3.0), "0.3333");
        assert_eq!(format_number(-0.00001), "0");
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let build = || {
            render_sfd(&project(vec![
                glyph(' ', 600, None),
                glyph('A', 700, Some(OutlineData { contours: vec![square()] })),
            ]))
        };
        assert_eq!(build(), build());
    }
}
