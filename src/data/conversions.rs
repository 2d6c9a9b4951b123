//! Outline format conversion utilities
//!
//! This module contains conversion logic between our outline data
//! structures, kurbo segments, and the norad UFO format. This is pure data
//! transformation logic with no I/O.

use crate::font_source::{ContourData, GlyphData, OutlineData, PointData, PointTypeData};
use crate::geometry::utilities::{end_tangent, is_smooth_join, start_tangent};
use kurbo::{CubicBez, Line, ParamCurve, PathSeg, Point, QuadBez};

impl GlyphData {
    /// Convert to a norad glyph for UFO output
    pub fn to_norad_glyph(&self) -> norad::Glyph {
        let mut glyph = norad::Glyph::new(&self.name);
        glyph.width = f64::from(self.advance_width);
        glyph.codepoints.insert(self.codepoint);

        if let Some(outline_data) = &self.outline {
            glyph.contours = outline_data.to_norad_contours();
        }

        glyph
    }
}

impl OutlineData {
    pub fn to_norad_contours(&self) -> Vec<norad::Contour> {
        self.contours
            .iter()
            .map(ContourData::to_norad_contour)
            .collect()
    }
}

impl ContourData {
    pub fn to_norad_contour(&self) -> norad::Contour {
        let points = self.points.iter().map(PointData::to_norad_point).collect();
        norad::Contour::new(points, None)
    }

    /// Build a closed contour from a chain of segments
    ///
    /// Each segment must start where the previous one ends and the last one
    /// must end at the first one's start. The start point leads the point
    /// list and carries the type of the closing segment; the closing
    /// segment's handles trail the list.
    pub fn from_segments(segments: &[PathSeg]) -> Self {
        let Some(closing) = segments.last() else {
            return Self::default();
        };

        let mut points = Vec::with_capacity(segments.len() * 3);
        points.push(PointData::new(
            closing.end().x,
            closing.end().y,
            segment_point_type(closing),
        ));
        for segment in &segments[..segments.len() - 1] {
            push_segment(&mut points, segment, true);
        }
        push_segment(&mut points, closing, false);

        // Smooth flags: on-curve point k joins segment k - 1 to segment k,
        // with the leading start point joining the closing segment to the first
        let count = segments.len();
        let on_curve_indices: Vec<usize> = points
            .iter()
            .enumerate()
            .filter(|(_, p)| p.point_type.is_on_curve())
            .map(|(idx, _)| idx)
            .collect();
        for (join, point_idx) in on_curve_indices.into_iter().enumerate() {
            let incoming = &segments[(join + count - 1) % count];
            let outgoing = &segments[join % count];
            points[point_idx].smooth = matches!(
                (end_tangent(incoming), start_tangent(outgoing)),
                (Some(a), Some(b)) if is_smooth_join(a, b)
            );
        }

        Self { points }
    }

    /// Split the contour into a closed chain of segments
    ///
    /// Returns `None` when the point list does not describe valid segments:
    /// no on-curve point, or a cubic with more than two handles.
    pub fn to_segments(&self) -> Option<Vec<PathSeg>> {
        let count = self.points.len();
        let start_idx = self.points.iter().position(|p| p.point_type.is_on_curve())?;
        let start = self.points[start_idx];

        let mut segments = Vec::new();
        let mut current = start.to_point();
        let mut pending_offcurves: Vec<Point> = Vec::new();

        for step in 1..=count {
            let point = self.points[(start_idx + step) % count];
            let pt = point.to_point();
            match point.point_type {
                PointTypeData::OffCurve => pending_offcurves.push(pt),
                PointTypeData::Move | PointTypeData::Line => {
                    if !pending_offcurves.is_empty() {
                        return None;
                    }
                    segments.push(PathSeg::Line(Line::new(current, pt)));
                    current = pt;
                }
                PointTypeData::Curve => {
                    let segment = match pending_offcurves.as_slice() {
                        [] => PathSeg::Line(Line::new(current, pt)),
                        [cp] => PathSeg::Quad(QuadBez::new(current, *cp, pt)),
                        [cp1, cp2] => PathSeg::Cubic(CubicBez::new(current, *cp1, *cp2, pt)),
                        _ => return None,
                    };
                    segments.push(segment);
                    pending_offcurves.clear();
                    current = pt;
                }
                PointTypeData::QCurve => {
                    if pending_offcurves.is_empty() {
                        segments.push(PathSeg::Line(Line::new(current, pt)));
                    } else {
                        // Implied on-curve points sit midway between handles
                        let last = pending_offcurves.len() - 1;
                        for (i, cp) in pending_offcurves.iter().enumerate() {
                            let end = if i == last {
                                pt
                            } else {
                                cp.midpoint(pending_offcurves[i + 1])
                            };
                            segments.push(PathSeg::Quad(QuadBez::new(current, *cp, end)));
                            current = end;
                        }
                        pending_offcurves.clear();
                    }
                    current = pt;
                }
            }
        }

        Some(segments)
    }
}

fn segment_point_type(segment: &PathSeg) -> PointTypeData {
    match segment {
        PathSeg::Line(_) => PointTypeData::Line,
        PathSeg::Quad(_) => PointTypeData::QCurve,
        PathSeg::Cubic(_) => PointTypeData::Curve,
    }
}

/// Append a segment's handles and, unless it closes the contour, its end point
fn push_segment(points: &mut Vec<PointData>, segment: &PathSeg, with_end: bool) {
    let handles = match segment {
        PathSeg::Line(_) => Vec::new(),
        PathSeg::Quad(quad) => vec![quad.p1],
        PathSeg::Cubic(cubic) => vec![cubic.p1, cubic.p2],
    };
    for handle in handles {
        points.push(PointData::new(handle.x, handle.y, PointTypeData::OffCurve));
    }
    if with_end {
        let end = segment.end();
        points.push(PointData::new(end.x, end.y, segment_point_type(segment)));
    }
}

impl PointData {
    pub fn to_point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn to_norad_point(&self) -> norad::ContourPoint {
        norad::ContourPoint::new(
            self.x,
            self.y,
            self.point_type.to_norad_point_type(),
            self.smooth && self.point_type.is_on_curve(),
            None, // name
            None, // identifier
        )
    }
}

impl PointTypeData {
    pub fn to_norad_point_type(&self) -> norad::PointType {
        match self {
            PointTypeData::Move => norad::PointType::Move,
            PointTypeData::Line => norad::PointType::Line,
            PointTypeData::OffCurve => norad::PointType::OffCurve,
            PointTypeData::Curve => norad::PointType::Curve,
            PointTypeData::QCurve => norad::PointType::QCurve,
        }
    }
}
