//! Outline simplification
//!
//! Removes points that do not change a contour's shape by more than a
//! tolerance, measured against the finished outline rather than step by
//! step:
//!
//! 1. a curve whose handles lie within tolerance of its chord becomes a line;
//! 2. the contour start and every curve end are anchors and always stay;
//!    a contour made only of lines also anchors the point farthest from its
//!    start;
//! 3. each run of lines between two anchors is reduced by recursive chord
//!    splitting: when every point of the run lies within tolerance of the
//!    chord joining the run's ends, the run becomes that chord, otherwise
//!    the farthest point is kept and both halves are reduced in turn.
//!
//! Every removed point therefore lies within tolerance of the segment that
//! replaced it. Reducing a reduced contour finds the same anchors and the
//! same farthest points, so simplifying twice gives the same outline as
//! simplifying once.

use crate::font_source::{ContourData, OutlineData, PointTypeData};
use crate::geometry::utilities::distance_to_segment;
use kurbo::{Line, ParamCurve, PathSeg, Point};

/// Maximum deviation, in font units, a simplification may introduce
pub const DEFAULT_TOLERANCE: f64 = 1.0;

/// Contours with fewer on-curve points are left alone, and no reduction may
/// bring a contour below this count
const MIN_ON_CURVE_POINTS: usize = 3;

/// Simplify every contour of an outline
pub fn simplify_outline(outline: &OutlineData, tolerance: f64) -> OutlineData {
    OutlineData {
        contours: outline
            .contours
            .iter()
            .map(|contour| simplify_contour(contour, tolerance))
            .collect(),
    }
}

/// Simplify one contour, returning it unchanged when nothing can be removed
pub fn simplify_contour(contour: &ContourData, tolerance: f64) -> ContourData {
    if has_implied_points(contour) {
        return contour.clone();
    }
    let Some(segments) = contour.to_segments() else {
        return contour.clone();
    };
    if segments.len() < MIN_ON_CURVE_POINTS {
        return contour.clone();
    }

    let flattened: Vec<PathSeg> = segments
        .iter()
        .map(|segment| {
            if is_flat(segment, tolerance) {
                PathSeg::Line(Line::new(segment.start(), segment.end()))
            } else {
                *segment
            }
        })
        .collect();

    let vertices: Vec<Point> = flattened.iter().map(|segment| segment.start()).collect();
    let anchors = anchor_vertices(&flattened, &vertices);
    let mut keep = vec![false; vertices.len()];
    for (i, &anchor) in anchors.iter().enumerate() {
        keep[anchor] = true;
        let next = anchors[(i + 1) % anchors.len()];
        let run = cyclic_run(anchor, next, vertices.len());
        reduce_run(&vertices, &run, tolerance, &mut keep);
    }

    let kept: Vec<usize> = (0..vertices.len()).filter(|&idx| keep[idx]).collect();
    if kept.len() < MIN_ON_CURVE_POINTS {
        return contour.clone();
    }

    let reduced: Vec<PathSeg> = kept
        .iter()
        .enumerate()
        .map(|(i, &from)| {
            let to = kept[(i + 1) % kept.len()];
            if to == (from + 1) % vertices.len() {
                flattened[from]
            } else {
                PathSeg::Line(Line::new(vertices[from], vertices[to]))
            }
        })
        .collect();

    if reduced == segments {
        contour.clone()
    } else {
        ContourData::from_segments(&reduced)
    }
}

/// A run of two or more handles before a quadratic point implies on-curve
/// points between them; rebuilding such a contour would make them explicit
fn has_implied_points(contour: &ContourData) -> bool {
    let count = contour.points.len();
    let Some(start) = contour
        .points
        .iter()
        .position(|p| p.point_type.is_on_curve())
    else {
        return false;
    };

    let mut handles = 0;
    for step in 1..=count {
        match contour.points[(start + step) % count].point_type {
            PointTypeData::OffCurve => handles += 1,
            PointTypeData::QCurve if handles > 1 => return true,
            _ => handles = 0,
        }
    }
    false
}

/// A curve is flat when its handles stay within tolerance of the chord; the
/// curve then lies within tolerance of the chord too
fn is_flat(segment: &PathSeg, tolerance: f64) -> bool {
    let (start, end) = (segment.start(), segment.end());
    if start == end {
        return false;
    }
    let handles: Vec<Point> = match segment {
        PathSeg::Line(_) => return false,
        PathSeg::Quad(quad) => vec![quad.p1],
        PathSeg::Cubic(cubic) => vec![cubic.p1, cubic.p2],
    };
    handles
        .into_iter()
        .all(|handle| distance_to_segment(handle, start, end) <= tolerance)
}

/// Indices of the vertices that always survive, in contour order
///
/// Vertex `k` is where segment `k` starts.
fn anchor_vertices(segments: &[PathSeg], vertices: &[Point]) -> Vec<usize> {
    let count = segments.len();
    let is_curve = |idx: usize| !matches!(segments[idx], PathSeg::Line(_));
    let mut anchors: Vec<usize> = (0..count)
        .filter(|&k| k == 0 || is_curve(k) || is_curve((k + count - 1) % count))
        .collect();

    if anchors.len() == 1 {
        // First farthest point wins, so the choice survives a second pass
        let origin = vertices[0];
        let mut farthest = None;
        let mut best = 0.0;
        for (k, vertex) in vertices.iter().enumerate().skip(1) {
            let distance = (*vertex - origin).hypot();
            if distance > best {
                best = distance;
                farthest = Some(k);
            }
        }
        anchors.extend(farthest);
    }
    anchors
}

/// Vertex indices from `from` to `to` inclusive, walking forward and
/// wrapping around the contour
fn cyclic_run(from: usize, to: usize, count: usize) -> Vec<usize> {
    let length = (to + count - from) % count;
    let length = if length == 0 { count } else { length };
    (0..=length).map(|step| (from + step) % count).collect()
}

/// Recursive chord splitting over one run of line vertices
fn reduce_run(vertices: &[Point], run: &[usize], tolerance: f64, keep: &mut [bool]) {
    if run.len() < 3 {
        return;
    }
    let (a, b) = (vertices[run[0]], vertices[run[run.len() - 1]]);

    let mut split = 0;
    let mut worst = tolerance;
    for (i, &idx) in run.iter().enumerate().take(run.len() - 1).skip(1) {
        let distance = distance_to_segment(vertices[idx], a, b);
        if distance > worst {
            worst = distance;
            split = i;
        }
    }
    if split == 0 {
        return;
    }

    keep[run[split]] = true;
    reduce_run(vertices, &run[..=split], tolerance, keep);
    reduce_run(vertices, &run[split..], tolerance, keep);
}
