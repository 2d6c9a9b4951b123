//! Geometry utility functions
//!
//! Shared vector helpers for the simplifier, the SFD writer and the point
//! conversions: segment tangents, smooth joins and point to segment
//! distances.

use kurbo::{Line, ParamCurve, ParamCurveNearest, PathSeg, Point, Vec2};

/// Below this length a vector is treated as having no direction
const DIRECTION_EPSILON: f64 = 1e-9;

/// Sine of the largest angle between two tangents that still counts as smooth
const SMOOTH_SINE: f64 = 0.02;

/// Accuracy passed to kurbo's nearest-point solver
const NEAREST_ACCURACY: f64 = 1e-6;

/// Direction leaving the start of a segment, skipping handles that sit on it
pub fn start_tangent(segment: &PathSeg) -> Option<Vec2> {
    let start = segment.start();
    let candidates: Vec<Point> = match segment {
        PathSeg::Line(line) => vec![line.p1],
        PathSeg::Quad(quad) => vec![quad.p1, quad.p2],
        PathSeg::Cubic(cubic) => vec![cubic.p1, cubic.p2, cubic.p3],
    };
    candidates
        .into_iter()
        .map(|p| p - start)
        .find(|v| v.hypot() > DIRECTION_EPSILON)
}

/// Direction arriving at the end of a segment, skipping handles that sit on it
pub fn end_tangent(segment: &PathSeg) -> Option<Vec2> {
    let end = segment.end();
    let candidates: Vec<Point> = match segment {
        PathSeg::Line(line) => vec![line.p0],
        PathSeg::Quad(quad) => vec![quad.p1, quad.p0],
        PathSeg::Cubic(cubic) => vec![cubic.p2, cubic.p1, cubic.p0],
    };
    candidates
        .into_iter()
        .map(|p| end - p)
        .find(|v| v.hypot() > DIRECTION_EPSILON)
}

/// Whether two tangents meeting at a point continue in the same direction
pub fn is_smooth_join(incoming: Vec2, outgoing: Vec2) -> bool {
    let (a, b) = (incoming.normalize(), outgoing.normalize());
    a.cross(b).abs() < SMOOTH_SINE && a.dot(b) > 0.0
}

/// Distance from a point to the closed segment between `a` and `b`
pub fn distance_to_segment(point: Point, a: Point, b: Point) -> f64 {
    Line::new(a, b)
        .nearest(point, NEAREST_ACCURACY)
        .distance_sq
        .sqrt()
}
