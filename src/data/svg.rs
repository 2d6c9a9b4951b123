//! SVG shape loading
//!
//! Each ink-bearing glyph is drawn in its own SVG file, `<basename>.svg`,
//! under the shapes directory. Every `<path>` and `<polygon>` contributes
//! closed contours. Coordinates are flipped from SVG's y-down space into
//! font units with the baseline at the bottom of the document's view box.

use crate::core::errors::BuildError;
use crate::data::OutlineSource;
use crate::font_source::{ContourData, OutlineData};
use kurbo::{Affine, BezPath, CubicBez, Line, ParamCurve, PathEl, PathSeg, Point, QuadBez};
use std::fs;
use std::io;
use std::path::PathBuf;
use svg::node::element::tag::Type;
use svg::parser::Event;
use tracing::debug;

/// Shapes directory used when neither the CLI nor the config file sets one
pub const DEFAULT_SHAPES_DIR: &str = "tight-shapes";

/// File extension of shape resources
pub const SHAPE_EXTENSION: &str = "svg";

/// Loads glyph outlines from SVG files under a shapes directory
#[derive(Clone, Debug)]
pub struct SvgShapeLoader {
    root: PathBuf,
}

impl SvgShapeLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the shape resource for a basename
    pub fn shape_path(&self, basename: &str) -> PathBuf {
        self.root.join(format!("{basename}.{SHAPE_EXTENSION}"))
    }
}

impl OutlineSource for SvgShapeLoader {
    fn load_outline(&self, basename: &str) -> Result<OutlineData, BuildError> {
        let path = self.shape_path(basename);
        let content = fs::read_to_string(&path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                BuildError::ResourceNotFound {
                    basename: basename.to_string(),
                    path: path.clone(),
                }
            } else {
                BuildError::ResourceUnreadable {
                    basename: basename.to_string(),
                    path: path.clone(),
                    source,
                }
            }
        })?;

        let outline =
            parse_svg_outline(&content).map_err(|reason| BuildError::MalformedGeometry {
                basename: basename.to_string(),
                path: path.clone(),
                reason,
            })?;
        debug!(
            "Loaded {} contour(s) from {}",
            outline.contours.len(),
            path.display()
        );
        Ok(outline)
    }
}

/// Parse an SVG document into an outline in font coordinates
pub fn parse_svg_outline(content: &str) -> Result<OutlineData, String> {
    let mut frame: Option<ViewFrame> = None;
    let mut paths = Vec::new();

    let parser = svg::read(content).map_err(|e| format!("unreadable SVG: {e}"))?;
    for event in parser {
        match event {
            Event::Error(error) => return Err(format!("invalid SVG: {error}")),
            Event::Tag("svg", kind, attributes) if !matches!(kind, Type::End) => {
                if frame.is_none() {
                    frame = Some(ViewFrame::from_attributes(
                        attributes.get("viewBox").map(|v| v.to_string()).as_deref(),
                        attributes.get("height").map(|v| v.to_string()).as_deref(),
                    ));
                }
            }
            Event::Tag("path", kind, attributes) if !matches!(kind, Type::End) => {
                if let Some(data) = attributes.get("d") {
                    let path = BezPath::from_svg(&data.to_string())
                        .map_err(|e| format!("invalid path data: {e}"))?;
                    paths.push(path);
                }
            }
            Event::Tag("polygon", kind, attributes) if !matches!(kind, Type::End) => {
                if let Some(points) = attributes.get("points") {
                    paths.push(polygon_path(&points.to_string())?);
                }
            }
            _ => {}
        }
    }

    let transform = frame.unwrap_or_default().to_font_space();
    let mut contours = Vec::new();
    for mut path in paths {
        path.apply_affine(transform);
        contours.extend(
            closed_subpaths(&path)?
                .iter()
                .map(|segments| ContourData::from_segments(segments)),
        );
    }
    Ok(OutlineData { contours })
}

/// The document area that maps onto the em
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct ViewFrame {
    min_x: f64,
    min_y: f64,
    height: f64,
}

impl ViewFrame {
    fn from_attributes(view_box: Option<&str>, height: Option<&str>) -> Self {
        if let Some(values) = view_box.and_then(|v| parse_numbers(v).ok()) {
            if let [min_x, min_y, _width, height] = values[..] {
                return Self {
                    min_x,
                    min_y,
                    height,
                };
            }
        }
        let height = height.and_then(leading_number).unwrap_or(0.0);
        Self {
            height,
            ..Self::default()
        }
    }

    /// `x' = x - min_x`, `y' = (min_y + height) - y`
    fn to_font_space(self) -> Affine {
        Affine::new([1.0, 0.0, 0.0, -1.0, -self.min_x, self.min_y + self.height])
    }
}

/// Numeric prefix of a length such as `"1000px"`
fn leading_number(value: &str) -> Option<f64> {
    let value = value.trim();
    let end = value
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')))
        .unwrap_or(value.len());
    value[..end].parse().ok()
}

fn parse_numbers(list: &str) -> Result<Vec<f64>, String> {
    list.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| format!("invalid number '{token}'"))
        })
        .collect()
}

fn polygon_path(points: &str) -> Result<BezPath, String> {
    let values = parse_numbers(points)?;
    if values.len() % 2 != 0 {
        return Err("polygon has an odd number of coordinates".to_string());
    }
    let mut path = BezPath::new();
    for (i, pair) in values.chunks_exact(2).enumerate() {
        let point = Point::new(pair[0], pair[1]);
        if i == 0 {
            path.move_to(point);
        } else {
            path.line_to(point);
        }
    }
    if !path.elements().is_empty() {
        path.close_path();
    }
    Ok(path)
}

/// Split a path into closed segment chains, one per sub-path
///
/// Open sub-paths are closed with a straight line, as SVG does when filling.
/// A drawing command before any moveto, or a non-finite coordinate, makes the
/// whole path malformed.
fn closed_subpaths(path: &BezPath) -> Result<Vec<Vec<PathSeg>>, String> {
    let mut subpaths = Vec::new();
    let mut current: Vec<PathSeg> = Vec::new();
    let mut start: Option<Point> = None;
    let mut last = Point::ZERO;

    for element in path.elements() {
        if !element_points(element).iter().all(|p| p.is_finite()) {
            return Err("non-finite coordinate".to_string());
        }
        match *element {
            PathEl::MoveTo(point) => {
                finish_subpath(&mut subpaths, &mut current, start, last);
                start = Some(point);
                last = point;
            }
            PathEl::ClosePath => {
                let origin = start.ok_or("closepath before the first moveto")?;
                finish_subpath(&mut subpaths, &mut current, start, last);
                // Drawing may continue from the sub-path's start
                last = origin;
            }
            _ => {
                if start.is_none() {
                    return Err("drawing command before the first moveto".to_string());
                }
                if let Some(segment) = drawing_segment(last, element) {
                    last = segment.end();
                    current.push(segment);
                }
            }
        }
    }
    finish_subpath(&mut subpaths, &mut current, start, last);

    Ok(subpaths)
}

fn finish_subpath(
    subpaths: &mut Vec<Vec<PathSeg>>,
    current: &mut Vec<PathSeg>,
    start: Option<Point>,
    last: Point,
) {
    let Some(start) = start else {
        return;
    };
    if current.is_empty() {
        return;
    }
    if last != start {
        current.push(PathSeg::Line(Line::new(last, start)));
    }
    current.retain(|segment| !matches!(segment, PathSeg::Line(line) if line.p0 == line.p1));
    if !current.is_empty() {
        subpaths.push(std::mem::take(current));
    }
    current.clear();
}

fn drawing_segment(from: Point, element: &PathEl) -> Option<PathSeg> {
    match *element {
        PathEl::LineTo(p) => Some(PathSeg::Line(Line::new(from, p))),
        PathEl::QuadTo(p1, p2) => Some(PathSeg::Quad(QuadBez::new(from, p1, p2))),
        PathEl::CurveTo(p1, p2, p3) => Some(PathSeg::Cubic(CubicBez::new(from, p1, p2, p3))),
        PathEl::MoveTo(_) | PathEl::ClosePath => None,
    }
}

fn element_points(element: &PathEl) -> Vec<Point> {
    match *element {
        PathEl::MoveTo(p) | PathEl::LineTo(p) => vec![p],
        PathEl::QuadTo(p1, p2) => vec![p1, p2],
        PathEl::CurveTo(p1, p2, p3) => vec![p1, p2, p3],
        PathEl::ClosePath => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::PointTypeData;

    const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 1000 1000">
  <path d="M100 900 L500 900 L500 500 L100 500 Z"/>
</svg>"#;

    fn on_curve_points(contour: &ContourData) -> Vec<(f64, f64)> {
        contour
            .points
            .iter()
            .filter(|p| p.point_type.is_on_curve())
            .map(|p| (p.x, p.y))
            .collect()
    }

    #[test]
    fn test_square_is_flipped_into_font_space() {
        let outline = parse_svg_outline(SQUARE).unwrap();
        assert_eq!(outline.contours.len(), 1);
        let points = on_curve_points(&outline.contours[0]);
        assert_eq!(points.len(), 4);
        assert!(points.contains(&(100.0, 100.0)));
        assert!(points.contains(&(500.0, 500.0)));
    }

    #[test]
    fn test_height_attribute_without_view_box() {
        let svg = r#"<svg height="800px"><path d="M0 0 L10 0 L10 10 Z"/></svg>"#;
        let outline = parse_svg_outline(svg).unwrap();
        let points = on_curve_points(&outline.contours[0]);
        assert!(points.contains(&(0.0, 800.0)));
        assert!(points.contains(&(10.0, 790.0)));
    }

    #[test]
    fn test_open_subpaths_are_closed() {
        let svg = r#"<svg viewBox="0 0 100 100"><path d="M0 0 l50 0 l0 50 M60 60 h10 v10 h-10 z"/></svg>"#;
        let outline = parse_svg_outline(svg).unwrap();
        assert_eq!(outline.contours.len(), 2);
        assert_eq!(outline.contours[0].on_curve_count(), 3);
        assert_eq!(outline.contours[1].on_curve_count(), 4);
        assert!(outline.contours[0]
            .points
            .iter()
            .all(|p| p.point_type == PointTypeData::Line));
    }

    #[test]
    fn test_curves_keep_their_handles() {
        let svg = r#"<svg viewBox="0 0 100 100"><path d="M0 100 C0 0 100 0 100 100 Q50 150 0 100 Z"/></svg>"#;
        let outline = parse_svg_outline(svg).unwrap();
        let contour = &outline.contours[0];
        assert_eq!(contour.on_curve_count(), 2);
        assert_eq!(contour.points.len(), 5);
        assert_eq!(contour.points[0].point_type, PointTypeData::QCurve);
    }

    #[test]
    fn test_polygon_elements() {
        let svg = r#"<svg viewBox="0 0 10 10"><polygon points="0,0 10,0 5,10"/></svg>"#;
        let outline = parse_svg_outline(svg).unwrap();
        assert_eq!(outline.contours.len(), 1);
        assert_eq!(outline.contours[0].on_curve_count(), 3);
    }

    #[test]
    fn test_document_without_paths_is_empty() {
        let outline = parse_svg_outline(r#"<svg viewBox="0 0 10 10"></svg>"#).unwrap();
        assert!(outline.is_empty());
    }

    #[test]
    fn test_malformed_path_data() {
        let svg = r#"<svg viewBox="0 0 10 10"><path d="M0 0 L10 Q"/></svg>"#;
        assert!(parse_svg_outline(svg).is_err());
    }

    #[test]
    fn test_non_finite_coordinates_are_rejected() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((f64::INFINITY, 0.0));
        path.line_to((0.0, 10.0));
        let error = closed_subpaths(&path).unwrap_err();
        assert!(error.contains("non-finite"));
    }

    #[test]
    fn test_loader_reports_missing_shape() {
        let dir = tempfile::tempdir().unwrap();
        let loader = SvgShapeLoader::new(dir.path());
        let error = loader.load_outline("A").unwrap_err();
        assert_eq!(error.kind(), "ResourceNotFound");
        assert!(error.to_string().contains("'A'"));
    }

    #[test]
    fn test_loader_reads_shape_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("A.svg"), SQUARE).unwrap();
        let loader = SvgShapeLoader::new(dir.path());

        assert_eq!(loader.shape_path("A"), dir.path().join("A.svg"));
        let outline = loader.load_outline("A").unwrap();
        assert_eq!(outline.contours.len(), 1);
    }

    #[test]
    fn test_loader_reports_malformed_shape() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("B.svg"),
            r#"<svg viewBox="0 0 10 10"><path d="M0 0 X 5"/></svg>"#,
        )
        .unwrap();
        let error = SvgShapeLoader::new(dir.path()).load_outline("B").unwrap_err();
        assert_eq!(error.kind(), "MalformedGeometry");
    }
}
