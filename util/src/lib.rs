use kurbo::{BezPath, PathEl, Rect, Shape};
use svg::node::element::{Circle, Line};

/// Collects every path in an svg tree as a kurbo path, with transforms applied.
///
/// Each sub-path (i.e. each `MoveTo`) becomes its own `BezPath`, so that a path
/// with holes comes out as several contours.
pub fn svg_to_bezpaths(tree: &usvg::Tree) -> Vec<BezPath> {
    let mut ret = Vec::new();

    fn pt(p: usvg::tiny_skia_path::Point) -> kurbo::Point {
        kurbo::Point::new(p.x as f64, p.y as f64)
    }

    fn add_group(group: &usvg::Group, ret: &mut Vec<BezPath>) {
        for child in group.children() {
            match child {
                usvg::Node::Group(group) => add_group(group, ret),
                usvg::Node::Path(path) => {
                    let Some(data) = path.data().clone().transform(path.abs_transform()) else {
                        continue;
                    };
                    let mut current = BezPath::new();
                    for seg in data.segments() {
                        use usvg::tiny_skia_path::PathSegment;
                        match seg {
                            PathSegment::MoveTo(p) => {
                                if current.elements().len() > 1 {
                                    ret.push(std::mem::take(&mut current));
                                }
                                current = BezPath::new();
                                current.move_to(pt(p));
                            }
                            PathSegment::LineTo(p) => current.line_to(pt(p)),
                            PathSegment::QuadTo(p0, p1) => current.quad_to(pt(p0), pt(p1)),
                            PathSegment::CubicTo(p0, p1, p2) => {
                                current.curve_to(pt(p0), pt(p1), pt(p2))
                            }
                            PathSegment::Close => current.close_path(),
                        }
                    }
                    if current.elements().len() > 1 {
                        ret.push(current);
                    }
                }
                _ => {}
            }
        }
    }

    add_group(tree.root(), &mut ret);
    ret
}

/// Flattens paths into polylines, with every curve approximated to within `tolerance`.
///
/// Closed sub-paths end with a copy of their first point, so consecutive
/// pairs of points always describe the full outline.
pub fn flatten_to_polylines(paths: &[BezPath], tolerance: f64) -> Vec<Vec<(f64, f64)>> {
    let mut ret = Vec::new();
    for path in paths {
        let mut points: Vec<(f64, f64)> = Vec::new();
        kurbo::flatten(path.elements().iter().cloned(), tolerance, |el| match el {
            PathEl::MoveTo(p) => {
                if points.len() > 1 {
                    ret.push(std::mem::take(&mut points));
                }
                points.clear();
                points.push((p.x, p.y));
            }
            PathEl::LineTo(p) => points.push((p.x, p.y)),
            PathEl::ClosePath => {
                if let Some(&first) = points.first() {
                    if points.last() != Some(&first) {
                        points.push(first);
                    }
                }
            }
            PathEl::QuadTo(..) | PathEl::CurveTo(..) => unreachable!(),
        });
        if points.len() > 1 {
            ret.push(points);
        }
    }
    ret
}

/// The smallest rectangle containing all the paths.
pub fn bounding_box<'a>(paths: impl IntoIterator<Item = &'a BezPath>) -> Rect {
    let mut rect = Rect::new(
        f64::INFINITY,
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::NEG_INFINITY,
    );

    for p in paths {
        rect = rect.union(p.bounding_box());
    }
    rect
}

/// Draws line segments in grey and marks the given points with red dots.
///
/// The view box is padded by `pad` on every side of `bbox`.
pub fn crossings_document(
    bbox: Rect,
    pad: f64,
    segments: impl IntoIterator<Item = ((f64, f64), (f64, f64))>,
    points: impl IntoIterator<Item = (f64, f64)>,
) -> svg::Document {
    let stroke_width = bbox.width().max(bbox.height()) / 512.0;
    let dot_radius = stroke_width * 2.5;
    let mut document = svg::Document::new().set(
        "viewBox",
        (
            bbox.min_x() - pad,
            bbox.min_y() - pad,
            bbox.width() + 2.0 * pad,
            bbox.height() + 2.0 * pad,
        ),
    );

    for ((x0, y0), (x1, y1)) in segments {
        document = document.add(
            Line::new()
                .set("x1", x0)
                .set("y1", y0)
                .set("x2", x1)
                .set("y2", y1)
                .set("stroke", "grey")
                .set("stroke-width", stroke_width),
        );
    }

    for (x, y) in points {
        document = document.add(
            Circle::new()
                .set("cx", x)
                .set("cy", y)
                .set("r", dot_radius)
                .set("fill", "red")
                .set("opacity", 0.75),
        );
    }

    document
}
