//! Tolerance-aware geometric predicates.

use crate::geom::{Point, Segment};

/// Which way a path turns as it passes through three points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// The points are collinear, up to the tolerance.
    Collinear,
    /// The path turns clockwise (i.e. to the right, with `y` pointing up).
    Clockwise,
    /// The path turns counter-clockwise.
    CounterClockwise,
}

fn cross(p: &Point, q: &Point, r: &Point) -> f64 {
    (q.x - p.x) * (r.y - q.y) - (q.y - p.y) * (r.x - q.x)
}

/// The orientation of the path `p -> q -> r`.
///
/// This is the sign of the cross product of `q - p` and `r - q`, which is
/// declared to be zero if its magnitude is below `eps`. Note that the cross
/// product scales with the square of the inputs' magnitudes, so this is a
/// fairly strict notion of collinearity for large inputs.
pub fn orientation(p: &Point, q: &Point, r: &Point, eps: f64) -> Orientation {
    let c = cross(p, q, r);
    if c.abs() < eps {
        Orientation::Collinear
    } else if c > 0.0 {
        Orientation::CounterClockwise
    } else {
        Orientation::Clockwise
    }
}

/// Does `p` lie on `seg`, up to `eps`?
///
/// `p` must be within distance `eps` of the line through `seg`, and it must
/// be within the bounding box of `seg` expanded by `eps` on every side.
///
/// Unlike [`orientation`], which compares the raw cross product with `eps`,
/// this divides the cross product by the segment's length. That makes the
/// test a distance, so whether a point touches a segment doesn't depend on
/// how long the segment is.
pub fn point_on_segment(seg: &Segment, p: &Point, eps: f64) -> bool {
    let bbox = seg.bounding_box().inflate(eps, eps);
    if p.x < bbox.x0 || p.x > bbox.x1 || p.y < bbox.y0 || p.y > bbox.y1 {
        return false;
    }

    let len = seg.length();
    if len <= eps {
        // Within the inflated box of a (nearly) zero-length segment is close enough.
        return true;
    }
    cross(&seg.upper, &seg.lower, p).abs() / len <= eps
}

/// Finds the point where two segments cross, if they do.
///
/// Parallel segments (including collinear ones that overlap) never intersect
/// according to this function; the sweep discovers the endpoints of
/// overlapping segments as events of their own.
pub fn intersect(a: &Segment, b: &Segment, eps: f64) -> Option<Point> {
    let (p1, p2) = (a.upper, a.lower);
    let (p3, p4) = (b.upper, b.lower);

    let det = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    if det.abs() < eps {
        return None;
    }

    let t = ((p1.x - p3.x) * (p3.y - p4.y) - (p1.y - p3.y) * (p3.x - p4.x)) / det;
    let u = -((p1.x - p2.x) * (p1.y - p3.y) - (p1.y - p2.y) * (p1.x - p3.x)) / det;

    let in_range = |s: f64| (-eps..=1.0 + eps).contains(&s);
    if in_range(t) && in_range(u) {
        Some(p1.affine(&p2, t))
    } else {
        None
    }
}
