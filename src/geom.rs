//! Geometric primitives, like points and segments.

use std::cmp::Ordering;

use crate::order::compare_points;

/// A two-dimensional point.
///
/// Points don't implement `Ord`, because the order we sweep in depends on a
/// tolerance. See [`compare_points`](crate::order::compare_points) for the
/// order that drives the sweep.
#[derive(Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    ///
    /// The sweep moves from large `y` to small `y`, so the documentation
    /// and method naming assumes that larger values are up.
    pub y: f64,
}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        debug_assert!(x.is_finite());
        debug_assert!(y.is_finite());
        Point { x, y }
    }

    /// Compute an affine combination between `self` and `other`; that is, `(1 - t) * self + t * other`.
    pub fn affine(&self, other: &Self, t: f64) -> Self {
        Point {
            x: (1.0 - t) * self.x + t * other.x,
            y: (1.0 - t) * self.y + t * other.y,
        }
    }

    /// Are both coordinates within `eps` of `other`'s?
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }

    /// Convert to a kurbo point.
    pub fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<kurbo::Point> for Point {
    fn from(p: kurbo::Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// A line segment, in sweep-line order.
///
/// The `upper` endpoint is the one that the sweep visits first: it has the
/// larger `y` coordinate or, if the segment is horizontal, the smaller `x`
/// coordinate.
#[derive(Clone, Copy, PartialEq, serde::Serialize)]
pub struct Segment {
    /// The endpoint that comes first in sweep order.
    pub upper: Point,
    /// The endpoint that comes last in sweep order.
    pub lower: Point,
    /// The caller-assigned identifier, reported in intersection records.
    pub id: i64,
}

impl std::fmt::Debug for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}: {:?} -- {:?}", self.id, self.upper, self.lower)
    }
}

impl Segment {
    /// Create a new segment, putting its endpoints in sweep-line order.
    ///
    /// The two endpoints must be distinct (up to `eps`). [`Segments`](crate::Segments)
    /// checks this before constructing anything.
    pub fn new(a: Point, b: Point, id: i64, eps: f64) -> Self {
        let (upper, lower) = match compare_points(&a, &b, eps) {
            Ordering::Greater => (b, a),
            ord => {
                debug_assert_ne!(ord, Ordering::Equal, "degenerate segment {a:?} -- {b:?}");
                (a, b)
            }
        };
        Segment { upper, lower, id }
    }

    /// Returns true if this segment is horizontal, up to `eps`.
    pub fn is_horizontal(&self, eps: f64) -> bool {
        self.upper.y - self.lower.y <= eps
    }

    /// Our `x` coordinate at the given `y` coordinate.
    ///
    /// Heights outside our vertical extent are extrapolated along the segment's
    /// line. Horizontal segments have no single answer; we return the `x`
    /// coordinate of the upper (i.e. left) endpoint, and the sweep order
    /// handles them separately.
    pub fn at_y(&self, y: f64) -> f64 {
        if y == self.upper.y || self.upper.y == self.lower.y {
            self.upper.x
        } else if y == self.lower.y {
            self.lower.x
        } else {
            let t = (self.upper.y - y) / (self.upper.y - self.lower.y);
            self.upper.x + t * (self.lower.x - self.upper.x)
        }
    }

    /// How far we move horizontally for every unit that the sweep line descends.
    ///
    /// This is the slope that breaks ties between segments meeting at a point:
    /// just below the meeting point, segments with a smaller run are further
    /// left. Horizontal segments have infinite run, so they sort last.
    pub fn run(&self, eps: f64) -> f64 {
        if self.is_horizontal(eps) {
            f64::INFINITY
        } else {
            (self.lower.x - self.upper.x) / (self.upper.y - self.lower.y)
        }
    }

    /// The smallest `x` coordinate on this segment.
    pub fn min_x(&self) -> f64 {
        self.upper.x.min(self.lower.x)
    }

    /// The largest `x` coordinate on this segment.
    pub fn max_x(&self) -> f64 {
        self.upper.x.max(self.lower.x)
    }

    /// The Euclidean length of this segment.
    pub fn length(&self) -> f64 {
        (self.lower.x - self.upper.x).hypot(self.lower.y - self.upper.y)
    }

    /// Our axis-aligned bounding box.
    pub fn bounding_box(&self) -> kurbo::Rect {
        kurbo::Rect::from_points(self.upper.to_kurbo(), self.lower.to_kurbo())
    }

    /// Convert to a kurbo line, from the upper endpoint to the lower one.
    pub fn to_kurbo(&self) -> kurbo::Line {
        kurbo::Line::new(self.upper.to_kurbo(), self.lower.to_kurbo())
    }
}
