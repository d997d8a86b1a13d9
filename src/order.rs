//! The two orders that drive the sweep.
//!
//! The *point order* decides which event the sweep visits next: top to
//! bottom, and left to right among points at the same height. The *position
//! order* decides how the segments crossing the sweep line are arranged from
//! left to right. It depends on where the sweep currently is, and that
//! position is always passed in explicitly.

use std::cmp::Ordering;

use crate::{
    geom::{Point, Segment},
    num::{cmp_with_tolerance, CheapOrderedFloat},
};

/// Compares two points in sweep order.
///
/// `a` comes first (i.e. compares `Less`) if it is higher than `b` by more
/// than `eps`. If their heights are within `eps`, the one further left (by
/// more than `eps`) comes first. Otherwise they're equal.
pub fn compare_points(a: &Point, b: &Point, eps: f64) -> Ordering {
    cmp_with_tolerance(b.y, a.y, eps).then_with(|| cmp_with_tolerance(a.x, b.x, eps))
}

/// The current position of the sweep: a height, plus a horizontal coordinate
/// along the sweep line.
///
/// The horizontal coordinate only matters for horizontal segments, which
/// occupy a whole interval of the sweep line. We consider them to be at the
/// current event's position, clamped to their own extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepPosition {
    /// Horizontal coordinate of the event being processed.
    pub x: f64,
    /// Height of the sweep line.
    pub y: f64,
}

impl SweepPosition {
    /// The sweep position at an event point.
    pub fn at(p: Point) -> Self {
        SweepPosition { x: p.x, y: p.y }
    }
}

impl Segment {
    /// Our horizontal position on the sweep line.
    pub fn sweep_x(&self, pos: &SweepPosition, eps: f64) -> f64 {
        if self.is_horizontal(eps) {
            pos.x.clamp(self.min_x(), self.max_x())
        } else {
            self.at_y(pos.y)
        }
    }
}

/// Compares two segments by their left-to-right position on the sweep line.
///
/// Segments are ordered by their horizontal position at `pos`. Segments whose
/// positions are within `eps` of one another meet (approximately) at the
/// sweep line, and they are ordered by how they continue below it: by
/// ascending [`Segment::run`], so horizontal segments are last.
pub fn compare_segments(a: &Segment, b: &Segment, pos: &SweepPosition, eps: f64) -> Ordering {
    cmp_with_tolerance(a.sweep_x(pos, eps), b.sweep_x(pos, eps), eps).then_with(|| {
        CheapOrderedFloat::from(a.run(eps)).cmp(&CheapOrderedFloat::from(b.run(eps)))
    })
}

/// A point with a sweep-order `Ord` implementation, for keying ordered containers.
///
/// The tolerance is stored alongside the point because `Ord::cmp` doesn't get
/// any context. Keys that are compared with one another should always have the
/// same tolerance.
#[derive(Clone, Copy, Debug)]
pub struct PointKey {
    /// The point.
    pub point: Point,
    eps: f64,
}

impl PointKey {
    /// Wraps a point, to be compared with tolerance `eps`.
    pub fn new(point: Point, eps: f64) -> Self {
        PointKey { point, eps }
    }
}

impl Ord for PointKey {
    fn cmp(&self, other: &Self) -> Ordering {
        debug_assert_eq!(self.eps, other.eps);
        compare_points(&self.point, &other.point, self.eps)
    }
}

impl PartialOrd for PointKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PointKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PointKey {}
