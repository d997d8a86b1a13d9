use std::{cmp::Ordering, collections::BTreeSet};

use crate::{
    geom::Point,
    order::{compare_points, PointKey},
};

/// The points that the sweep still has to visit, in sweep order.
///
/// Points that are equal up to the tolerance are only stored once: pushing a
/// point that's already present does nothing. The queue also remembers the
/// last point it handed out, and refuses to accept anything that isn't
/// strictly after it.
#[derive(Clone, Debug)]
pub struct EventQueue {
    points: BTreeSet<PointKey>,
    last: Option<Point>,
    eps: f64,
}

impl EventQueue {
    /// Creates an empty queue, comparing points with tolerance `eps`.
    pub fn new(eps: f64) -> Self {
        EventQueue {
            points: BTreeSet::new(),
            last: None,
            eps,
        }
    }

    /// Adds a point to the queue.
    ///
    /// Returns true if the point was new. Scheduling a point at or before the
    /// most recently popped one is a bug in the caller: it panics in debug
    /// builds, and it gets logged and ignored in release builds.
    pub fn push(&mut self, p: Point) -> bool {
        if let Some(last) = &self.last {
            let in_past = compare_points(&p, last, self.eps) != Ordering::Greater;
            debug_assert!(
                !in_past,
                "event {p:?} scheduled at or before the current event {last:?}"
            );
            if in_past {
                tracing::error!(point = ?p, current = ?last, "dropping event scheduled in the past");
                return false;
            }
        }
        self.points.insert(PointKey::new(p, self.eps))
    }

    /// Removes and returns the first point in sweep order.
    pub fn pop(&mut self) -> Option<Point> {
        let p = self.points.pop_first()?.point;
        self.last = Some(p);
        Some(p)
    }

    /// The next point that [`EventQueue::pop`] would return.
    pub fn peek(&self) -> Option<&Point> {
        self.points.first().map(|k| &k.point)
    }

    /// Are there no more points to visit?
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The number of points still to visit.
    pub fn len(&self) -> usize {
        self.points.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn sweep_order() {
        let mut q = EventQueue::new(EPS);
        assert!(q.push(Point::new(1.0, 0.0)));
        assert!(q.push(Point::new(0.0, 0.0)));
        assert!(q.push(Point::new(3.0, 2.0)));
        assert!(!q.push(Point::new(1.0 + 1e-12, 0.0)));
        assert_eq!(q.len(), 3);

        assert_eq!(q.peek(), Some(&Point::new(3.0, 2.0)));
        assert_eq!(q.pop(), Some(Point::new(3.0, 2.0)));
        assert_eq!(q.pop(), Some(Point::new(0.0, 0.0)));

        // Still in the future.
        assert!(q.push(Point::new(0.5, 0.0)));
        assert_eq!(q.pop(), Some(Point::new(0.5, 0.0)));
        assert_eq!(q.pop(), Some(Point::new(1.0, 0.0)));
        assert_eq!(q.pop(), None);
        assert!(q.is_empty());
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "at or before the current event"))]
    fn scheduling_in_the_past() {
        let mut q = EventQueue::new(EPS);
        q.push(Point::new(0.0, 1.0));
        q.push(Point::new(0.0, 0.0));
        q.pop();
        assert!(!q.push(Point::new(0.0, 1.0)));
        assert_eq!(q.len(), 1);
    }
}
