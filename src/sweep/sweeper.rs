use std::{cmp::Ordering, collections::BTreeMap};

use crate::{
    geom::Point,
    order::{compare_points, PointKey, SweepPosition},
    predicates::{intersect, point_on_segment},
    segments::{SegIdx, Segments},
};

use super::{events::EventQueue, status::Status, Intersection};

/// Encapsulates the state of the sweep-line algorithm.
///
/// A `Sweeper` visits the event points (segment endpoints, and crossings as
/// they're discovered) from top to bottom. It's an iterator over the
/// intersection records, which come out in the order they're found.
#[derive(Clone, Debug)]
pub struct Sweeper<'a> {
    segments: &'a Segments,
    eps: f64,
    events: EventQueue,
    status: Status,

    // Segments keyed by their upper and lower endpoints. Entries are removed
    // when their event is handled.
    uppers: BTreeMap<PointKey, Vec<SegIdx>>,
    lowers: BTreeMap<PointKey, Vec<SegIdx>>,
    // Is the segment currently in the status?
    active: Vec<bool>,

    records: usize,
    finished: bool,
}

// The segments involved in a single event.
#[derive(Debug, Default)]
struct EventSegments {
    upper: Vec<SegIdx>,
    lower: Vec<SegIdx>,
    crossing: Vec<SegIdx>,
}

impl<'a> Sweeper<'a> {
    /// Creates a new sweeper for a collection of segments.
    ///
    /// The tolerance is taken from the arena.
    pub fn new(segments: &'a Segments) -> Self {
        let eps = segments.eps();
        let mut events = EventQueue::new(eps);
        let mut uppers: BTreeMap<PointKey, Vec<SegIdx>> = BTreeMap::new();
        let mut lowers: BTreeMap<PointKey, Vec<SegIdx>> = BTreeMap::new();

        for idx in segments.indices() {
            let seg = &segments[idx];
            events.push(seg.upper);
            events.push(seg.lower);
            uppers
                .entry(PointKey::new(seg.upper, eps))
                .or_default()
                .push(idx);
            lowers
                .entry(PointKey::new(seg.lower, eps))
                .or_default()
                .push(idx);
        }

        tracing::debug!(
            segments = segments.len(),
            events = events.len(),
            "starting sweep"
        );

        Sweeper {
            segments,
            eps,
            events,
            status: Status::default(),
            uppers,
            lowers,
            active: vec![false; segments.len()],
            records: 0,
            finished: false,
        }
    }

    /// The segments currently crossing the sweep line, from left to right.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// The number of event points still waiting to be visited.
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Visits the next event point.
    ///
    /// Returns `None` when the sweep is done. Otherwise, returns the event
    /// point together with its intersection record, if at least two segments
    /// meet there.
    pub fn step(&mut self) -> Option<(Point, Option<Intersection>)> {
        let Some(p) = self.events.pop() else {
            self.finish();
            return None;
        };
        let record = self.handle_event(p);
        self.check_invariants(&p);
        Some((p, record))
    }

    fn handle_event(&mut self, p: Point) -> Option<Intersection> {
        let segments = self.segments;
        let pos = SweepPosition::at(p);
        let ev = self.gather(p, &pos);

        tracing::trace!(
            point = ?p,
            upper = ev.upper.len(),
            lower = ev.lower.len(),
            crossing = ev.crossing.len(),
            "event"
        );

        let record = Intersection::new(
            p,
            ev.upper
                .iter()
                .chain(&ev.lower)
                .chain(&ev.crossing)
                .map(|idx| segments[*idx].id),
        );
        let record = (record.ids.len() >= 2).then_some(record);
        if record.is_some() {
            self.records += 1;
        }

        // Take out everything that ends or passes through here, then put back
        // everything that continues below, in its new order.
        for &idx in ev.lower.iter().chain(&ev.crossing) {
            self.status.remove(idx, &pos, segments);
            self.active[idx.0] = false;
        }
        for &idx in ev.upper.iter().chain(&ev.crossing) {
            self.status.insert(idx, &pos, segments);
            self.active[idx.0] = true;
        }

        if ev.upper.is_empty() && ev.crossing.is_empty() {
            // Something left the sweep line, so its former neighbors might
            // be newly adjacent.
            let gap = self.status.split_at_x(p.x, &pos, segments);
            if let Some(left_idx) = gap.checked_sub(1) {
                if let (Some(left), Some(right)) = (self.status.get(left_idx), self.status.get(gap))
                {
                    self.find_new_event(left, right, &p);
                }
            }
        } else {
            let positions = ev
                .upper
                .iter()
                .chain(&ev.crossing)
                .filter_map(|idx| self.status.position(*idx, &pos, segments));
            let (min, max) = positions.fold((usize::MAX, 0), |(lo, hi), i| {
                (lo.min(i), hi.max(i))
            });
            if min <= max {
                let leftmost = self.status.get(min);
                let rightmost = self.status.get(max);
                let left = min.checked_sub(1).and_then(|i| self.status.get(i));
                let right = self.status.get(max + 1);
                if let (Some(left), Some(leftmost)) = (left, leftmost) {
                    self.find_new_event(left, leftmost, &p);
                }
                if let (Some(rightmost), Some(right)) = (rightmost, right) {
                    self.find_new_event(rightmost, right, &p);
                }
            }
        }

        record
    }

    // Sorts out which segments start, end, and pass through the event point.
    fn gather(&mut self, p: Point, pos: &SweepPosition) -> EventSegments {
        let segments = self.segments;
        let key = PointKey::new(p, self.eps);

        let upper = self.uppers.remove(&key).unwrap_or_default();
        let mut lower = self.lowers.remove(&key).unwrap_or_default();
        lower.retain(|idx| self.active[idx.0]);

        // Anything passing near the event point is either ending here, or
        // passing through it.
        let mut crossing = Vec::new();
        for i in self.status.find_all_at_x(p.x, pos, segments) {
            let Some(idx) = self.status.get(i) else {
                continue;
            };
            let seg = &segments[idx];
            if compare_points(&seg.lower, &p, self.eps) == Ordering::Equal {
                if !lower.contains(&idx) {
                    lower.push(idx);
                }
            } else if !lower.contains(&idx) && point_on_segment(seg, &p, self.eps) {
                crossing.push(idx);
            }
        }

        EventSegments {
            upper,
            lower,
            crossing,
        }
    }

    fn find_new_event(&mut self, left: SegIdx, right: SegIdx, p: &Point) {
        let Some(q) = intersect(&self.segments[left], &self.segments[right], self.eps) else {
            return;
        };
        // Crossings at or above the current event have already been handled.
        if compare_points(&q, p, self.eps) == Ordering::Greater && self.events.push(q) {
            tracing::trace!(?left, ?right, point = ?q, "scheduled crossing");
        }
    }

    fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        if !self.uppers.is_empty() {
            tracing::warn!(
                count = self.uppers.values().map(Vec::len).sum::<usize>(),
                "some segments never entered the sweep line"
            );
        }
        tracing::debug!(records = self.records, "finished sweep");
    }

    #[cfg(feature = "slow-asserts")]
    fn check_invariants(&self, p: &Point) {
        let pos = SweepPosition::at(*p);
        self.status.check_order(&pos, self.segments);

        assert_eq!(
            self.status.len(),
            self.active.iter().filter(|a| **a).count()
        );
        for idx in self.status.iter() {
            let seg = &self.segments[idx];
            assert!(self.active[idx.0]);
            assert!(
                seg.upper.y >= p.y - self.eps && seg.lower.y <= p.y + self.eps,
                "segment {seg:?} out of range at {p:?}"
            );
        }
    }

    #[cfg(not(feature = "slow-asserts"))]
    fn check_invariants(&self, _p: &Point) {}
}

impl Iterator for Sweeper<'_> {
    type Item = Intersection;

    fn next(&mut self) -> Option<Intersection> {
        loop {
            let (_, record) = self.step()?;
            if record.is_some() {
                return record;
            }
        }
    }
}
