use std::{cmp::Ordering, ops::Range};

use crate::{
    chunkvec::ChunkVec,
    num::cmp_with_tolerance,
    order::{compare_segments, SweepPosition},
    segments::{SegIdx, Segments},
};

/// The segments currently crossing the sweep line, ordered from left to right.
///
/// The status doesn't know where the sweep line is: every query takes the
/// sweep position explicitly, along with the arena the indices point into.
/// Between events, the order is the order just below the most recent event,
/// so the segments that meet at an event are all adjacent at the next one.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct Status {
    segs: ChunkVec<SegIdx, 64>,
}

impl Status {
    /// The number of segments crossing the sweep line.
    pub fn len(&self) -> usize {
        self.segs.len()
    }

    /// Is the sweep line empty?
    pub fn is_empty(&self) -> bool {
        self.segs.is_empty()
    }

    /// The segment at position `idx`, counting from the left.
    pub fn get(&self, idx: usize) -> Option<SegIdx> {
        self.segs.get(idx).copied()
    }

    /// Iterates over the segments from left to right.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = SegIdx> + '_ {
        self.segs.iter().copied()
    }

    /// Inserts a segment in its place at `pos`, returning its new position.
    ///
    /// Segments that compare equal to `seg` (overlapping, collinear segments)
    /// stay to its left.
    pub fn insert(&mut self, seg: SegIdx, pos: &SweepPosition, segments: &Segments) -> usize {
        let eps = segments.eps();
        let new = &segments[seg];
        let idx = self.segs.partition_point(|s| {
            compare_segments(&segments[*s], new, pos, eps) != Ordering::Greater
        });
        self.segs.insert(idx, seg);
        idx
    }

    /// Removes a segment, returning true if it was present.
    pub fn remove(&mut self, seg: SegIdx, pos: &SweepPosition, segments: &Segments) -> bool {
        match self.position(seg, pos, segments) {
            Some(idx) => {
                self.segs.remove(idx);
                true
            }
            None => {
                tracing::warn!(?seg, y = pos.y, "segment missing from the sweep line");
                false
            }
        }
    }

    /// Finds the position of a segment.
    ///
    /// We first look among the segments near `seg`'s horizontal position at
    /// `pos`. If it isn't there (which would mean the sweep line has fallen
    /// out of order), we fall back to a linear scan.
    pub fn position(
        &self,
        seg: SegIdx,
        pos: &SweepPosition,
        segments: &Segments,
    ) -> Option<usize> {
        let x = segments[seg].sweep_x(pos, segments.eps());
        self.find_all_at_x(x, pos, segments)
            .find(|&idx| self.segs.get(idx) == Some(&seg))
            .or_else(|| {
                let idx = self.segs.iter().position(|s| *s == seg);
                if idx.is_some() {
                    tracing::warn!(?seg, y = pos.y, "segment found outside its window");
                }
                idx
            })
    }

    /// The segment immediately to the left of `seg`.
    pub fn predecessor_of(
        &self,
        seg: SegIdx,
        pos: &SweepPosition,
        segments: &Segments,
    ) -> Option<SegIdx> {
        let idx = self.position(seg, pos, segments)?;
        self.get(idx.checked_sub(1)?)
    }

    /// The segment immediately to the right of `seg`.
    pub fn successor_of(
        &self,
        seg: SegIdx,
        pos: &SweepPosition,
        segments: &Segments,
    ) -> Option<SegIdx> {
        let idx = self.position(seg, pos, segments)?;
        self.get(idx + 1)
    }

    /// The positions of all the segments whose horizontal position at `pos`
    /// is within the tolerance of `x`.
    pub fn find_all_at_x(
        &self,
        x: f64,
        pos: &SweepPosition,
        segments: &Segments,
    ) -> Range<usize> {
        let eps = segments.eps();
        let key = |s: &SegIdx| segments[*s].sweep_x(pos, eps);
        let start = self.segs.partition_point(|s| key(s) < x - eps);
        let end = self.segs.partition_point(|s| key(s) <= x + eps);
        start..end.max(start)
    }

    /// The position of the first segment that isn't strictly to the left of `x`.
    pub fn split_at_x(&self, x: f64, pos: &SweepPosition, segments: &Segments) -> usize {
        let eps = segments.eps();
        self.segs.partition_point(|s| segments[*s].sweep_x(pos, eps) < x)
    }

    /// Checks that neighboring segments are in order at `pos`.
    ///
    /// Only segments through the event point at `pos` are ordered by how
    /// they continue below it. Segments that meet elsewhere on the sweep line
    /// haven't been visited yet, so they're still in the order from above
    /// their meeting point and only their horizontal positions are checked.
    pub fn check_order(&self, pos: &SweepPosition, segments: &Segments) {
        self.segs.check_invariants();
        let eps = segments.eps();
        let segs: Vec<_> = self.iter().collect();
        for pair in segs.windows(2) {
            let (a, b) = (&segments[pair[0]], &segments[pair[1]]);
            let (a_x, b_x) = (a.sweep_x(pos, eps), b.sweep_x(pos, eps));
            let ord = match cmp_with_tolerance(a_x, b_x, eps) {
                Ordering::Equal if (a_x - pos.x).abs() <= eps => {
                    compare_segments(a, b, pos, eps)
                }
                ord => ord,
            };
            assert!(
                ord != Ordering::Greater,
                "sweep line out of order at {pos:?}: {a:?} before {b:?}"
            );
        }
    }
}
