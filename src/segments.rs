use kurbo::{BezPath, PathEl};

use crate::{geom::Point, geom::Segment, Error, DEFAULT_EPS};

/// An index into our segment arena.
///
/// The sweep refers to segments by their index, so that segments are
/// considered different even if they have the same endpoints (or the same
/// caller-assigned id).
///
/// This index is used to identify a segment, whose data can be retrieved by looking
/// it up in [`Segments`]. (Of course, this index-as-identifier breaks down if there are
/// multiple `Segments` in flight. Just be careful not to mix them up.)
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, serde::Serialize)]
pub struct SegIdx(pub usize);

impl std::fmt::Debug for SegIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s_{}", self.0)
    }
}

/// An arena of line segments, together with the tolerance used to compare them.
///
/// Segments are indexed by [`SegIdx`] and can be retrieved by indexing (i.e. with square brackets).
/// Every segment carries an integer id, which is what intersection records report.
/// Ids are assigned automatically, counting up from 1, unless you provide your own
/// with [`Segments::push_with_id`].
///
/// Once a sweep has started, the arena is borrowed immutably; it can't change
/// until the sweep is done.
#[derive(Debug, Clone)]
pub struct Segments {
    segs: Vec<Segment>,
    eps: f64,
    next_id: i64,
}

impl Default for Segments {
    fn default() -> Self {
        Self::with_eps(DEFAULT_EPS)
    }
}

fn cyclic_pairs<T>(xs: &[T]) -> impl Iterator<Item = (&T, &T)> {
    pairs(xs).chain(xs.last().zip(xs.first()))
}

fn pairs<T>(xs: &[T]) -> impl Iterator<Item = (&T, &T)> {
    xs.windows(2).map(|pair| (&pair[0], &pair[1]))
}

fn check_finite(p: &Point) -> Result<(), Error> {
    if p.x.is_nan() || p.y.is_nan() {
        Err(Error::NaN)
    } else if p.x.is_infinite() || p.y.is_infinite() {
        Err(Error::Infinity)
    } else {
        Ok(())
    }
}

impl Segments {
    /// Creates an empty arena, whose segments will be compared with tolerance `eps`.
    ///
    /// Coordinates within `eps` of one another are treated as equal, both when
    /// ordering events and when deciding whether segments meet.
    pub fn with_eps(eps: f64) -> Self {
        debug_assert!(eps.is_finite() && eps >= 0.0);
        Segments {
            segs: Vec::new(),
            eps,
            next_id: 1,
        }
    }

    /// The tolerance for comparing coordinates.
    pub fn eps(&self) -> f64 {
        self.eps
    }

    /// The number of line segments in this arena.
    pub fn len(&self) -> usize {
        self.segs.len()
    }

    /// Returns true if there are no segments in this arena.
    pub fn is_empty(&self) -> bool {
        self.segs.is_empty()
    }

    /// Iterate over all indices that can be used to index into this arena.
    pub fn indices(&self) -> impl Iterator<Item = SegIdx> {
        (0..self.segs.len()).map(SegIdx)
    }

    /// Iterate over all segments in this arena.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segs.iter()
    }

    /// Adds a segment between two points, assigning it the next automatic id.
    ///
    /// Fails if either point is not finite, or if the points coincide (up to
    /// our tolerance). Nothing is added on failure.
    pub fn push(&mut self, a: impl Into<Point>, b: impl Into<Point>) -> Result<SegIdx, Error> {
        let id = self.next_id;
        self.push_with_id(a, b, id)
    }

    /// Adds a segment between two points, with an explicit id.
    ///
    /// Ids don't need to be unique, but intersection records list each id at
    /// most once, so segments sharing an id are indistinguishable in the output.
    pub fn push_with_id(
        &mut self,
        a: impl Into<Point>,
        b: impl Into<Point>,
        id: i64,
    ) -> Result<SegIdx, Error> {
        let (a, b) = (a.into(), b.into());
        check_finite(&a)?;
        check_finite(&b)?;
        if a.approx_eq(&b, self.eps) {
            return Err(Error::Degenerate { id });
        }

        let idx = SegIdx(self.segs.len());
        self.segs.push(Segment::new(a, b, id, self.eps));
        self.next_id = self.next_id.max(id.saturating_add(1));
        Ok(idx)
    }

    /// Adds a (non-closed) polyline to this arena, one segment per consecutive
    /// pair of points.
    ///
    /// Repeated points are skipped rather than producing zero-length segments.
    /// If any point is not finite, nothing is added.
    pub fn add_points<P: Into<Point>>(
        &mut self,
        ps: impl IntoIterator<Item = P>,
    ) -> Result<(), Error> {
        let ps = self.collect_finite(ps)?;
        self.add_pairs(pairs(&ps));
        Ok(())
    }

    /// Adds a closed polyline to this arena.
    ///
    /// This is like [`Segments::add_points`], but with an additional segment
    /// from the last point back to the first.
    pub fn add_cycle<P: Into<Point>>(
        &mut self,
        ps: impl IntoIterator<Item = P>,
    ) -> Result<(), Error> {
        let ps = self.collect_finite(ps)?;
        if ps.len() <= 2 {
            // Closing a two-point cycle would just retrace the first segment.
            self.add_pairs(pairs(&ps));
        } else {
            self.add_pairs(cyclic_pairs(&ps));
        }
        Ok(())
    }

    /// Adds the outline of a path, with its curves approximated by line segments
    /// to within `tolerance`.
    ///
    /// Each sub-path becomes a polyline; closed sub-paths get a closing segment.
    pub fn add_bez_path(&mut self, path: &BezPath, tolerance: f64) -> Result<(), Error> {
        let mut polylines = Vec::new();
        let mut current: Vec<Point> = Vec::new();
        kurbo::flatten(path.elements().iter().cloned(), tolerance, |el| match el {
            PathEl::MoveTo(p) => {
                polylines.push((std::mem::take(&mut current), false));
                current.push(p.into());
            }
            PathEl::LineTo(p) => current.push(p.into()),
            PathEl::ClosePath => {
                polylines.push((std::mem::take(&mut current), true));
            }
            // `flatten` only produces lines.
            PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
        });
        polylines.push((current, false));

        // Validate everything before adding anything.
        for (ps, _) in &polylines {
            for p in ps {
                check_finite(p)?;
            }
        }

        for (ps, closed) in polylines {
            if closed && ps.len() > 2 {
                self.add_pairs(cyclic_pairs(&ps));
            } else {
                self.add_pairs(pairs(&ps));
            }
        }
        Ok(())
    }

    fn collect_finite<P: Into<Point>>(
        &self,
        ps: impl IntoIterator<Item = P>,
    ) -> Result<Vec<Point>, Error> {
        let ps: Vec<Point> = ps.into_iter().map(|p| p.into()).collect();
        for p in &ps {
            check_finite(p)?;
        }
        Ok(ps)
    }

    fn add_pairs<'a>(&mut self, pairs: impl Iterator<Item = (&'a Point, &'a Point)>) {
        for (p, q) in pairs {
            if p.approx_eq(q, self.eps) {
                tracing::trace!(?p, "skipping zero-length polyline segment");
                continue;
            }
            let id = self.next_id;
            self.segs.push(Segment::new(*p, *q, id, self.eps));
            self.next_id += 1;
        }
    }
}

impl std::ops::Index<SegIdx> for Segments {
    type Output = Segment;

    fn index(&self, index: SegIdx) -> &Self::Output {
        &self.segs[index.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn automatic_ids() {
        let mut segs = Segments::default();
        let a = segs.push((0.0, 0.0), (1.0, 1.0)).unwrap();
        let b = segs.push((0.0, 1.0), (1.0, 0.0)).unwrap();
        assert_eq!(segs[a].id, 1);
        assert_eq!(segs[b].id, 2);

        segs.push_with_id((0.0, 2.0), (1.0, 2.0), 10).unwrap();
        let c = segs.push((0.0, 3.0), (1.0, 3.0)).unwrap();
        assert_eq!(segs[c].id, 11);
        assert_eq!(segs.len(), 4);
    }

    #[test]
    fn bad_inputs() {
        let mut segs = Segments::default();
        assert_matches!(segs.push((0.0, f64::NAN), (1.0, 1.0)), Err(Error::NaN));
        assert_matches!(
            segs.push((0.0, 0.0), (f64::INFINITY, 1.0)),
            Err(Error::Infinity)
        );
        assert_matches!(
            segs.push_with_id((0.0, 0.0), (1e-12, 0.0), 5),
            Err(Error::Degenerate { id: 5 })
        );
        assert_matches!(
            segs.add_points([(0.0, 0.0), (1.0, 0.0), (f64::NEG_INFINITY, 0.0)]),
            Err(Error::Infinity)
        );
        assert!(segs.is_empty());
    }

    #[test]
    fn polylines() {
        let mut segs = Segments::default();
        segs.add_points([(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (1.0, 1.0)])
            .unwrap();
        assert_eq!(segs.len(), 2);

        segs.add_cycle([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]).unwrap();
        assert_eq!(segs.len(), 5);
        let ids: Vec<_> = segs.segments().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);

        // Every segment is stored top-down.
        for s in segs.segments() {
            assert!(s.upper.y >= s.lower.y);
        }
    }

    #[test]
    fn bez_path() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((2.0, 0.0));
        path.line_to((2.0, 2.0));
        path.close_path();
        path.move_to((5.0, 5.0));
        path.line_to((6.0, 6.0));

        let mut segs = Segments::default();
        segs.add_bez_path(&path, 0.1).unwrap();
        assert_eq!(segs.len(), 4);

        let mut curved = BezPath::new();
        curved.move_to((0.0, 0.0));
        curved.quad_to((5.0, 10.0), (10.0, 0.0));
        let mut segs = Segments::default();
        segs.add_bez_path(&curved, 0.01).unwrap();
        assert!(segs.len() > 2);
    }
}
