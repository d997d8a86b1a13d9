use crate::geom::Point;

/// A point where at least two segments meet, and the ids of all the segments meeting there.
#[derive(Clone, PartialEq, serde::Serialize)]
pub struct Intersection {
    /// Where the segments meet.
    pub point: Point,
    /// The ids of the segments meeting at `point`, sorted and without repeats.
    pub ids: Vec<i64>,
}

impl std::fmt::Debug for Intersection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {:?}", self.point, self.ids)
    }
}

impl Intersection {
    /// Creates a record, sorting and de-duplicating the ids.
    pub fn new(point: Point, ids: impl IntoIterator<Item = i64>) -> Self {
        let mut ids: Vec<_> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        Intersection { point, ids }
    }

    /// Do the two records list the same ids, at points within `eps` of each other?
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        self.ids == other.ids && self.point.approx_eq(&other.point, eps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_ids() {
        let rec = Intersection::new(Point::new(1.0, 2.0), [5, 3, 5, 1]);
        assert_eq!(rec.ids, vec![1, 3, 5]);
        assert_eq!(format!("{rec:?}"), "(1.0, 2.0): [1, 3, 5]");

        let other = Intersection::new(Point::new(1.0 + 1e-12, 2.0), [1, 5, 3]);
        assert!(rec.approx_eq(&other, 1e-9));
        assert!(!rec.approx_eq(&Intersection::new(rec.point, [1, 3]), 1e-9));
    }
}
