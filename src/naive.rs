//! The quadratic-time reference algorithm.
//!
//! This checks every pair of segments, so it's only useful for small inputs
//! and for checking the sweep. It reports exactly what the sweep reports:
//! crossings, touching endpoints, and the endpoints of collinear overlaps
//! (but nothing in the interior of an overlap).

use crate::{
    geom::Point,
    order::compare_points,
    predicates::{intersect, point_on_segment},
    sweep::Intersection,
    Segments,
};

/// Computes all the intersection points, by checking every pair of segments.
///
/// Points within the arena's tolerance of one another are merged, and the
/// records are returned in sweep order (top to bottom, then left to right).
pub fn intersections(segments: &Segments) -> Vec<Intersection> {
    let eps = segments.eps();
    let segs: Vec<_> = segments.segments().collect();
    let mut found: Vec<(Point, Vec<i64>)> = Vec::new();

    let mut add = |p: Point, a: i64, b: i64| {
        match found.iter_mut().find(|(q, _)| q.approx_eq(&p, eps)) {
            Some((_, ids)) => ids.extend([a, b]),
            None => found.push((p, vec![a, b])),
        }
    };

    for (i, a) in segs.iter().enumerate() {
        for b in &segs[(i + 1)..] {
            match intersect(a, b, eps) {
                Some(p) => add(p, a.id, b.id),
                None => {
                    // Parallel segments meet only where one's endpoint is on the other.
                    for p in [a.upper, a.lower] {
                        if point_on_segment(b, &p, eps) {
                            add(p, a.id, b.id);
                        }
                    }
                    for p in [b.upper, b.lower] {
                        if point_on_segment(a, &p, eps) {
                            add(p, a.id, b.id);
                        }
                    }
                }
            }
        }
    }

    let mut ret: Vec<_> = found
        .into_iter()
        .map(|(p, ids)| Intersection::new(p, ids))
        .filter(|rec| rec.ids.len() >= 2)
        .collect();
    // The tolerant comparison isn't a total order, so sort exactly and then
    // fix up the order of points that are equal up to the tolerance.
    ret.sort_by(|r, s| {
        s.point
            .y
            .total_cmp(&r.point.y)
            .then(r.point.x.total_cmp(&s.point.x))
    });
    for i in 1..ret.len() {
        let mut j = i;
        while j > 0 && compare_points(&ret[j].point, &ret[j - 1].point, eps).is_lt() {
            ret.swap(j, j - 1);
            j -= 1;
        }
    }
    ret
}
