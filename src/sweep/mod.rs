//! The sweep-line implementation.
//!
//! The main entry point is [`Sweeper`], which visits the segments' endpoints
//! and crossings from top to bottom and produces an [`Intersection`] for
//! every point where two or more segments meet.

mod events;
mod intersection;
mod status;
mod sweeper;

pub use events::EventQueue;
pub use intersection::Intersection;
pub use status::Status;
pub use sweeper::Sweeper;

use crate::Segments;

/// Runs a sweep to completion, collecting all the intersection records.
pub fn sweep(segments: &Segments) -> Vec<Intersection> {
    Sweeper::new(segments).collect()
}

/// Draws the segments in grey and the intersection points in red.
#[cfg(feature = "debug-svg")]
pub fn dump_svg(segments: &Segments, records: &[Intersection]) -> svg::Document {
    use svg::node::element::{Circle, Line};

    let mut bbox: Option<kurbo::Rect> = None;
    for seg in segments.segments() {
        let rect = seg.bounding_box();
        bbox = Some(bbox.map_or(rect, |b| b.union(rect)));
    }
    let bbox = bbox.unwrap_or(kurbo::Rect::new(0.0, 0.0, 1.0, 1.0));
    let stroke_width = bbox.width().max(bbox.height()).max(1.0) / 512.0;
    let pad = stroke_width * 8.0;

    let mut document = svg::Document::new().set(
        "viewBox",
        (
            bbox.min_x() - pad,
            bbox.min_y() - pad,
            bbox.width() + 2.0 * pad,
            bbox.height() + 2.0 * pad,
        ),
    );
    for seg in segments.segments() {
        document = document.add(
            Line::new()
                .set("x1", seg.upper.x)
                .set("y1", seg.upper.y)
                .set("x2", seg.lower.x)
                .set("y2", seg.lower.y)
                .set("stroke", "grey")
                .set("stroke-width", stroke_width),
        );
    }
    for rec in records {
        document = document.add(
            Circle::new()
                .set("cx", rec.point.x)
                .set("cy", rec.point.y)
                .set("r", stroke_width * 2.5)
                .set("fill", "red"),
        );
    }
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{geom::Point, naive, order::SweepPosition};
    use proptest::prelude::*;

    fn arena(segs: &[((f64, f64), (f64, f64))]) -> Segments {
        let mut ret = Segments::default();
        for &(a, b) in segs {
            ret.push(a, b).unwrap();
        }
        ret
    }

    // Checks that every record in `a` has a matching record in `b`, and vice versa.
    fn assert_same_records(a: &[Intersection], b: &[Intersection], eps: f64) {
        assert_eq!(a.len(), b.len(), "{a:#?}\n{b:#?}");
        for rec in a {
            assert!(
                b.iter().any(|other| rec.approx_eq(other, eps)),
                "{rec:?} is missing from {b:#?}"
            );
        }
    }

    #[test]
    fn single_segment() {
        let segs = arena(&[((0.0, 0.0), (1.0, 1.0))]);
        assert!(sweep(&segs).is_empty());
        assert!(sweep(&Segments::default()).is_empty());
    }

    #[test]
    fn shared_endpoint() {
        let segs = arena(&[((0.0, 0.0), (5.0, 5.0)), ((0.0, 0.0), (5.0, -5.0))]);
        assert_eq!(
            sweep(&segs),
            vec![Intersection::new(Point::new(0.0, 0.0), [1, 2])]
        );
    }

    #[test]
    fn crossing() {
        let segs = arena(&[((0.0, 0.0), (10.0, 10.0)), ((0.0, 10.0), (10.0, 0.0))]);
        insta::assert_debug_snapshot!(sweep(&segs));
    }

    #[test]
    fn three_through_origin() {
        let segs = arena(&[
            ((-5.0, -5.0), (5.0, 5.0)),
            ((-5.0, 5.0), (5.0, -5.0)),
            ((-5.0, 0.0), (5.0, 0.0)),
        ]);
        insta::assert_debug_snapshot!(sweep(&segs));
    }

    #[test]
    fn parallel() {
        let segs = arena(&[((0.0, 0.0), (10.0, 0.0)), ((0.0, 1.0), (10.0, 1.0))]);
        assert!(sweep(&segs).is_empty());
    }

    #[test]
    fn collinear_overlap() {
        // Only the ends of the overlap are reported.
        let segs = arena(&[((0.0, 0.0), (10.0, 0.0)), ((5.0, 0.0), (15.0, 0.0))]);
        assert_eq!(
            sweep(&segs),
            vec![
                Intersection::new(Point::new(5.0, 0.0), [1, 2]),
                Intersection::new(Point::new(10.0, 0.0), [1, 2]),
            ]
        );

        let segs = arena(&[((0.0, 0.0), (0.0, 10.0)), ((0.0, 5.0), (0.0, 15.0))]);
        assert_eq!(
            sweep(&segs),
            vec![
                Intersection::new(Point::new(0.0, 10.0), [1, 2]),
                Intersection::new(Point::new(0.0, 5.0), [1, 2]),
            ]
        );
    }

    #[test]
    fn shared_ids() {
        // Two segments with the same id don't make an intersection on their own.
        let mut segs = Segments::default();
        segs.push_with_id((0.0, 0.0), (1.0, 1.0), 7).unwrap();
        segs.push_with_id((0.0, 1.0), (1.0, 0.0), 7).unwrap();
        assert!(sweep(&segs).is_empty());

        segs.push_with_id((0.5, 0.0), (0.5, 1.0), 3).unwrap();
        assert_eq!(
            sweep(&segs),
            vec![Intersection::new(Point::new(0.5, 0.5), [3, 7])]
        );
    }

    #[test]
    fn grid_of_crossings() {
        let mut segs = Segments::default();
        for i in 0..4 {
            let t = i as f64;
            segs.add_points([(t, -1.0), (t, 4.0)]).unwrap();
            segs.add_points([(-1.0, t), (4.0, t)]).unwrap();
        }
        let records = sweep(&segs);
        assert_eq!(records.len(), 16);
        assert_same_records(&records, &naive::intersections(&segs), segs.eps());
    }

    proptest! {
        #[test]
        fn matches_naive(
            raw in proptest::collection::vec(((-8i32..=8, -8i32..=8), (-8i32..=8, -8i32..=8)), 1..16)
        ) {
            let mut segs = Segments::default();
            for ((x0, y0), (x1, y1)) in raw {
                let _ = segs.push((x0 as f64, y0 as f64), (x1 as f64, y1 as f64));
            }
            let mut sweeper = Sweeper::new(&segs);
            let mut swept = Vec::new();
            while let Some((p, rec)) = sweeper.step() {
                sweeper.status().check_order(&SweepPosition::at(p), &segs);
                swept.extend(rec);
            }
            let naive = naive::intersections(&segs);
            assert_same_records(&swept, &naive, 1e-6);

            for rec in &swept {
                prop_assert!(rec.ids.len() >= 2);
                prop_assert!(rec.ids.windows(2).all(|w| w[0] < w[1]));
            }
        }

        #[test]
        fn reordering_doesnt_matter(
            raw in proptest::collection::vec(((-8i32..=8, -8i32..=8), (-8i32..=8, -8i32..=8)), 1..12),
            rotate in 0usize..12,
        ) {
            let raw: Vec<_> = raw
                .into_iter()
                .filter(|(a, b)| a != b)
                .enumerate()
                .collect();
            let build = |order: &[(usize, ((i32, i32), (i32, i32)))], flip: bool| {
                let mut segs = Segments::default();
                for &(id, (a, b)) in order {
                    let (a, b) = if flip { (b, a) } else { (a, b) };
                    let pt = |(x, y): (i32, i32)| (x as f64, y as f64);
                    segs.push_with_id(pt(a), pt(b), id as i64).unwrap();
                }
                segs
            };
            let mut shuffled = raw.clone();
            shuffled.reverse();
            if !shuffled.is_empty() {
                let len = shuffled.len();
                shuffled.rotate_left(rotate % len);
            }

            // Neither the order of the segments nor the order of their
            // endpoints should matter.
            let a = sweep(&build(&raw, false));
            let b = sweep(&build(&shuffled, true));
            assert_same_records(&a, &b, 1e-6);
        }
    }
}
