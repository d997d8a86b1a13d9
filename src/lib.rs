#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

#[cfg(any(test, feature = "arbitrary"))]
pub mod arbitrary;
mod geom;
pub mod naive;
mod num;
pub mod order;
pub mod predicates;
mod segments;
pub mod sweep;

#[cfg(feature = "generators")]
pub mod generators;

// pub so that we can use it in fuzz tests, but it's really private
#[doc(hidden)]
pub mod chunkvec;

pub use geom::{Point, Segment};
pub use segments::{SegIdx, Segments};
pub use sweep::{Intersection, Sweeper};

/// The default tolerance for comparing coordinates.
pub const DEFAULT_EPS: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq)]
/// The input points were faulty.
pub enum Error {
    /// At least one of the inputs was infinite.
    Infinity,
    /// At least one of the inputs was not a number.
    NaN,
    /// A segment's endpoints coincide (up to the tolerance).
    Degenerate {
        /// The id that the segment would have had.
        id: i64,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Infinity => write!(f, "one of the inputs was infinite"),
            Error::NaN => write!(f, "one of the inputs had a NaN"),
            Error::Degenerate { id } => write!(f, "segment {id} has zero length"),
        }
    }
}

impl std::error::Error for Error {}

/// Computes all the points where two or more segments meet.
///
/// Each point is reported once, along with the (sorted) ids of every segment
/// touching it. The records come out in sweep order: from top (large `y`) to
/// bottom, and from left to right at equal heights.
///
/// Collinear segments that overlap are reported at the two ends of their
/// overlap, but not in between.
pub fn intersections(segments: &Segments) -> Vec<Intersection> {
    let records = sweep::sweep(segments);
    #[cfg(feature = "debug-svg")]
    {
        if let Err(e) = svg::save("out.svg", &sweep::dump_svg(segments, &records)) {
            tracing::warn!(error = %e, "failed to write out.svg");
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            Error::Degenerate { id: 4 }.to_string(),
            "segment 4 has zero length"
        );
        assert_eq!(Error::NaN.to_string(), "one of the inputs had a NaN");
    }

    #[test]
    fn entry_point() {
        let mut segs = Segments::default();
        segs.push((0.0, 0.0), (5.0, 5.0)).unwrap();
        segs.push((0.0, 0.0), (5.0, -5.0)).unwrap();
        let records = intersections(&segs);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ids, vec![1, 2]);
        assert_eq!(records[0].point, Point::new(0.0, 0.0));
    }
}
