//! Segment sets for examples, benchmarks, and tests.
//!
//! Everything here is built from small integers (or from points on a circle,
//! in the case of [`star`]), so the expected intersections are easy to count.

use crate::{Point, Segments};

type Contours = Vec<Vec<Point>>;

/// Builds an arena out of closed polylines.
pub fn from_contours<'a>(contours: impl IntoIterator<Item = &'a Vec<Point>>) -> Segments {
    let mut ret = Segments::default();
    for c in contours {
        // The generated coordinates are all finite.
        let _ = ret.add_cycle(c.iter().copied());
    }
    ret
}

// A `count` by `count` arrangement of squares with side length `size`, with
// top-left corners spaced `offset` apart. A non-zero `slant` shears the
// squares into parallelograms by raising their right sides.
fn squares((x0, y0): (f64, f64), size: f64, offset: f64, slant: f64, count: usize) -> Contours {
    let mut ret = Vec::with_capacity(count * count);
    for i in 0..count {
        let x = x0 + i as f64 * offset;
        for j in 0..count {
            let y = y0 + j as f64 * offset;
            ret.push(vec![
                Point::new(x, y),
                Point::new(x, y + size),
                Point::new(x + size, y + size + slant),
                Point::new(x + size, y + slant),
            ]);
        }
    }
    ret
}

/// An `n` by `n` grid of squares overlapped by an `n - 1` by `n - 1` grid of
/// squares, offset so that each inner square overlaps the corners of four
/// outer ones.
///
/// Every inner square's outline crosses its four neighbors' outlines twice
/// each, for `8 * (n - 1)^2` crossings in all. The squares' corners, where
/// consecutive edges meet, are reported too.
pub fn checkerboard(n: usize) -> Segments {
    let outer = squares((0.0, 0.0), 30.0, 40.0, 0.0, n);
    let inner = squares((20.0, 20.0), 30.0, 40.0, 0.0, n.saturating_sub(1));
    from_contours(outer.iter().chain(&inner))
}

/// Like [`checkerboard`], but without any horizontal segments.
pub fn slanted_checkerboard(n: usize) -> Segments {
    let outer = squares((0.0, 0.0), 30.0, 40.0, 1.0, n);
    let inner = squares((20.0, 20.0), 30.0, 40.0, 1.0, n.saturating_sub(1));
    from_contours(outer.iter().chain(&inner))
}

/// Long, skinny parallelograms: `n` leaning one way, and `n` leaning the other.
///
/// Every parallelogram crosses every parallelogram of the other family, so
/// the number of intersections grows quadratically.
pub fn slanties(n: usize) -> Segments {
    let h = 20.0 * n as f64;
    let mut contours = Vec::with_capacity(2 * n);
    for i in 0..n {
        let x = 20.0 * i as f64;
        contours.push(vec![
            Point::new(x, 0.0),
            Point::new(x + h, h),
            Point::new(x + h + 10.0, h),
            Point::new(x + 10.0, 0.0),
        ]);
        contours.push(vec![
            Point::new(x + h, 0.0),
            Point::new(x, h),
            Point::new(x + 10.0, h),
            Point::new(x + h + 10.0, 0.0),
        ]);
    }
    from_contours(&contours)
}

/// `n` horizontal and `n` vertical segments, crossing in an `n` by `n` grid.
pub fn grid(n: usize) -> Segments {
    let mut ret = Segments::default();
    let len = n as f64 + 1.0;
    for i in 0..n {
        let t = i as f64 + 1.0;
        let _ = ret.push((0.0, t), (len, t));
        let _ = ret.push((t, 0.0), (t, len));
    }
    ret
}

/// `n` diameters of a circle, all crossing at its center.
pub fn star(n: usize) -> Segments {
    let mut ret = Segments::default();
    for i in 0..n {
        let theta = std::f64::consts::PI * i as f64 / n as f64;
        let (s, c) = theta.sin_cos();
        let _ = ret.push((100.0 * c, 100.0 * s), (-100.0 * c, -100.0 * s));
    }
    ret
}
