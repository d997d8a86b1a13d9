//! Utilities for fuzz and/or property testing using `arbitrary`.
//!
//! Uniformly random segments almost never touch, so the generators here are
//! biased towards the configurations the sweep finds interesting: shared
//! endpoints, endpoints on other segments, and axis-aligned segments.

use arbitrary::Unstructured;

use crate::{Point, Segments};

/// Generate an arbitrary float in some range.
pub fn float_in_range(
    start: f64,
    end: f64,
    u: &mut Unstructured<'_>,
) -> Result<f64, arbitrary::Error> {
    let num: u32 = u.arbitrary()?;
    let t = num as f64 / u32::MAX as f64;
    Ok((1.0 - t) * start + t * end)
}

/// Generate a point with small integer coordinates.
///
/// Segments between such points have crossings that are well separated from
/// one another (relative to the default tolerance), so they make good test
/// cases for comparing against the naive algorithm.
pub fn lattice_point(size: i32, u: &mut Unstructured<'_>) -> Result<Point, arbitrary::Error> {
    let x = u.int_in_range(-size..=size)?;
    let y = u.int_in_range(-size..=size)?;
    Ok(Point::new(x as f64, y as f64))
}

fn point(u: &mut Unstructured<'_>) -> Result<Point, arbitrary::Error> {
    Ok(Point::new(
        float_in_range(-1e3, 1e3, u)?,
        float_in_range(-1e3, 1e3, u)?,
    ))
}

// Pick a point that's likely to be somewhere interesting: an endpoint we've
// already used, or a point in the middle of an existing segment.
fn related_point(
    existing: &[(Point, Point)],
    fresh: &mut impl FnMut(&mut Unstructured<'_>) -> Result<Point, arbitrary::Error>,
    u: &mut Unstructured<'_>,
) -> Result<Point, arbitrary::Error> {
    if existing.is_empty() {
        return fresh(u);
    }
    match u.int_in_range(0..=3)? {
        0 => {
            let (a, _) = *u.choose(existing)?;
            Ok(a)
        }
        1 => {
            let (a, b) = *u.choose(existing)?;
            let t = float_in_range(0.0, 1.0, u)?;
            Ok(a.affine(&b, t))
        }
        _ => fresh(u),
    }
}

fn segment_endpoints(
    count: usize,
    mut fresh: impl FnMut(&mut Unstructured<'_>) -> Result<Point, arbitrary::Error>,
    u: &mut Unstructured<'_>,
) -> Result<Vec<(Point, Point)>, arbitrary::Error> {
    let mut ret: Vec<(Point, Point)> = Vec::with_capacity(count);
    for _ in 0..count {
        let a = related_point(&ret, &mut fresh, u)?;
        let b = match u.int_in_range(0..=4)? {
            // Horizontal.
            0 => Point::new(fresh(u)?.x, a.y),
            // Vertical.
            1 => Point::new(a.x, fresh(u)?.y),
            _ => related_point(&ret, &mut fresh, u)?,
        };
        ret.push((a, b));
    }
    Ok(ret)
}

fn arena(endpoints: Vec<(Point, Point)>) -> Segments {
    let mut ret = Segments::default();
    for (a, b) in endpoints {
        // Degenerate segments are rejected, and that's fine: we just get fewer segments.
        let _ = ret.push(a, b);
    }
    ret
}

/// Generate a collection of segments with coordinates in `[-1000, 1000]`.
pub fn segments(u: &mut Unstructured<'_>) -> Result<Segments, arbitrary::Error> {
    let count = u.int_in_range(1..=32)?;
    Ok(arena(segment_endpoints(count, point, u)?))
}

/// Generate a collection of segments whose endpoints have integer coordinates
/// in `[-size, size]`.
///
/// Interior points (used for T-junctions) are rounded, so these segments
/// exercise exact coincidences: shared endpoints, collinear overlaps and
/// segments passing exactly through other segments' endpoints.
pub fn lattice_segments(
    size: i32,
    u: &mut Unstructured<'_>,
) -> Result<Segments, arbitrary::Error> {
    let count = u.int_in_range(1..=24)?;
    let endpoints = segment_endpoints(count, |u| lattice_point(size, u), u)?;
    let rounded = endpoints
        .into_iter()
        .map(|(a, b)| {
            let round = |p: Point| Point::new(p.x.round(), p.y.round());
            (round(a), round(b))
        })
        .collect();
    Ok(arena(rounded))
}
