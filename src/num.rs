//! Numeric helpers.

use std::cmp::Ordering;

/// A wrapper for `f64` that implements `Ord`.
///
/// Unlike the more principled wrappers in the `ordered_float` crate, this one
/// doesn't guard against NaN on construction and treats incomparable values
/// as equal. All the coordinates we wrap were checked for finiteness when
/// they entered the segment arena, and the only infinities we produce on
/// purpose are the "run" of horizontal segments, which compare fine.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct CheapOrderedFloat(f64);

impl Eq for CheapOrderedFloat {}

impl PartialOrd for CheapOrderedFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CheapOrderedFloat {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal)
    }
}

impl From<f64> for CheapOrderedFloat {
    fn from(value: f64) -> Self {
        CheapOrderedFloat(value)
    }
}

/// Compares two floats, declaring them equal if they're within `eps` of one another.
///
/// This is not a total order (it isn't transitive), so it should only be used
/// for comparing quantities that are known to be either well-separated or
/// essentially the same.
#[inline]
pub fn cmp_with_tolerance(a: f64, b: f64, eps: f64) -> Ordering {
    if (a - b).abs() <= eps {
        Ordering::Equal
    } else {
        CheapOrderedFloat(a).cmp(&CheapOrderedFloat(b))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;

    // Kind of like Arbitrary, but
    // - it's a local trait, so we can impl it for whatever we want, and
    // - it only returns "reasonable" values.
    pub trait Reasonable {
        type Strategy: Strategy<Value = Self>;
        fn reasonable() -> Self::Strategy;
    }

    impl<S: Reasonable, T: Reasonable> Reasonable for (S, T) {
        type Strategy = (S::Strategy, T::Strategy);

        fn reasonable() -> Self::Strategy {
            (S::reasonable(), T::reasonable())
        }
    }

    impl Reasonable for f64 {
        type Strategy = BoxedStrategy<f64>;

        fn reasonable() -> Self::Strategy {
            (-1e6..1e6).boxed()
        }
    }

    #[test]
    fn tolerance() {
        assert_eq!(cmp_with_tolerance(1.0, 1.0 + 1e-12, 1e-9), Ordering::Equal);
        assert_eq!(cmp_with_tolerance(1.0, 1.0 + 1e-6, 1e-9), Ordering::Less);
        assert_eq!(cmp_with_tolerance(2.0, 1.0, 1e-9), Ordering::Greater);
        // The difference is NaN, so we fall through to the exact comparison.
        assert_eq!(
            cmp_with_tolerance(f64::INFINITY, f64::INFINITY, 1e-9),
            Ordering::Equal
        );
        assert_eq!(
            cmp_with_tolerance(1e300, f64::INFINITY, 1e-9),
            Ordering::Less
        );
    }

    proptest! {
        #[test]
        fn cheap_matches_partial_cmp((a, b) in <(f64, f64)>::reasonable()) {
            let cheap = CheapOrderedFloat::from(a).cmp(&CheapOrderedFloat::from(b));
            prop_assert_eq!(Some(cheap), a.partial_cmp(&b));
        }
    }
}
