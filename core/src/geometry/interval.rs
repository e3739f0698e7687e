//! Closed Intervals

#![allow(dead_code)]

use crate::mist::*;

/// A closed interval [min, max]. An empty interval has min > max.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Interval {
    min: Float,
    max: Float,
}

impl Interval {
    /// Create a closed interval. If `a > b` the endpoints are swapped rather
    /// than producing an empty interval. If either endpoint is NaN, the
    /// empty interval is returned.
    ///
    /// * `a` - One endpoint. It need not be the minimum.
    /// * `b` - The other endpoint. It need not be the maximum.
    pub fn new(a: Float, b: Float) -> Self {
        if a.is_nan() || b.is_nan() {
            Self::empty()
        } else {
            Self {
                min: min(a, b),
                max: max(a, b),
            }
        }
    }

    /// The empty interval.
    pub fn empty() -> Self {
        Self {
            min: INFINITY,
            max: -INFINITY,
        }
    }

    /// Returns true if no value is contained.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Returns the lower endpoint.
    pub fn min(&self) -> Float {
        self.min
    }

    /// Returns the upper endpoint.
    pub fn max(&self) -> Float {
        self.max
    }

    /// Test whether a value lies in the closed interval.
    ///
    /// * `t` - The value to test.
    pub fn contains(&self, t: Float) -> bool {
        t >= self.min && t <= self.max
    }
}

impl Default for Interval {
    /// Returns the empty interval.
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "[empty]")
        } else {
            write!(f, "[{}, {}]", self.min, self.max)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swapped_endpoints_are_reordered() {
        let i = Interval::new(3.0, -1.0);
        assert_eq!(i.min(), -1.0);
        assert_eq!(i.max(), 3.0);
    }

    #[test]
    fn nan_endpoint_gives_empty() {
        assert!(Interval::new(f64::NAN, 1.0).is_empty());
        assert!(Interval::empty().is_empty());
    }

    #[test]
    fn contains_is_closed() {
        let i = Interval::new(0.0, 1.0);
        assert!(i.contains(0.0));
        assert!(i.contains(1.0));
        assert!(!i.contains(1.0 + 1e-12));
    }
}
