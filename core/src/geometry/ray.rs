//! Rays

#![allow(dead_code)]

use super::{Point3f, Vector3f};
use crate::mist::*;
use std::fmt::{Debug, Display, Formatter, Result};

/// A ray with an origin and a unit direction.
#[derive(Copy, Clone, PartialEq)]
pub struct Ray {
    /// Origin.
    pub o: Point3f,

    /// Direction.
    pub d: Vector3f,

    /// Maximum extent of the ray.
    pub t_max: Float,
}

impl Ray {
    /// Returns a ray with unbounded extent.
    ///
    /// * `o` - Origin.
    /// * `d` - Direction.
    pub fn new(o: Point3f, d: Vector3f) -> Self {
        Self {
            o,
            d,
            t_max: INFINITY,
        }
    }

    /// Returns a ray with the given maximum extent.
    ///
    /// * `o`     - Origin.
    /// * `d`     - Direction.
    /// * `t_max` - Maximum extent of the ray.
    pub fn new_bounded(o: Point3f, d: Vector3f, t_max: Float) -> Self {
        Self { o, d, t_max }
    }

    /// Get the position along the ray at a given parameter.
    ///
    /// * `t` - Parameter.
    pub fn at(&self, t: Float) -> Point3f {
        self.o + self.d * t
    }
}

impl Display for Ray {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{{o: {}, d: {}, t_max: {}}}", self.o, self.d, self.t_max)
    }
}

impl Debug for Ray {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_walks_along_direction() {
        let r = Ray::new(Point3f::origin(), Vector3f::new(0.0, 0.0, -1.0));
        assert_eq!(r.at(2.5), Point3f::new(0.0, 0.0, -2.5));
    }
}
