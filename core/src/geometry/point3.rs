//! 3-D Points

#![allow(dead_code)]

use super::Vector3f;
use crate::mist::*;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// A 3-D point containing `Float` values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point3f {
    /// X-coordinate.
    pub x: Float,

    /// Y-coordinate.
    pub y: Float,

    /// Z-coordinate.
    pub z: Float,
}

impl Point3f {
    /// Creates a new 3-D point.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    /// * `z` - Z-coordinate.
    pub fn new(x: Float, y: Float, z: Float) -> Self {
        Self { x, y, z }
    }

    /// Creates the origin point.
    pub fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Returns true if any coordinate is NaN.
    pub fn has_nans(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    /// Returns the distance to another point.
    ///
    /// * `other` - The other point.
    pub fn distance(&self, other: &Self) -> Float {
        (*self - *other).length()
    }
}

impl Add<Vector3f> for Point3f {
    type Output = Self;

    /// Offsets the point by the given vector.
    ///
    /// * `v` - The offset vector.
    fn add(self, v: Vector3f) -> Self {
        Self::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl AddAssign<Vector3f> for Point3f {
    /// Performs the `+=` operation with an offset vector.
    ///
    /// * `v` - The offset vector.
    fn add_assign(&mut self, v: Vector3f) {
        *self = *self + v;
    }
}

impl Sub<Vector3f> for Point3f {
    type Output = Self;

    /// Offsets the point by the negated vector.
    ///
    /// * `v` - The offset vector.
    fn sub(self, v: Vector3f) -> Self {
        Self::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }
}

impl SubAssign<Vector3f> for Point3f {
    /// Performs the `-=` operation with an offset vector.
    ///
    /// * `v` - The offset vector.
    fn sub_assign(&mut self, v: Vector3f) {
        *self = *self - v;
    }
}

impl Sub for Point3f {
    type Output = Vector3f;

    /// Returns the vector pointing from `other` to this point.
    ///
    /// * `other` - The other point.
    fn sub(self, other: Self) -> Vector3f {
        Vector3f::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl From<Point3f> for Vector3f {
    /// Reinterprets a point as the vector from the origin to it.
    ///
    /// * `p` - The point.
    fn from(p: Point3f) -> Self {
        Vector3f::new(p.x, p.y, p.z)
    }
}

impl std::fmt::Display for Point3f {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_vector_arithmetic() {
        let p = Point3f::new(1.0, 2.0, 3.0);
        let v = Vector3f::new(0.5, -1.0, 2.0);
        assert_eq!(p + v, Point3f::new(1.5, 1.0, 5.0));
        assert_eq!((p + v) - p, v);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Point3f::origin();
        let b = Point3f::new(3.0, 4.0, 0.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
    }
}
