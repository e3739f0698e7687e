//! Spherical Coordinates

#![allow(dead_code)]

use super::Vector3f;
use crate::mist::*;

/// A point in spherical coordinates. The polar angle θ is measured away from
/// the up direction (+z), the azimuthal angle φ around the up direction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SphericalCoordinates {
    /// Polar angle in radians, typically in [0, π].
    pub polar: Float,

    /// Azimuthal angle in radians, typically in [0, 2π).
    pub azimuth: Float,

    /// Radius.
    pub radius: Float,
}

impl SphericalCoordinates {
    /// Construct a unit-radius point in spherical coordinates.
    ///
    /// * `polar`   - The polar angle away from up, in radians.
    /// * `azimuth` - The azimuthal angle around up, in radians.
    pub fn new(polar: Float, azimuth: Float) -> Self {
        Self {
            polar,
            azimuth,
            radius: 1.0,
        }
    }

    /// Construct a point in spherical coordinates with an explicit radius.
    ///
    /// * `polar`   - The polar angle away from up, in radians.
    /// * `azimuth` - The azimuthal angle around up, in radians.
    /// * `radius`  - The radius.
    pub fn new_with_radius(polar: Float, azimuth: Float, radius: Float) -> Self {
        Self {
            polar,
            azimuth,
            radius,
        }
    }

    /// Convert to a cartesian vector of length `radius`.
    pub fn to_vector(&self) -> Vector3f {
        let sin_theta = self.polar.sin();
        Vector3f::new(
            sin_theta * self.azimuth.cos(),
            sin_theta * self.azimuth.sin(),
            self.polar.cos(),
        ) * self.radius
    }

    /// Convert a non-zero cartesian vector to spherical coordinates. The
    /// azimuth is wrapped into [0, 2π).
    ///
    /// * `v` - The vector.
    pub fn from_vector(v: &Vector3f) -> Self {
        let radius = v.length();
        debug_assert!(radius > 0.0);
        let polar = clamp(v.z / radius, -1.0, 1.0).acos();
        let azimuth = v.y.atan2(v.x).rem_euclid(TWO_PI);
        Self {
            polar,
            azimuth,
            radius,
        }
    }
}

impl Default for SphericalCoordinates {
    /// Constructs the zenith direction (0, 0) with radius 1.
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl std::fmt::Display for SphericalCoordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(θ: {}, φ: {}, r: {})", self.polar, self.azimuth, self.radius)
    }
}
