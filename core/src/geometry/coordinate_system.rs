//! 3-D Coordinate System

#![allow(dead_code)]

use super::Vector3f;
use crate::mist::*;

/// Create an orthonormal coordinate system from a single unit vector and
/// return the two other basis vectors.
///
/// A second vector is constructed from the first by zeroing one of the
/// coordinates, swapping the remaining two and negating one of them. The
/// third vector is the cross product of the given vector and the second.
///
/// * `v1` - The first unit vector of the coordinate system.
pub fn coordinate_system(v1: &Vector3f) -> (Vector3f, Vector3f) {
    let v2 = if abs(v1.x) > abs(v1.y) {
        Vector3f::new(-v1.z, 0.0, v1.x) / (v1.x * v1.x + v1.z * v1.z).sqrt()
    } else {
        Vector3f::new(0.0, v1.z, -v1.y) / (v1.y * v1.y + v1.z * v1.z).sqrt()
    };
    let v3 = v1.cross(&v2);
    (v2, v3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn basis_is_orthonormal() {
        let v1 = Vector3f::new(1.0, 2.0, 3.0).normalize();
        let (v2, v3) = coordinate_system(&v1);
        assert!(approx_eq!(Float, v1.dot(&v2), 0.0, epsilon = 1e-12));
        assert!(approx_eq!(Float, v1.dot(&v3), 0.0, epsilon = 1e-12));
        assert!(approx_eq!(Float, v2.dot(&v3), 0.0, epsilon = 1e-12));
        assert!(approx_eq!(Float, v2.length(), 1.0, epsilon = 1e-12));
        assert!(approx_eq!(Float, v3.length(), 1.0, epsilon = 1e-12));
    }
}
