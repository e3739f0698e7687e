//! Common sampling functions.

use crate::geometry::*;
use crate::mist::*;

/// Uniformly sample a direction on the unit sphere.
///
/// * `u1` - The first random sample in [0, 1).
/// * `u2` - The second random sample in [0, 1).
pub fn uniform_sample_sphere(u1: Float, u2: Float) -> Vector3f {
    let z = 1.0 - 2.0 * u1;
    let r = max(0.0, 1.0 - z * z).sqrt();
    let phi = TWO_PI * u2;
    Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}

/// Uniformly sample a direction on the upper hemisphere (z ≥ 0).
///
/// * `u1` - The first random sample in [0, 1).
/// * `u2` - The second random sample in [0, 1).
pub fn uniform_sample_hemisphere(u1: Float, u2: Float) -> Vector3f {
    let z = u1;
    let r = max(0.0, 1.0 - z * z).sqrt();
    let phi = TWO_PI * u2;
    Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}

/// Sample a direction on the upper hemisphere with a cosine-weighted
/// distribution (Malley's method over the concentric disk).
///
/// * `u1` - The first random sample in [0, 1).
/// * `u2` - The second random sample in [0, 1).
pub fn cosine_sample_hemisphere(u1: Float, u2: Float) -> Vector3f {
    let (dx, dy) = concentric_sample_disk(u1, u2);
    let z = max(0.0, 1.0 - dx * dx - dy * dy).sqrt();
    Vector3f::new(dx, dy, z)
}

/// Sample a point on the unit disk using the concentric mapping of the unit
/// square onto the disk.
///
/// * `u1` - The first random sample in [0, 1).
/// * `u2` - The second random sample in [0, 1).
pub fn concentric_sample_disk(u1: Float, u2: Float) -> (Float, Float) {
    // Map uniform samples to [-1, 1]^2.
    let ox = 2.0 * u1 - 1.0;
    let oy = 2.0 * u2 - 1.0;

    // Handle degeneracy at the origin.
    if ox == 0.0 && oy == 0.0 {
        return (0.0, 0.0);
    }

    let (r, theta) = if abs(ox) > abs(oy) {
        (ox, PI * 0.25 * (oy / ox))
    } else {
        (oy, PI_OVER_TWO - PI * 0.25 * (ox / oy))
    };
    (r * theta.cos(), r * theta.sin())
}

/// Sample a free-path length from the exponential distribution with the
/// given mean.
///
/// * `u`    - A random sample in [0, 1).
/// * `mean` - The mean free path. Must be positive.
pub fn sample_exponential(u: Float, mean: Float) -> Float {
    debug_assert!(mean > 0.0);
    -mean * (1.0 - u).ln()
}

/// Pick an index from a discrete distribution given by non-negative weights.
/// The draw `u` is scaled by the sum of the weights, so they need not be
/// normalized. The final index absorbs any floating point slack.
///
/// * `weights` - The non-empty weight list.
/// * `u`       - A random sample in [0, 1).
pub fn pick_weighted(weights: &[Float], u: Float) -> usize {
    debug_assert!(!weights.is_empty());
    let total: Float = weights.iter().sum();
    let mut target = u * total;
    for (i, w) in weights.iter().enumerate() {
        if target < *w {
            return i;
        }
        target -= *w;
    }
    weights.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RNG;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    #[test]
    fn sphere_samples_are_unit_length() {
        let mut rng = RNG::new(11);
        for _ in 0..1_000 {
            let v = uniform_sample_sphere(rng.uniform_float(), rng.uniform_float());
            assert!(approx_eq!(Float, v.length(), 1.0, epsilon = 1e-12));
        }
    }

    #[test]
    fn hemisphere_samples_point_up() {
        let mut rng = RNG::new(12);
        for _ in 0..1_000 {
            let v = uniform_sample_hemisphere(rng.uniform_float(), rng.uniform_float());
            assert!(v.z >= 0.0);
            let c = cosine_sample_hemisphere(rng.uniform_float(), rng.uniform_float());
            assert!(c.z >= 0.0);
        }
    }

    #[test]
    fn exponential_mean_converges() {
        let mut rng = RNG::new(13);
        let n = 200_000;
        let sum: Float = (0..n)
            .map(|_| sample_exponential(rng.uniform_float(), 2.0))
            .sum();
        let mean = sum / n as Float;
        assert!((mean - 2.0).abs() < 0.05);
    }

    #[test]
    fn weighted_pick_respects_zero_weights() {
        let weights = [0.0, 1.0, 0.0];
        assert_eq!(pick_weighted(&weights, 0.0), 1);
        assert_eq!(pick_weighted(&weights, 0.999), 1);
    }

    proptest! {
        #[test]
        fn weighted_pick_in_range(u in 0.0..1.0f64) {
            let weights = [0.75, 0.2, 0.05];
            let i = pick_weighted(&weights, u);
            prop_assert!(i < weights.len());
        }
    }
}
