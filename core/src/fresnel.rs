//! Fresnel reflectance and Snell refraction at dielectric boundaries.

use crate::geometry::*;
use crate::mist::*;
use std::mem::swap;

/// Returns the fresnel reflectance for dielectric boundaries and unpolarized
/// light.
///
/// * `cos_theta_i` - cos(θi) for angle between incident direction and geometric
///                   surface normal.
/// * `eta_i`       - index of refraction for medium that incident ray is in.
/// * `eta_t`       - index of refraction for medium that incident ray is entering.
pub fn fr_dielectric(cos_theta_i: Float, eta_i: Float, eta_t: Float) -> Float {
    let mut cos_theta_i = clamp(cos_theta_i, -1.0, 1.0);
    let mut eta_i = eta_i;
    let mut eta_t = eta_t;

    // Potentially swap indices of refraction.
    let entering = cos_theta_i > 0.0;
    if !entering {
        swap(&mut eta_i, &mut eta_t);
        cos_theta_i = abs(cos_theta_i);
    }

    // Compute cos_theta_t using Snell's law.
    let sin_theta_i = max(0.0, 1.0 - cos_theta_i * cos_theta_i).sqrt();
    let sin_theta_t = eta_i / eta_t * sin_theta_i;

    // Handle total internal reflection.
    if sin_theta_t >= 1.0 {
        1.0
    } else {
        let cos_theta_t = max(0.0, 1.0 - sin_theta_t * sin_theta_t).sqrt();
        let r_parl = ((eta_t * cos_theta_i) - (eta_i * cos_theta_t))
            / ((eta_t * cos_theta_i) + (eta_i * cos_theta_t));
        let r_perp = ((eta_i * cos_theta_i) - (eta_t * cos_theta_t))
            / ((eta_i * cos_theta_i) + (eta_t * cos_theta_t));
        (r_parl * r_parl + r_perp * r_perp) / 2.0
    }
}

/// Mirror a propagation direction about a surface normal.
///
/// * `d` - The incoming unit direction, pointing toward the surface.
/// * `n` - The unit surface normal.
pub fn reflect(d: &Vector3f, n: &Vector3f) -> Vector3f {
    *d - 2.0 * d.dot(n) * *n
}

/// Refract a propagation direction through a boundary using Snell's law.
/// Returns `None` on total internal reflection.
///
/// * `d`     - The incoming unit direction, pointing toward the surface
///             (d·n < 0).
/// * `n`     - The unit surface normal on the incident side.
/// * `eta_i` - Index of refraction on the incident side.
/// * `eta_t` - Index of refraction on the transmitted side.
pub fn refract(d: &Vector3f, n: &Vector3f, eta_i: Float, eta_t: Float) -> Option<Vector3f> {
    let eta = eta_i / eta_t;
    let cos_theta_i = clamp(-d.dot(n), -1.0, 1.0);
    let sin2_theta_t = eta * eta * max(0.0, 1.0 - cos_theta_i * cos_theta_i);
    if sin2_theta_t >= 1.0 {
        return None;
    }
    let cos_theta_t = (1.0 - sin2_theta_t).sqrt();
    Some(eta * *d + (eta * cos_theta_i - cos_theta_t) * *n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn normal_incidence_reflectance() {
        // R = ((n1 - n2) / (n1 + n2))^2 at normal incidence.
        let r = fr_dielectric(1.0, 1.0, 1.5);
        assert!(approx_eq!(Float, r, 0.04, epsilon = 1e-6));
    }

    #[test]
    fn grazing_incidence_is_total() {
        let r = fr_dielectric(1e-9, 1.0, 1.5);
        assert!(r > 0.99);
    }

    #[test]
    fn total_internal_reflection() {
        // From dense to thin past the critical angle.
        let cos_i = (80.0f64).to_radians().cos();
        assert_eq!(fr_dielectric(-cos_i, 1.0, 1.5), 1.0);
        assert!(refract(
            &Vector3f::new((1.0 - cos_i * cos_i).sqrt(), 0.0, -cos_i),
            &Vector3f::z_axis(),
            1.5,
            1.0
        )
        .is_none());
    }

    #[test]
    fn reflect_flips_normal_component() {
        let d = Vector3f::new(0.6, 0.0, -0.8);
        let r = reflect(&d, &Vector3f::z_axis());
        assert!(approx_eq!(Float, r.x, 0.6, epsilon = 1e-12));
        assert!(approx_eq!(Float, r.z, 0.8, epsilon = 1e-12));
    }

    #[test]
    fn refraction_obeys_snell() {
        let d = Vector3f::new(0.6, 0.0, -0.8);
        let t = refract(&d, &Vector3f::z_axis(), 1.0, 1.5).unwrap();
        let sin_i = 0.6;
        let sin_t = (t.x * t.x + t.y * t.y).sqrt() / t.length();
        assert!(approx_eq!(Float, sin_i / sin_t, 1.5, epsilon = 1e-9));
    }

    #[test]
    fn matched_indices_pass_straight_through() {
        let d = Vector3f::new(0.6, 0.0, -0.8);
        let t = refract(&d, &Vector3f::z_axis(), 1.33, 1.33).unwrap();
        assert!(approx_eq!(Float, (t - d).length(), 0.0, epsilon = 1e-12));
        assert_eq!(fr_dielectric(0.8, 1.33, 1.33), 0.0);
    }
}
