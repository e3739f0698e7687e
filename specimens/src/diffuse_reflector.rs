//! Diffuse Reflector

use core::geometry::Ray;
use core::rng::RNG;
use core::sampling::cosine_sample_hemisphere;
use core::specimen::{RayResult, Specimen};
use core::spectrum::{ComplexIndex, SpectralSample};

/// Models a perfectly diffuse reflector. Every photon leaves on the incident
/// side with a cosine-distributed direction, regardless of wavelength.
/// Useful as a sanity baseline for the measurement machinery.
#[derive(Clone, Debug, Default)]
pub struct DiffuseReflector {}

impl DiffuseReflector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Specimen for DiffuseReflector {
    fn scatter(
        &self,
        photon: &Ray,
        _ss: &SpectralSample,
        _ambient: &ComplexIndex,
        rng: &mut RNG,
    ) -> RayResult {
        let d = cosine_sample_hemisphere(rng.uniform_float(), rng.uniform_float());
        RayResult::reflected(Ray::new(photon.o, d))
    }

    fn name(&self) -> &str {
        "diffuse"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::geometry::{Point3f, Vector3f};
    use core::specimen::Interaction;

    #[test]
    fn always_reflects_into_the_upper_hemisphere() {
        let specimen = DiffuseReflector::new();
        let photon = Ray::new(Point3f::origin(), Vector3f::new(0.0, 0.0, -1.0));
        let ss = SpectralSample::new(550.0, 1.0);
        let ambient = ComplexIndex::vacuum();
        let mut rng = RNG::new(17);

        for _ in 0..200 {
            let result = specimen.scatter(&photon, &ss, &ambient, &mut rng);
            assert_eq!(result.interaction(), Interaction::Reflected);
            let exit = result.exit_ray().unwrap();
            assert!(exit.d.z >= 0.0);
        }
    }
}
