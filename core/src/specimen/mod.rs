//! Specimens

mod defs;
mod ray_result;

// Re-export
pub use defs::*;
pub use ray_result::*;

use crate::geometry::Ray;
use crate::rng::RNG;
use crate::spectrum::{ComplexIndex, SpectralSample};

/// Interface for a material under measurement.
pub trait Specimen: Send + Sync {
    /// Perform the scattering computation for one photon striking the
    /// specimen at the origin of its entry plane. This propagates the photon
    /// through media and particles until it reflects, transmits, or is
    /// absorbed, and yields exactly one `RayResult` with no other side
    /// effect.
    ///
    /// * `photon`  - The incident photon ray; its direction points into the
    ///               specimen.
    /// * `ss`      - The single wavelength being measured with its intensity.
    /// * `ambient` - The complex refractive index of the medium surrounding
    ///               the specimen.
    /// * `rng`     - Thread-local random number generator.
    fn scatter(
        &self,
        photon: &Ray,
        ss: &SpectralSample,
        ambient: &ComplexIndex,
        rng: &mut RNG,
    ) -> RayResult;

    /// Provide a name for parameter output.
    fn name(&self) -> &str;
}

/// Owned trait object for a specimen.
pub type BoxedSpecimen = Box<dyn Specimen>;
