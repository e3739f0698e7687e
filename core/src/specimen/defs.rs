//! Medium and particle definitions.

use crate::error::{Error, Result};
use crate::geometry::Interval;
use crate::mist::*;
use crate::particle::ArcParticleGenerator;
use crate::spectrum::{complex_refractive_index, ArcSpectrum, ComplexIndex};

/// Tolerance when checking that medium weights sum to one.
pub const MEDIUM_WEIGHT_TOLERANCE: Float = 1e-6;

/// Associates an interstitial medium with its spectral components.
#[derive(Clone, Debug)]
pub struct MediumDef {
    /// The name of the medium, for debug output.
    pub name: String,

    /// Fractional amount of the whole pore space. The weights of all media
    /// of one specimen sum to one.
    pub weight: Float,

    /// Real part of the index of refraction by wavelength.
    pub n: Option<ArcSpectrum>,

    /// Imaginary part of the index of refraction (extinction index) by
    /// wavelength.
    pub k: Option<ArcSpectrum>,

    /// Optionally precomputed absorption coefficients. When absent, the
    /// coefficient is computed on the fly as α = 4πk/λ.
    pub alpha: Option<ArcSpectrum>,
}

impl MediumDef {
    /// Construct a medium definition.
    ///
    /// * `name`   - The name of the medium.
    /// * `weight` - Fraction of the total inter-particle space consumed by
    ///              this medium.
    /// * `n`      - The real part of the index of refraction.
    /// * `k`      - The extinction index.
    pub fn new(
        name: impl Into<String>,
        weight: Float,
        n: ArcSpectrum,
        k: ArcSpectrum,
    ) -> Self {
        Self {
            name: name.into(),
            weight,
            n: Some(n),
            k: Some(k),
            alpha: None,
        }
    }

    /// Construct a medium definition with a precomputed absorption spectrum.
    ///
    /// * `name`   - The name of the medium.
    /// * `weight` - Fraction of the total inter-particle space consumed by
    ///              this medium.
    /// * `n`      - The real part of the index of refraction.
    /// * `k`      - The extinction index.
    /// * `alpha`  - The precomputed absorption coefficients.
    pub fn new_with_alpha(
        name: impl Into<String>,
        weight: Float,
        n: ArcSpectrum,
        k: ArcSpectrum,
        alpha: ArcSpectrum,
    ) -> Self {
        Self {
            name: name.into(),
            weight,
            n: Some(n),
            k: Some(k),
            alpha: Some(alpha),
        }
    }

    /// Construct a vacuum medium definition, n = 1 and k = 0 everywhere.
    ///
    /// * `weight` - Fraction of the total inter-particle space consumed by
    ///              the vacuum.
    pub fn vacuum(weight: Float) -> Self {
        Self {
            name: "vacuum".to_string(),
            weight,
            n: None,
            k: None,
            alpha: None,
        }
    }

    /// Evaluate the complex refractive index at a wavelength.
    ///
    /// * `lambda` - The wavelength.
    pub fn complex_index(&self, lambda: Float) -> ComplexIndex {
        complex_refractive_index(self.n.as_ref(), self.k.as_ref(), lambda)
    }

    /// The absorption coefficient at a wavelength, taken from the
    /// precomputed spectrum when present and derived from k otherwise.
    ///
    /// * `lambda` - The wavelength.
    pub fn absorption_coefficient(&self, lambda: Float) -> Float {
        match &self.alpha {
            Some(alpha) => alpha.evaluate(lambda),
            None => self.complex_index(lambda).absorption_coefficient(lambda),
        }
    }
}

/// Validate a set of medium definitions: non-empty, non-negative weights
/// summing to 1.0 within `MEDIUM_WEIGHT_TOLERANCE`.
///
/// * `media` - The medium definitions.
pub fn validate_media(media: &[MediumDef]) -> Result<()> {
    if media.is_empty() {
        return Err(Error::config("at least one medium type must be defined"));
    }
    if let Some(m) = media.iter().find(|m| !(m.weight >= 0.0)) {
        return Err(Error::config(format!(
            "medium '{}' has invalid weight {}",
            m.name, m.weight
        )));
    }
    let total: Float = media.iter().map(|m| m.weight).sum();
    if abs(total - 1.0) > MEDIUM_WEIGHT_TOLERANCE {
        return Err(Error::config(format!(
            "medium weights sum to {total}, expected 1.0"
        )));
    }
    Ok(())
}

/// Defines one particle population of a specimen.
#[derive(Clone)]
pub struct ParticleDef {
    /// The name of the particle type.
    pub name: String,

    /// Real part of the index of refraction by wavelength.
    pub n: Option<ArcSpectrum>,

    /// Extinction index by wavelength.
    pub k: Option<ArcSpectrum>,

    /// Optionally precomputed absorption coefficients.
    pub alpha: Option<ArcSpectrum>,

    /// Mean particle roundness.
    pub roundness_mean: Float,

    /// Standard deviation of the particle roundness.
    pub roundness_stdev: Float,

    /// Roundness range.
    pub roundness_range: Interval,

    /// Fraction of the total particle count in this population.
    pub concentration: Float,

    /// Particle generator to use.
    pub generator: ArcParticleGenerator,
}

impl ParticleDef {
    /// The mean free distance between encounters with this population,
    /// taken from its generator.
    pub fn mean_distance(&self) -> Float {
        self.generator.average_particle_distance()
    }

    /// Evaluate the complex refractive index at a wavelength.
    ///
    /// * `lambda` - The wavelength.
    pub fn complex_index(&self, lambda: Float) -> ComplexIndex {
        complex_refractive_index(self.n.as_ref(), self.k.as_ref(), lambda)
    }

    /// The absorption coefficient at a wavelength.
    ///
    /// * `lambda` - The wavelength.
    pub fn absorption_coefficient(&self, lambda: Float) -> Float {
        match &self.alpha {
            Some(alpha) => alpha.evaluate(lambda),
            None => self.complex_index(lambda).absorption_coefficient(lambda),
        }
    }

    /// Validate the definition: name, positive concentration, sane roundness
    /// statistics, and a usable mean distance.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::config("particle definition needs a name"));
        }
        if !(self.concentration > 0.0) {
            return Err(Error::config(format!(
                "particle '{}' has non-positive concentration",
                self.name
            )));
        }
        if self.roundness_stdev < 0.0 || self.roundness_range.is_empty() {
            return Err(Error::config(format!(
                "particle '{}' has malformed roundness statistics",
                self.name
            )));
        }
        if !(self.mean_distance() > 0.0) {
            return Err(Error::config(format!(
                "particle '{}' has non-positive mean free distance",
                self.name
            )));
        }
        Ok(())
    }
}
