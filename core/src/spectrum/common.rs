//! Common spectral types.

use super::PiecewiseLinearSpectrum;
use crate::mist::*;
use std::sync::Arc;

/// Atomic reference counted `PiecewiseLinearSpectrum`. Spectra are shared
/// read-only by many medium and particle definitions.
pub type ArcSpectrum = Arc<PiecewiseLinearSpectrum>;

/// Stores a spectrum sample value at a given wavelength.
#[derive(Copy, Clone, Default, Debug, PartialEq, PartialOrd)]
pub struct SpectralSample {
    /// The wavelength in nanometres.
    pub lambda: Float,

    /// The sample value.
    pub value: Float,
}

impl SpectralSample {
    /// Create a new `SpectralSample`.
    ///
    /// * `lambda` - The wavelength.
    /// * `value`  - The sample value.
    pub fn new(lambda: Float, value: Float) -> Self {
        Self { lambda, value }
    }
}

/// The complex refractive index (n, k) of a medium or particle at one
/// wavelength. `k` is the extinction index.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexIndex {
    /// Real part of the index of refraction.
    pub n: Float,

    /// Imaginary part of the index of refraction (extinction index).
    pub k: Float,
}

impl ComplexIndex {
    /// Create a new `ComplexIndex`.
    ///
    /// * `n` - Real part of the index of refraction.
    /// * `k` - Extinction index.
    pub fn new(n: Float, k: Float) -> Self {
        Self { n, k }
    }

    /// The index of a vacuum, (1, 0).
    pub fn vacuum() -> Self {
        Self::new(1.0, 0.0)
    }

    /// The absorption coefficient α = 4πk/λ.
    ///
    /// * `lambda` - The wavelength. Must be positive.
    pub fn absorption_coefficient(&self, lambda: Float) -> Float {
        debug_assert!(lambda > 0.0);
        FOUR_PI * self.k / lambda
    }
}

/// Evaluate the complex refractive index from a pair of optional spectra.
/// A missing spectrum falls back to the vacuum value for that component.
///
/// * `n`      - The spectrum for the real part, if any.
/// * `k`      - The spectrum for the extinction index, if any.
/// * `lambda` - The wavelength.
pub fn complex_refractive_index(
    n: Option<&ArcSpectrum>,
    k: Option<&ArcSpectrum>,
    lambda: Float,
) -> ComplexIndex {
    ComplexIndex::new(
        n.map_or(1.0, |s| s.evaluate(lambda)),
        k.map_or(0.0, |s| s.evaluate(lambda)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn vacuum_does_not_absorb() {
        let v = ComplexIndex::vacuum();
        assert_eq!(v.absorption_coefficient(500.0), 0.0);
    }

    #[test]
    fn absorption_coefficient_formula() {
        let c = ComplexIndex::new(1.31, 2.0e-7);
        let alpha = c.absorption_coefficient(500.0);
        assert!(approx_eq!(
            Float,
            alpha,
            FOUR_PI * 2.0e-7 / 500.0,
            ulps = 2
        ));
    }

    #[test]
    fn missing_spectra_default_to_vacuum() {
        let c = complex_refractive_index(None, None, 632.8);
        assert_eq!(c, ComplexIndex::vacuum());
    }
}
