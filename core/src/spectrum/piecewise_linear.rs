//! Piecewise Linear Spectrum

use crate::error::{Error, Result};
use crate::mist::*;

/// Specifies a set of values by wavelength. Values between defined
/// wavelengths are linearly interpolated; values outside the defined range
/// evaluate to zero. Immutable after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct PiecewiseLinearSpectrum {
    /// The name of the spectrum, for debug output.
    name: String,

    /// The defined wavelengths, strictly increasing.
    wavelengths: Vec<Float>,

    /// The value at each defined wavelength.
    values: Vec<Float>,
}

impl PiecewiseLinearSpectrum {
    /// Construct a spectrum from explicit (wavelength, value) samples.
    /// Wavelengths must be strictly increasing, free of NaNs and match the
    /// values in length.
    ///
    /// * `name`        - The name of the spectrum.
    /// * `wavelengths` - The wavelength data elements.
    /// * `values`      - The values for each wavelength.
    pub fn new(
        name: impl Into<String>,
        wavelengths: Vec<Float>,
        values: Vec<Float>,
    ) -> Result<Self> {
        let name = name.into();
        if wavelengths.is_empty() {
            return Err(Error::config(format!("spectrum '{name}' has no samples")));
        }
        if wavelengths.len() != values.len() {
            return Err(Error::config(format!(
                "spectrum '{name}' has {} wavelengths but {} values",
                wavelengths.len(),
                values.len()
            )));
        }
        if wavelengths.iter().chain(values.iter()).any(|v| v.is_nan()) {
            return Err(Error::config(format!("spectrum '{name}' contains NaN")));
        }
        if wavelengths.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::config(format!(
                "spectrum '{name}' wavelengths are not strictly increasing"
            )));
        }
        Ok(Self {
            name,
            wavelengths,
            values,
        })
    }

    /// Construct a spectrum over a low/high wavelength range with the values
    /// spread uniformly between those endpoints.
    ///
    /// * `name`   - The name of the spectrum.
    /// * `low`    - The lowest wavelength. Must be non-negative, so the same
    ///              type can describe warp functions over a unit domain.
    /// * `high`   - The highest wavelength. Must be greater than `low`.
    /// * `values` - The values to be uniformly spread over [low, high].
    pub fn new_uniform(
        name: impl Into<String>,
        low: Float,
        high: Float,
        values: Vec<Float>,
    ) -> Result<Self> {
        let name = name.into();
        if !(low >= 0.0 && high > low) {
            return Err(Error::config(format!(
                "spectrum '{name}' has invalid range [{low}, {high}]"
            )));
        }
        if values.len() < 2 {
            return Err(Error::config(format!(
                "spectrum '{name}' needs at least 2 values over a range"
            )));
        }
        let n = values.len();
        let wavelengths = (0..n)
            .map(|i| lerp(i as Float / (n - 1) as Float, low, high))
            .collect();
        Self::new(name, wavelengths, values)
    }

    /// Construct a spectrum that is constant over a wavelength range.
    ///
    /// * `name`  - The name of the spectrum.
    /// * `low`   - The lowest wavelength. Must be non-negative.
    /// * `high`  - The highest wavelength. Must be greater than `low`.
    /// * `value` - The constant value.
    pub fn constant(name: impl Into<String>, low: Float, high: Float, value: Float) -> Result<Self> {
        Self::new_uniform(name, low, high, vec![value, value])
    }

    /// Linearly interpolate to get a value at the specified wavelength.
    /// Wavelengths outside the defined range evaluate to zero.
    ///
    /// * `lambda` - The desired wavelength.
    pub fn evaluate(&self, lambda: Float) -> Float {
        if lambda < self.low() || lambda > self.high() {
            return 0.0;
        }
        if self.wavelengths.len() == 1 {
            return self.values[0];
        }

        let i = find_interval(self.wavelengths.len(), |j| self.wavelengths[j] <= lambda);
        let (w0, w1) = (self.wavelengths[i], self.wavelengths[i + 1]);
        let t = (lambda - w0) / (w1 - w0);
        lerp(t, self.values[i], self.values[i + 1])
    }

    /// Return the name of this spectrum.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Provide access to the values for debugging.
    pub fn values(&self) -> &[Float] {
        &self.values
    }

    /// Return the lowest supported wavelength.
    pub fn low(&self) -> Float {
        self.wavelengths[0]
    }

    /// Return the highest supported wavelength.
    pub fn high(&self) -> Float {
        self.wavelengths[self.wavelengths.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn spectrum() -> PiecewiseLinearSpectrum {
        PiecewiseLinearSpectrum::new(
            "test",
            vec![400.0, 500.0, 600.0],
            vec![1.0, 3.0, 2.0],
        )
        .unwrap()
    }

    #[test]
    fn defined_samples_are_exact() {
        let s = spectrum();
        assert_eq!(s.evaluate(400.0), 1.0);
        assert_eq!(s.evaluate(500.0), 3.0);
        assert_eq!(s.evaluate(600.0), 2.0);
    }

    #[test]
    fn midpoint_is_average() {
        let s = spectrum();
        assert_eq!(s.evaluate(450.0), 2.0);
        assert_eq!(s.evaluate(550.0), 2.5);
    }

    #[test]
    fn out_of_range_is_zero() {
        let s = spectrum();
        assert_eq!(s.evaluate(399.9), 0.0);
        assert_eq!(s.evaluate(600.1), 0.0);
    }

    #[test]
    fn uniform_range_spreads_samples() {
        let s =
            PiecewiseLinearSpectrum::new_uniform("u", 400.0, 600.0, vec![0.0, 1.0, 0.0]).unwrap();
        assert_eq!(s.low(), 400.0);
        assert_eq!(s.high(), 600.0);
        assert_eq!(s.evaluate(500.0), 1.0);
        assert_eq!(s.evaluate(450.0), 0.5);
    }

    #[test]
    fn degenerate_inputs_are_rejected() {
        assert!(PiecewiseLinearSpectrum::new("e", vec![], vec![]).is_err());
        assert!(PiecewiseLinearSpectrum::new("m", vec![1.0, 2.0], vec![1.0]).is_err());
        assert!(PiecewiseLinearSpectrum::new("d", vec![2.0, 2.0], vec![1.0, 1.0]).is_err());
        assert!(PiecewiseLinearSpectrum::new("n", vec![1.0, f64::NAN], vec![1.0, 1.0]).is_err());
        assert!(PiecewiseLinearSpectrum::new_uniform("r", 500.0, 400.0, vec![1.0, 1.0]).is_err());
    }

    proptest! {
        #[test]
        fn evaluate_stays_within_sample_bounds(lambda in 400.0..600.0f64) {
            let s = spectrum();
            let v = s.evaluate(lambda);
            prop_assert!((1.0..=3.0).contains(&v));
        }
    }
}
