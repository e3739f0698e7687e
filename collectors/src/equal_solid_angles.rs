//! Equal Solid Angles Collector Sphere

use core::collector::{CollectorSphere, SensorArray};
use core::error::{Error, Result};
use core::geometry::{Ray, SphericalCoordinates};
use core::mist::*;

/// A collector sphere that subdivides each enabled hemisphere into
/// `stacks` polar bands times `slices` azimuthal wedges, every sensor
/// subtending the same solid angle `2π / (stacks * slices)`.
///
/// The bands are spaced by an equal-area condition on cos θ measured from
/// the hemisphere's pole, so band 0 caps the pole and the last band touches
/// the equator. Within a hemisphere the linear sensor index is
/// `band * slices + wedge`; upper-hemisphere sensors precede
/// lower-hemisphere sensors.
///
/// Direction lookup is O(1), with half-open bins: a direction exactly on a
/// band or wedge boundary resolves to the bin whose lower edge it sits on,
/// and the equator belongs to the upper hemisphere.
pub struct EqualSolidAnglesCollectorSphere {
    /// Number of polar bands per hemisphere.
    stacks: usize,

    /// Number of azimuthal wedges per band.
    slices: usize,

    /// Is the upper hemisphere enabled?
    upper: bool,

    /// Is the lower hemisphere enabled?
    lower: bool,

    /// Per-sensor hit counters.
    sensors: SensorArray,
}

impl EqualSolidAnglesCollectorSphere {
    /// Fully construct an instance providing all the necessary parameters.
    ///
    /// * `stacks` - The number of polar bands per hemisphere. Must be positive.
    /// * `slices` - The number of azimuthal wedges per band. Must be positive.
    /// * `upper`  - Set to true to measure reflectance.
    /// * `lower`  - Set to true to measure transmittance.
    pub fn new(stacks: usize, slices: usize, upper: bool, lower: bool) -> Result<Self> {
        if stacks == 0 || slices == 0 {
            return Err(Error::config(
                "equal solid angle sphere needs positive stacks and slices",
            ));
        }
        if !upper && !lower {
            return Err(Error::config(
                "equal solid angle sphere needs at least one enabled hemisphere",
            ));
        }
        let hemispheres = upper as usize + lower as usize;
        Ok(Self {
            stacks,
            slices,
            upper,
            lower,
            sensors: SensorArray::new(hemispheres * stacks * slices),
        })
    }

    /// Get the number of stacks.
    pub fn stacks(&self) -> usize {
        self.stacks
    }

    /// Get the number of slices.
    pub fn slices(&self) -> usize {
        self.slices
    }

    /// Test if the upper hemisphere is enabled.
    pub fn upper_enabled(&self) -> bool {
        self.upper
    }

    /// Test if the lower hemisphere is enabled.
    pub fn lower_enabled(&self) -> bool {
        self.lower
    }

    /// Number of sensors in one hemisphere.
    fn sensors_per_hemisphere(&self) -> usize {
        self.stacks * self.slices
    }

    /// Index of the first lower-hemisphere sensor.
    fn lower_offset(&self) -> usize {
        if self.upper {
            self.sensors_per_hemisphere()
        } else {
            0
        }
    }

    /// Split a sensor id into (is_upper, band, wedge). The id must already
    /// have been validated against the sensor array.
    fn decompose(&self, sensor_id: usize) -> (bool, usize, usize) {
        let per_hemisphere = self.sensors_per_hemisphere();
        let is_upper = self.upper && sensor_id < per_hemisphere;
        let local = if is_upper {
            sensor_id
        } else {
            sensor_id - self.lower_offset()
        };
        (is_upper, local / self.slices, local % self.slices)
    }

    /// Edges of a band in |cos θ|, measured from the hemisphere's pole.
    /// Band b spans |cos θ| from `1 - b / stacks` down to `1 - (b+1) / stacks`.
    fn band_edges(&self, band: usize) -> (Float, Float) {
        let near_pole = 1.0 - band as Float / self.stacks as Float;
        let near_equator = 1.0 - (band + 1) as Float / self.stacks as Float;
        (near_pole, near_equator)
    }
}

impl CollectorSphere for EqualSolidAnglesCollectorSphere {
    fn clear(&mut self) {
        self.sensors.clear();
    }

    fn num_sensors(&self) -> usize {
        self.sensors.num_sensors()
    }

    fn sensor_id(&self, photon: &Ray) -> Option<usize> {
        let d = photon.d;
        if d.has_nans() || d.length_squared() == 0.0 {
            return None;
        }
        let d = d.normalize();

        // Equator belongs to the upper hemisphere.
        let is_upper = d.z >= 0.0;
        if (is_upper && !self.upper) || (!is_upper && !self.lower) {
            return None;
        }

        let cos_theta = abs(d.z);
        let band = clamp(
            ((1.0 - cos_theta) * self.stacks as Float) as usize,
            0,
            self.stacks - 1,
        );

        let azimuth = d.y.atan2(d.x).rem_euclid(TWO_PI);
        let wedge = clamp(
            (azimuth * INV_TWO_PI * self.slices as Float) as usize,
            0,
            self.slices - 1,
        );

        let offset = if is_upper { 0 } else { self.lower_offset() };
        Some(offset + band * self.slices + wedge)
    }

    fn hits(&self, sensor_id: usize) -> Result<u64> {
        self.sensors.hits(sensor_id)
    }

    fn add_hits(&mut self, sensor_id: usize, count: u64) {
        self.sensors.add(sensor_id, count);
    }

    fn center(&self, sensor_id: usize) -> Result<SphericalCoordinates> {
        self.sensors.check(sensor_id)?;
        let (is_upper, band, wedge) = self.decompose(sensor_id);

        let cos_theta = 1.0 - (band as Float + 0.5) / self.stacks as Float;
        let polar = if is_upper {
            clamp(cos_theta, -1.0, 1.0).acos()
        } else {
            PI - clamp(cos_theta, -1.0, 1.0).acos()
        };
        let azimuth = (wedge as Float + 0.5) * TWO_PI / self.slices as Float;
        Ok(SphericalCoordinates::new(polar, azimuth))
    }

    fn solid_angle(&self, sensor_id: usize) -> Result<Float> {
        self.sensors.check(sensor_id)?;
        Ok(TWO_PI / self.sensors_per_hemisphere() as Float)
    }

    /// The projected solid angle of a band sensor is
    /// `Δφ (cos² θ₀ - cos² θ₁) / 2` with θ₀, θ₁ the band edges.
    fn projected_solid_angle(&self, sensor_id: usize) -> Result<Float> {
        self.sensors.check(sensor_id)?;
        let (_, band, _) = self.decompose(sensor_id);
        let (c0, c1) = self.band_edges(band);
        let delta_phi = TWO_PI / self.slices as Float;
        Ok(delta_phi * (c0 * c0 - c1 * c1) * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::geometry::{Point3f, Vector3f};
    use core::rng::RNG;
    use float_cmp::assert_approx_eq;

    fn ray(x: Float, y: Float, z: Float) -> Ray {
        Ray::new(Point3f::origin(), Vector3f::new(x, y, z))
    }

    #[test]
    fn full_sphere_solid_angles_sum_to_four_pi() {
        let cs = EqualSolidAnglesCollectorSphere::new(9, 16, true, true).unwrap();
        assert_eq!(cs.num_sensors(), 2 * 9 * 16);
        let total: Float = (0..cs.num_sensors())
            .map(|id| cs.solid_angle(id).unwrap())
            .sum();
        assert_approx_eq!(Float, total, FOUR_PI, epsilon = 1e-9);
    }

    #[test]
    fn hemisphere_solid_angles_sum_to_two_pi() {
        let cs = EqualSolidAnglesCollectorSphere::new(7, 5, true, false).unwrap();
        assert_eq!(cs.num_sensors(), 7 * 5);
        let total: Float = (0..cs.num_sensors())
            .map(|id| cs.solid_angle(id).unwrap())
            .sum();
        assert_approx_eq!(Float, total, TWO_PI, epsilon = 1e-9);
    }

    #[test]
    fn projected_solid_angles_sum_to_pi_per_hemisphere() {
        let cs = EqualSolidAnglesCollectorSphere::new(10, 12, true, true).unwrap();
        let per_hemisphere = 10 * 12;
        let upper: Float = (0..per_hemisphere)
            .map(|id| cs.projected_solid_angle(id).unwrap())
            .sum();
        let lower: Float = (per_hemisphere..2 * per_hemisphere)
            .map(|id| cs.projected_solid_angle(id).unwrap())
            .sum();
        assert_approx_eq!(Float, upper, PI, epsilon = 1e-9);
        assert_approx_eq!(Float, lower, PI, epsilon = 1e-9);
    }

    #[test]
    fn zenith_maps_to_first_wedge_of_polar_band() {
        let cs = EqualSolidAnglesCollectorSphere::new(4, 8, true, true).unwrap();
        assert_eq!(cs.sensor_id(&ray(0.0, 0.0, 1.0)), Some(0));
        // Nadir lands in the lower hemisphere's polar band.
        assert_eq!(cs.sensor_id(&ray(0.0, 0.0, -1.0)), Some(4 * 8));
    }

    #[test]
    fn equator_belongs_to_upper_hemisphere() {
        let cs = EqualSolidAnglesCollectorSphere::new(4, 8, true, true).unwrap();
        let id = cs.sensor_id(&ray(1.0, 0.0, 0.0)).unwrap();
        assert!(id < 4 * 8);
        // Last band, first wedge.
        assert_eq!(id, 3 * 8);
    }

    #[test]
    fn disabled_hemisphere_drops_directions() {
        let mut cs = EqualSolidAnglesCollectorSphere::new(4, 8, true, false).unwrap();
        assert_eq!(cs.sensor_id(&ray(0.2, 0.1, -0.7)), None);
        cs.record(&ray(0.2, 0.1, -0.7));
        let total: u64 = (0..cs.num_sensors()).map(|id| cs.hits(id).unwrap()).sum();
        assert_eq!(total, 0);
    }

    #[test]
    fn n_records_on_one_direction_hit_one_sensor() {
        let mut cs = EqualSolidAnglesCollectorSphere::new(6, 6, true, true).unwrap();
        let photon = ray(0.3, -0.4, 0.6);
        let k = cs.sensor_id(&photon).unwrap();
        for _ in 0..250 {
            cs.record(&photon);
        }
        for id in 0..cs.num_sensors() {
            let expected = if id == k { 250 } else { 0 };
            assert_eq!(cs.hits(id).unwrap(), expected);
        }
    }

    #[test]
    fn sensor_center_maps_back_to_its_sensor() {
        let cs = EqualSolidAnglesCollectorSphere::new(5, 9, true, true).unwrap();
        for id in 0..cs.num_sensors() {
            let c = cs.center(id).unwrap();
            let photon = Ray::new(Point3f::origin(), c.to_vector());
            assert_eq!(cs.sensor_id(&photon), Some(id));
        }
    }

    #[test]
    fn invalid_sensor_queries_fail() {
        let cs = EqualSolidAnglesCollectorSphere::new(3, 3, true, false).unwrap();
        assert!(cs.hits(9).is_err());
        assert!(cs.center(9).is_err());
        assert!(cs.solid_angle(9).is_err());
        assert!(cs.projected_solid_angle(9).is_err());
    }

    #[test]
    fn degenerate_configurations_are_rejected() {
        assert!(EqualSolidAnglesCollectorSphere::new(0, 8, true, true).is_err());
        assert!(EqualSolidAnglesCollectorSphere::new(8, 0, true, true).is_err());
        assert!(EqualSolidAnglesCollectorSphere::new(8, 8, false, false).is_err());
    }

    #[test]
    fn lookup_is_total_on_the_full_sphere() {
        let cs = EqualSolidAnglesCollectorSphere::new(8, 12, true, true).unwrap();
        let mut rng = RNG::new(40);
        for _ in 0..10_000 {
            let x = 2.0 * rng.uniform_float() - 1.0;
            let y = 2.0 * rng.uniform_float() - 1.0;
            let z = 2.0 * rng.uniform_float() - 1.0;
            if x * x + y * y + z * z < 1e-8 {
                continue;
            }
            let id = cs.sensor_id(&ray(x, y, z));
            assert!(matches!(id, Some(i) if i < cs.num_sensors()));
        }
    }
}
