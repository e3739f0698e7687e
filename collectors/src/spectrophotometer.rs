//! Spectrophotometer Collector Sphere

use core::collector::{CollectorSphere, SensorArray};
use core::error::{Error, Result};
use core::geometry::{Ray, SphericalCoordinates, Vector3f};
use core::mist::*;

/// A perfect spherical or hemispherical collector with at most two sensors,
/// one per enabled hemisphere. Suitable for simple reflectance and
/// transmittance measurements.
///
/// When both hemispheres are enabled the upper sensor is sensor 0 and the
/// lower sensor is sensor 1. When only one hemisphere is enabled its sensor
/// is sensor 0.
pub struct SpectrophotometerCollectorSphere {
    /// Up direction of the sphere. Unit length.
    up: Vector3f,

    /// Is the upper hemisphere enabled?
    upper: bool,

    /// Is the lower hemisphere enabled?
    lower: bool,

    /// Per-sensor hit counters.
    sensors: SensorArray,
}

impl SpectrophotometerCollectorSphere {
    /// Construct a complete collector sphere. Both hemispheres are enabled
    /// and the z-axis is up.
    pub fn new() -> Self {
        Self {
            up: Vector3f::z_axis(),
            upper: true,
            lower: true,
            sensors: SensorArray::new(2),
        }
    }

    /// Construct a collector sphere specifying which hemispheres are enabled.
    /// The z-axis is up.
    ///
    /// * `upper` - Set to true to enable the upper hemisphere.
    /// * `lower` - Set to true to enable the lower hemisphere.
    pub fn new_with_hemispheres(upper: bool, lower: bool) -> Result<Self> {
        Self::new_with_up(upper, lower, Vector3f::z_axis())
    }

    /// Construct a collector sphere specifying which hemispheres are enabled
    /// and which direction is up.
    ///
    /// * `upper` - Set to true to enable the upper hemisphere.
    /// * `lower` - Set to true to enable the lower hemisphere.
    /// * `up`    - The up direction. An arbitrary vector is normalized.
    pub fn new_with_up(upper: bool, lower: bool, up: Vector3f) -> Result<Self> {
        if !upper && !lower {
            return Err(Error::config(
                "spectrophotometer sphere needs at least one enabled hemisphere",
            ));
        }
        if up.length_squared() == 0.0 || up.has_nans() {
            return Err(Error::config(
                "spectrophotometer up direction must be a non-zero vector",
            ));
        }
        let num_sensors = upper as usize + lower as usize;
        Ok(Self {
            up: up.normalize(),
            upper,
            lower,
            sensors: SensorArray::new(num_sensors),
        })
    }

    /// Test if the upper hemisphere is enabled.
    pub fn upper_enabled(&self) -> bool {
        self.upper
    }

    /// Test if the lower hemisphere is enabled.
    pub fn lower_enabled(&self) -> bool {
        self.lower
    }

    /// Provide read-only access to the up vector.
    pub fn up(&self) -> &Vector3f {
        &self.up
    }
}

impl Default for SpectrophotometerCollectorSphere {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectorSphere for SpectrophotometerCollectorSphere {
    fn clear(&mut self) {
        self.sensors.clear();
    }

    fn num_sensors(&self) -> usize {
        self.sensors.num_sensors()
    }

    /// Determine which hemisphere a ray strikes. Directions on the equator
    /// count as the upper hemisphere. Directions into a disabled hemisphere
    /// return `None`.
    fn sensor_id(&self, photon: &Ray) -> Option<usize> {
        let cos_theta = photon.d.dot(&self.up);
        if cos_theta.is_nan() {
            None
        } else if cos_theta >= 0.0 {
            if self.upper {
                Some(0)
            } else {
                None
            }
        } else if self.lower {
            Some(if self.upper { 1 } else { 0 })
        } else {
            None
        }
    }

    fn hits(&self, sensor_id: usize) -> Result<u64> {
        self.sensors.hits(sensor_id)
    }

    fn add_hits(&mut self, sensor_id: usize, count: u64) {
        self.sensors.add(sensor_id, count);
    }

    /// The sensor center is the zenith for the upper hemisphere and the
    /// nadir for the lower hemisphere.
    fn center(&self, sensor_id: usize) -> Result<SphericalCoordinates> {
        self.sensors.check(sensor_id)?;
        let is_upper = self.upper && sensor_id == 0;
        if is_upper {
            Ok(SphericalCoordinates::new(0.0, 0.0))
        } else {
            Ok(SphericalCoordinates::new(PI, 0.0))
        }
    }

    fn solid_angle(&self, sensor_id: usize) -> Result<Float> {
        self.sensors.check(sensor_id)?;
        Ok(TWO_PI)
    }

    fn projected_solid_angle(&self, sensor_id: usize) -> Result<Float> {
        self.sensors.check(sensor_id)?;
        Ok(PI)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::geometry::Point3f;
    use float_cmp::assert_approx_eq;

    fn ray(x: Float, y: Float, z: Float) -> Ray {
        Ray::new(Point3f::origin(), Vector3f::new(x, y, z))
    }

    #[test]
    fn full_sphere_has_two_sensors() {
        let cs = SpectrophotometerCollectorSphere::new();
        assert_eq!(cs.num_sensors(), 2);
        assert_eq!(cs.sensor_id(&ray(0.1, -0.2, 0.9)), Some(0));
        assert_eq!(cs.sensor_id(&ray(0.1, -0.2, -0.9)), Some(1));
    }

    #[test]
    fn equator_counts_as_upper() {
        let cs = SpectrophotometerCollectorSphere::new();
        assert_eq!(cs.sensor_id(&ray(1.0, 0.0, 0.0)), Some(0));
    }

    #[test]
    fn disabled_hemisphere_drops_directions() {
        let mut cs =
            SpectrophotometerCollectorSphere::new_with_hemispheres(true, false).unwrap();
        assert_eq!(cs.num_sensors(), 1);
        assert_eq!(cs.sensor_id(&ray(0.0, 0.0, -1.0)), None);
        cs.record(&ray(0.0, 0.0, -1.0));
        assert_eq!(cs.hits(0).unwrap(), 0);
        cs.record(&ray(0.0, 0.0, 1.0));
        assert_eq!(cs.hits(0).unwrap(), 1);
    }

    #[test]
    fn lower_only_sphere_uses_sensor_zero() {
        let cs = SpectrophotometerCollectorSphere::new_with_hemispheres(false, true).unwrap();
        assert_eq!(cs.sensor_id(&ray(0.0, 0.0, -1.0)), Some(0));
        assert_eq!(cs.sensor_id(&ray(0.0, 0.0, 1.0)), None);
        assert_approx_eq!(Float, cs.center(0).unwrap().polar, PI);
    }

    #[test]
    fn solid_angles_are_hemispherical() {
        let cs = SpectrophotometerCollectorSphere::new();
        for id in 0..2 {
            assert_approx_eq!(Float, cs.solid_angle(id).unwrap(), TWO_PI);
            assert_approx_eq!(Float, cs.projected_solid_angle(id).unwrap(), PI);
        }
        assert!(cs.solid_angle(2).is_err());
        assert!(cs.center(2).is_err());
    }

    #[test]
    fn repeated_hits_accumulate_on_one_sensor() {
        let mut cs = SpectrophotometerCollectorSphere::new();
        for _ in 0..100 {
            cs.record(&ray(0.3, 0.3, 0.5));
        }
        assert_eq!(cs.hits(0).unwrap(), 100);
        assert_eq!(cs.hits(1).unwrap(), 0);
        cs.clear();
        assert_eq!(cs.hits(0).unwrap(), 0);
    }

    #[test]
    fn both_hemispheres_disabled_is_rejected() {
        assert!(SpectrophotometerCollectorSphere::new_with_hemispheres(false, false).is_err());
    }
}
