//! Collector Spheres

mod sensor_array;

// Re-export
pub use sensor_array::*;

use crate::error::Result;
use crate::geometry::{Ray, SphericalCoordinates};
use crate::mist::*;

/// Interface of a virtual collector sphere: a partition of the unit sphere
/// (or part of it) into solid-angle sensors, each with its own hit counter.
///
/// Sensor indices are stable for the sphere's lifetime. The direction lookup
/// `sensor_id` is read-only so photon casting workers can bin exit directions
/// without touching the shared counters.
pub trait CollectorSphere: Send + Sync {
    /// Clear all data that has been collected.
    fn clear(&mut self);

    /// Get the number of sensors. Fixed after construction.
    fn num_sensors(&self) -> usize;

    /// Compute which sensor a ray direction strikes, if any. The ray is
    /// assumed to be inside the collector sphere; its origin is ignored.
    ///
    /// * `photon` - The exiting photon ray.
    fn sensor_id(&self, photon: &Ray) -> Option<usize>;

    /// Return the raw number of photons that struck a sensor.
    ///
    /// * `sensor_id` - Valid values are 0 ≤ sensor_id < num_sensors().
    fn hits(&self, sensor_id: usize) -> Result<u64>;

    /// Add hits to a sensor's counter. Used both by `record` and when merging
    /// per-worker tallies after a casting pool joins.
    ///
    /// * `sensor_id` - The sensor index. Out of range counts are dropped.
    /// * `count`     - The number of hits to add.
    fn add_hits(&mut self, sensor_id: usize, count: u64);

    /// Query the location of the center of a sensor in spherical coordinates.
    ///
    /// * `sensor_id` - Valid values are 0 ≤ sensor_id < num_sensors().
    fn center(&self, sensor_id: usize) -> Result<SphericalCoordinates>;

    /// Get the solid angle subtended by a sensor.
    ///
    /// * `sensor_id` - Valid values are 0 ≤ sensor_id < num_sensors().
    fn solid_angle(&self, sensor_id: usize) -> Result<Float>;

    /// Get the area of the sensor's solid angle projected onto the specimen
    /// plane.
    ///
    /// * `sensor_id` - Valid values are 0 ≤ sensor_id < num_sensors().
    fn projected_solid_angle(&self, sensor_id: usize) -> Result<Float>;

    /// Record a datum. Directions matching no enabled sensor are dropped
    /// silently.
    ///
    /// * `photon` - The exiting photon ray.
    fn record(&mut self, photon: &Ray) {
        if let Some(id) = self.sensor_id(photon) {
            self.add_hits(id, 1);
        }
    }
}

/// Owned trait object for a collector sphere.
pub type BoxedCollectorSphere = Box<dyn CollectorSphere>;
