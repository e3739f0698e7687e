//! Sensor hit bookkeeping shared by collector sphere implementations.

use crate::error::{Error, Result};

/// Hit counters for an indexed set of sensors. Concrete collector spheres
/// embed one of these and delegate the counting part of the interface to it,
/// keeping the geometric partition logic separate from the bookkeeping.
#[derive(Clone, Debug, Default)]
pub struct SensorArray {
    counts: Vec<u64>,
}

impl SensorArray {
    /// Create a sensor array with all counters at zero.
    ///
    /// * `num_sensors` - The number of sensors.
    pub fn new(num_sensors: usize) -> Self {
        Self {
            counts: vec![0; num_sensors],
        }
    }

    /// Zero all counters.
    pub fn clear(&mut self) {
        self.counts.iter_mut().for_each(|c| *c = 0);
    }

    /// Get the number of sensors.
    pub fn num_sensors(&self) -> usize {
        self.counts.len()
    }

    /// Validate a sensor id against the array bounds.
    ///
    /// * `sensor_id` - The sensor index to validate.
    pub fn check(&self, sensor_id: usize) -> Result<()> {
        if sensor_id < self.counts.len() {
            Ok(())
        } else {
            Err(Error::SensorOutOfRange {
                sensor_id,
                num_sensors: self.counts.len(),
            })
        }
    }

    /// Return the hit count of a sensor.
    ///
    /// * `sensor_id` - Valid values are 0 ≤ sensor_id < num_sensors().
    pub fn hits(&self, sensor_id: usize) -> Result<u64> {
        self.check(sensor_id)?;
        Ok(self.counts[sensor_id])
    }

    /// Add hits to a sensor's counter. Out of range indices are dropped.
    ///
    /// * `sensor_id` - The sensor index.
    /// * `count`     - The number of hits to add.
    pub fn add(&mut self, sensor_id: usize, count: u64) {
        if let Some(c) = self.counts.get_mut(sensor_id) {
            *c += count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_accumulate_and_clear() {
        let mut sensors = SensorArray::new(3);
        sensors.add(1, 2);
        sensors.add(1, 3);
        assert_eq!(sensors.hits(1).unwrap(), 5);
        assert_eq!(sensors.hits(0).unwrap(), 0);
        sensors.clear();
        assert_eq!(sensors.hits(1).unwrap(), 0);
    }

    #[test]
    fn out_of_range_query_fails_without_corruption() {
        let mut sensors = SensorArray::new(2);
        sensors.add(0, 1);
        assert!(matches!(
            sensors.hits(2),
            Err(crate::error::Error::SensorOutOfRange {
                sensor_id: 2,
                num_sensors: 2
            })
        ));
        // State survives the failed query.
        assert_eq!(sensors.hits(0).unwrap(), 1);
    }

    #[test]
    fn out_of_range_add_is_dropped() {
        let mut sensors = SensorArray::new(1);
        sensors.add(5, 1);
        assert_eq!(sensors.hits(0).unwrap(), 0);
    }
}
