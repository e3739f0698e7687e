//! Error types shared across the workspace.

use thiserror::Error;

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring or running a measurement.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid configuration. Raised at setup, never mid-run.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A sensor query with an id outside [0, num_sensors).
    #[error("sensor id {sensor_id} out of range [0, {num_sensors})")]
    SensorOutOfRange {
        /// The offending sensor id.
        sensor_id: usize,

        /// Number of sensors in the collector sphere.
        num_sensors: usize,
    },

    /// A photon casting worker failed. Fatal to its measurement cell.
    #[error("worker failed: {0}")]
    Worker(String),

    /// Failure writing to the output sink.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a `Configuration` error from anything printable.
    ///
    /// * `msg` - The error message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}
