//! Collector Spheres

mod equal_solid_angles;
mod spectrophotometer;

// Re-export
pub use equal_solid_angles::*;
pub use spectrophotometer::*;
