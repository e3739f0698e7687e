//! Geometry

mod coordinate_system;
mod interval;
mod point3;
mod ray;
mod spherical;
mod vector3;

// Re-export
pub use coordinate_system::*;
pub use interval::*;
pub use point3::*;
pub use ray::*;
pub use spherical::*;
pub use vector3::*;
