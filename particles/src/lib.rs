//! Particle Geometry

mod random_spheroid;
mod spheroid;

// Re-export
pub use random_spheroid::*;
pub use spheroid::*;
