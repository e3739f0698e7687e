//! Specimen Materials

#[macro_use]
extern crate log;

mod diffuse_reflector;
mod granular;

// Re-export
pub use diffuse_reflector::*;
pub use granular::*;
