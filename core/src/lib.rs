//! Core

#[macro_use]
extern crate hexf;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

// Re-export.
pub mod app;
pub mod collector;
pub mod error;
pub mod fresnel;
pub mod geometry;
pub mod job;
pub mod mist;
pub mod particle;
pub mod photometer;
pub mod rng;
pub mod sampling;
pub mod specimen;
pub mod spectrum;
