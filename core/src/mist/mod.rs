//! Mist common stuff

mod clamp;
mod common;

// Re-export
pub use clamp::*;
pub use common::*;
