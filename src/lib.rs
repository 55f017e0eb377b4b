//! C ABI test fixtures for validating FFI marshaling.
//!
//! The `ffi` module exports the raw symbols a foreign harness calls. The
//! remaining modules are their safe Rust counterparts plus tooling that
//! describes the exported surface.

pub mod array;
pub mod error;
pub mod ffi;
pub mod outparam;
pub mod point;
pub mod scalar;

pub mod signature;
pub mod manifest;
pub mod header_generation;
pub mod selfcheck;
pub mod cli;

pub use error::{FixtureError, Result};
pub use manifest::FixtureManifest;
pub use point::{OwnedPoint, Point};
