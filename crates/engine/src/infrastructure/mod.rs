//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod clock;
pub mod generator;
pub mod nominatim;
pub mod ollama;
pub mod persistence;
pub mod ports;
