//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement the core
//! prediction use case.

mod prediction;

pub use prediction::PredictionService;
