//! HydroStation firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod calibration;
pub mod conditioning;
pub mod config;
pub mod error;
pub mod pins;
pub mod policy;
pub mod safety;
pub mod telemetry;

// Hardware-facing modules; the ESP-IDF implementations are guarded by
// cfg attributes inside, with simulation backends for host targets.
pub mod adapters;
pub mod drivers;
pub mod sensors;
