//! Thermal envelope compliance engine.
//!
//! Resolves the climate zone of a site, computes U-values of layered
//! assemblies, checks them and the façade glazing against the zone limits,
//! and flags surface condensation risk.

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod materials;
pub mod project;
pub mod reference;
pub mod report;
pub mod telemetry;

pub use error::EnvelopeError;
