//! Heuristic pump-potential scoring for token listings.
//!
//! The [`scoring`] module holds the pure feature-extraction and rule pipeline. The remaining
//! modules carry the configuration, telemetry, and error plumbing shared with the HTTP host.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
