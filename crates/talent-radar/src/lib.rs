//! Graduated criterion scoring and qualification for candidate screening.
//!
//! The engine lives under [`workflows::screening`]; the remaining modules carry the
//! configuration, error and tracing plumbing shared with the command line adapter.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
