//! Internal telemetry for the mart builder.
//!
//! A run is short-lived, so metrics live in-process and are logged as a
//! single snapshot when the run finishes.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::*;
pub use tracing_setup::*;
