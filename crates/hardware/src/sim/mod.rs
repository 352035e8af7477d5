//! Simulation utilities and program loading.
//!
//! Provides the file loaders for programs and memory images, and the
//! [`Simulator`] run loop.

pub mod loader;

/// Run loop and report.
pub mod simulator;

pub use simulator::{RunReport, Simulator, Termination};
