//! # Unit Components
//!
//! Tests grouped by the component they exercise: the core pipeline and its
//! units, the ISA parser, the loaders and run loop, configuration and
//! statistics.

/// Configuration parsing and validation.
pub mod config;

/// Pipeline behaviour and the execution units.
pub mod core;


/// Loaders and the simulator run loop.
pub mod sim;
