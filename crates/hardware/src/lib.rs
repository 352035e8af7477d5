//! Cycle-accurate pipelined processor simulator library.
//!
//! This crate simulates a twelve-stage pipeline running a small fixed
//! instruction set, with the following:
//! 1. **Core:** Stage latches, hazard detection with forwarding, and a flush
//!    protocol driven by branch resolution.
//! 2. **Out-of-order completion:** Register renaming onto a reorder buffer and
//!    a reservation station, with in-order commit.
//! 3. **Prediction:** A branch target buffer and a pattern table of 3-bit
//!    saturating counters.
//! 4. **ISA:** The instruction forms, their operand decode table and the
//!    assembly parser.
//! 5. **Simulation:** Loaders, configuration, the run loop and statistics.

/// Common types and constants (registers, tags, errors).
pub mod common;
/// Simulator configuration (defaults, enums, hierarchical config structures).
pub mod config;
/// CPU core (pipeline, units, memory, execution).
pub mod core;
/// Instruction set (opcodes, instructions, decode table, parser).
pub mod isa;
/// Loaders and the run loop.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main CPU type; holds registers, memory, pipeline and stats.
pub use crate::core::Cpu;
/// Run loop around a [`Cpu`].
pub use crate::sim::Simulator;
