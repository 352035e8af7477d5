//! Core processor implementation.
//!
//! This module contains the CPU context, the data memory, the instruction
//! pipeline and the execution units it drives.

/// CPU context and the per-cycle driver.
pub mod cpu;

/// Word-addressed data memory.
pub mod memory;

/// Instruction pipeline implementation (latches, hazards, ROB, RS, stages).
pub mod pipeline;

/// Execution units (ALU, branch predictor).
pub mod units;

pub use self::cpu::Cpu;
