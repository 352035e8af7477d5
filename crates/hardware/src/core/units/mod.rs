//! Execution units.
//!
//! The arithmetic shared by the add, multiply and divide stages, and the
//! branch prediction unit consulted by Fetch and Branch-Resolve.

/// Integer arithmetic.
pub mod alu;

/// Branch prediction unit (BTB, pattern table, predictors).
pub mod bru;
