//! Pipeline tests.
//!
//! Every test here runs real programs through `Simulator` and checks the
//! architectural result together with the counters that expose timing.


/// Stalls and forwarding in the in-order backend.
pub mod hazards;

/// Loads, stores and address faults.
pub mod memory;


/// Randomized invariants over generated programs and buffers.
pub mod properties;

/// Small end-to-end programs run on both backends.
pub mod scenarios;
