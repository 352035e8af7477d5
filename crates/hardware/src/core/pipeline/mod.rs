//! Instruction pipeline implementation.
//!
//! This module contains the twelve-stage pipeline and the out-of-order
//! machinery behind it. It includes the following components:
//! 1. **Latches:** One single-slot buffer per stage, and the in-flight record.
//! 2. **Hazards:** Forwarding channels for the in-order backend.
//! 3. **ROB / RS:** Reorder buffer and reservation station for the
//!    out-of-order backend.
//! 4. **Signals:** Per-cycle effects deferred until after the advance pass.
//! 5. **Stages:** The stage handlers.
//! 6. **Snapshot:** A printable view of stage occupancy.

/// Forwarding channels and operand read.
pub mod hazards;

/// Stage enum, in-flight record and latch set.
pub mod latches;

/// Reservation station.
pub mod reservation;

/// Reorder buffer.
pub mod rob;

/// Per-cycle deferred effects.
pub mod signals;

/// Stage occupancy snapshot.
pub mod snapshot;

/// Pipeline stage implementations.
pub mod stages;

pub use latches::{InFlight, Latches, Stage};
pub use snapshot::PipelineSnapshot;
