//! Common utilities and types used throughout the simulator.
//!
//! This module provides building blocks shared by every other component. It includes:
//! 1. **Constants:** Machine parameters (register count, word size, table sizes).
//! 2. **Error Handling:** Load-time, run-time and configuration error types.
//! 3. **Register Management:** The architectural register file with rename state.
//! 4. **Tags:** Identifiers for in-flight producers.

/// Machine-wide constants.
pub mod constants;

/// Error types.
pub mod error;

/// Register file and rename state.
pub mod reg;

/// In-flight producer tags.
pub mod tag;

pub use constants::{REG_COUNT, WORD_SIZE};
pub use error::{ConfigError, LoadError, SimError};
pub use reg::{Register, RegisterFile};
pub use tag::{Tag, TagAllocator};
