//! Pipeline stage implementations.
//!
//! One handler per stage of the chain. Each handler reads its own latch and
//! the state left by the previous cycle, and records anything other stages
//! must not see yet in the cycle's [`CycleEffects`](super::signals::CycleEffects).
//! 1. **Fetch:** Reads the instruction at the PC and predicts the next PC.
//! 2. **Decode / Analyze:** Fills operand slots and places immediates.
//! 3. **Issue:** Reads registers (in-order) or renames into the RS (out-of-order).
//! 4. **Execute:** Add, multiply and divide units.
//! 5. **Branch:** Resolves conditions and triggers flushes.
//! 6. **Memory:** Address calculation and data access.
//! 7. **Writeback / Retire:** Register update, ROB commit and halt.

/// Branch-resolve stage implementation.
pub mod branch;

/// Decode and analyze stage implementations.
pub mod decode;

/// Add, multiply and divide stage implementations.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Register-read and issue stage implementations.
pub mod issue;

/// Memory stage implementations.
pub mod memory;

/// Retire stage implementation.
pub mod retire;

/// Writeback stage implementation.
pub mod writeback;

pub use branch::branch_stage;
pub use decode::{analyze_stage, decode_stage};
pub use execute::{add_stage, div_stage, mul_stage};
pub use fetch::fetch_stage;
pub use issue::{issue_stage, register_read_stage};
pub use memory::{mem1_stage, mem2_stage};
pub use retire::retire_stage;
pub use writeback::wb_stage;
