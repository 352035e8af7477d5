//! Global Machine Constants.
//!
//! This module defines the fixed parameters of the simulated machine. It includes:
//! 1. **Architectural Constants:** Register count and word size.
//! 2. **Memory Constants:** Default data-memory capacity in words.
//! 3. **Predictor Constants:** Table sizes, tag extraction and counter thresholds.
//! 4. **Out-of-order Constants:** Default ROB and RS capacities.

/// Number of architectural registers (`R0`..`R15`).
pub const REG_COUNT: usize = 16;

/// Size of a data word and of an instruction slot, in bytes.
///
/// Memory and branch-target immediates are byte addresses; they are divided by
/// this value to obtain a word index or an instruction index.
pub const WORD_SIZE: i32 = 4;

/// Default capacity of data memory, in words.
pub const MEMORY_SIZE: usize = 64_000;

/// Default number of entries in the Branch Target Buffer.
pub const BTB_SIZE: usize = 16;

/// Default number of entries in the Pattern Table.
pub const PT_SIZE: usize = 16;

/// Mask applied to a byte PC before extracting the BTB tag.
pub const PC_TAG_MASK: u32 = 0xFFFF_FFC0;

/// Shift applied after [`PC_TAG_MASK`] to form the BTB tag.
pub const PC_TAG_SHIFT: u32 = 6;

/// Largest value of a pattern-table saturating counter.
pub const COUNTER_MAX: u8 = 7;

/// A counter at or above this value predicts taken.
pub const COUNTER_TAKEN_THRESHOLD: u8 = 4;

/// Initial value of every pattern-table counter (weakly not-taken).
pub const COUNTER_INIT: u8 = 3;

/// Default Reorder Buffer capacity (one slot is always kept free).
pub const ROB_SIZE: usize = 8;

/// Default Reservation Station capacity (one slot is always kept free).
pub const RS_SIZE: usize = 4;

/// Default upper bound on simulated cycles before the run is aborted.
pub const MAX_CYCLES: u64 = 1_000_000;
