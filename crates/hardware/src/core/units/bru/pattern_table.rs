//! Pattern Table of 3-bit saturating counters.

use crate::common::constants::{COUNTER_MAX, COUNTER_TAKEN_THRESHOLD};

/// Direct-mapped table of saturating counters in `0..=7`.
///
/// A counter at or above 4 predicts taken. Indexing matches the BTB.
#[derive(Clone, Debug)]
pub struct PatternTable {
    counters: Vec<u8>,
}

impl PatternTable {
    /// Creates a table of `size` counters (power of two), all set to `init`.
    pub fn new(size: usize, init: u8) -> Self {
        Self {
            counters: vec![init.min(COUNTER_MAX); size.max(1)],
        }
    }

    #[inline]
    fn index(&self, pc: u32) -> usize {
        ((pc >> 2) as usize) & (self.counters.len() - 1)
    }

    /// Current counter for a byte program counter.
    pub fn counter(&self, pc: u32) -> u8 {
        self.counters[self.index(pc)]
    }

    /// True if the counter for `pc` predicts taken.
    pub fn predicts_taken(&self, pc: u32) -> bool {
        self.counter(pc) >= COUNTER_TAKEN_THRESHOLD
    }

    /// Moves the counter toward the observed outcome, saturating at 0 and 7.
    pub fn train(&mut self, pc: u32, taken: bool) {
        let idx = self.index(pc);
        let c = &mut self.counters[idx];
        *c = if taken {
            (*c + 1).min(COUNTER_MAX)
        } else {
            c.saturating_sub(1)
        };
    }
}
