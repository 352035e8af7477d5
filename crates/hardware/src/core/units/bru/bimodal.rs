//! BTB + pattern table predictor.
//!
//! Predicts with a per-index saturating counter and keeps a BTB alongside it.
//! Resolution follows a fixed protocol:
//! 1. **Flush test** on the pre-update state: taken but (BTB untagged or
//!    counter below 4), or not taken but (BTB tagged and counter at least 4).
//! 2. **BTB update:** the entry is overwritten with this branch's tag and target.
//! 3. **Counter update:** increment on taken (ceiling 7), decrement otherwise
//!    (floor 0).

use super::{BranchPredictor, btb::Btb, pattern_table::PatternTable};
use crate::common::constants::COUNTER_TAKEN_THRESHOLD;

/// Bimodal predictor built from a BTB and a pattern table.
#[derive(Clone, Debug)]
pub struct BimodalPredictor {
    btb: Btb,
    pt: PatternTable,
}

impl BimodalPredictor {
    /// Creates a predictor.
    ///
    /// # Arguments
    ///
    /// * `btb_size` - Number of BTB entries (power of two).
    /// * `pt_size` - Number of pattern-table counters (power of two).
    /// * `counter_init` - Initial value of every counter.
    pub fn new(btb_size: usize, pt_size: usize, counter_init: u8) -> Self {
        Self {
            btb: Btb::new(btb_size),
            pt: PatternTable::new(pt_size, counter_init),
        }
    }

    /// The branch target buffer.
    pub const fn btb(&self) -> &Btb {
        &self.btb
    }

    /// Current counter for `pc`.
    pub fn counter(&self, pc: u32) -> u8 {
        self.pt.counter(pc)
    }
}

impl BranchPredictor for BimodalPredictor {
    fn predict_taken(&self, pc: u32) -> bool {
        self.pt.predicts_taken(pc)
    }

    fn resolve(&mut self, pc: u32, taken: bool, target: i32) -> bool {
        let tagged = self.btb.is_tagged(pc);
        let strong = self.pt.counter(pc) >= COUNTER_TAKEN_THRESHOLD;
        let flush = if taken {
            !tagged || !strong
        } else {
            tagged && strong
        };

        self.btb.update(pc, target);
        self.pt.train(pc, taken);
        flush
    }
}
