//! Static Branch Predictor.
//!
//! Implements an "Always Not Taken" policy. Every taken branch is therefore a
//! misprediction. The BTB is still maintained so its contents can be
//! inspected after a run.

use super::{BranchPredictor, btb::Btb};

/// Static Branch Predictor structure.
#[derive(Clone, Debug)]
pub struct StaticPredictor {
    /// Branch Target Buffer, updated on every resolution.
    btb: Btb,
}

impl StaticPredictor {
    /// Creates a new Static Predictor.
    ///
    /// # Arguments
    ///
    /// * `btb_size` - Number of entries in the BTB.
    pub fn new(btb_size: usize) -> Self {
        Self {
            btb: Btb::new(btb_size),
        }
    }

    /// The branch target buffer.
    pub const fn btb(&self) -> &Btb {
        &self.btb
    }
}

impl BranchPredictor for StaticPredictor {
    /// Always predicts not taken.
    fn predict_taken(&self, _pc: u32) -> bool {
        false
    }

    /// Flushes exactly when the branch was taken.
    fn resolve(&mut self, pc: u32, taken: bool, target: i32) -> bool {
        self.btb.update(pc, target);
        taken
    }
}
