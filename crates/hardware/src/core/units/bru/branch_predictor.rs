//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait that every prediction
//! scheme implements. Fetch asks for a direction; Branch-Resolve reports the
//! actual outcome and learns whether the pipeline must be flushed.

/// Trait for branch prediction algorithms.
///
/// Program counters are byte addresses (instruction index times four).
pub trait BranchPredictor {
    /// Predicts whether the conditional branch at `pc` will be taken.
    fn predict_taken(&self, pc: u32) -> bool;

    /// Resolves a branch against the predictor state and trains it.
    ///
    /// The flush decision is made on the state as it was before this call;
    /// the tables are updated afterwards.
    ///
    /// # Arguments
    ///
    /// * `pc` - Byte address of the branch.
    /// * `taken` - Actual outcome.
    /// * `target` - Branch target (byte address).
    ///
    /// # Returns
    ///
    /// `true` if the instructions fetched after the branch are on the wrong
    /// path and must be squashed.
    fn resolve(&mut self, pc: u32, taken: bool, target: i32) -> bool;
}
