/// BTB and pattern-table predictor behaviour.
pub mod bru;
