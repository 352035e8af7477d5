/// Whole-pipeline behaviour for both backends.
pub mod pipeline;

/// Branch predictor components.
pub mod units;
