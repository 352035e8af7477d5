//! Branch prediction unit (BRU) implementations.
//!
//! This module contains the branch target buffer, the pattern table of
//! saturating counters, and the two prediction schemes built on them.

pub use self::branch_predictor::BranchPredictor;

/// Branch predictor trait.
pub mod branch_predictor;

/// BTB + pattern table predictor.
pub mod bimodal;

/// Branch Target Buffer.
pub mod btb;

/// Pattern table of saturating counters.
pub mod pattern_table;

/// Static branch predictor (always not-taken).
pub mod static_bp;

use self::{bimodal::BimodalPredictor, btb::Btb, static_bp::StaticPredictor};
use crate::config::{PipelineConfig, PredictorKind};

/// Enum wrapper for static dispatch of branch predictors.
#[derive(Clone, Debug)]
pub enum BranchPredictorWrapper {
    /// BTB + pattern table.
    Bimodal(BimodalPredictor),
    /// Always not taken.
    Static(StaticPredictor),
}

impl BranchPredictorWrapper {
    /// Creates the predictor selected by the pipeline configuration.
    pub fn new(config: &PipelineConfig) -> Self {
        match config.branch_predictor {
            PredictorKind::Bimodal => Self::Bimodal(BimodalPredictor::new(
                config.btb_size,
                config.pt_size,
                config.counter_init,
            )),
            PredictorKind::Static => Self::Static(StaticPredictor::new(config.btb_size)),
        }
    }

    /// The branch target buffer.
    pub const fn btb(&self) -> &Btb {
        match self {
            Self::Bimodal(bp) => bp.btb(),
            Self::Static(bp) => bp.btb(),
        }
    }

    /// The pattern-table counter for `pc`, if this predictor keeps one.
    pub fn counter(&self, pc: u32) -> Option<u8> {
        match self {
            Self::Bimodal(bp) => Some(bp.counter(pc)),
            Self::Static(_) => None,
        }
    }
}

impl BranchPredictor for BranchPredictorWrapper {
    #[inline]
    fn predict_taken(&self, pc: u32) -> bool {
        match self {
            Self::Bimodal(bp) => bp.predict_taken(pc),
            Self::Static(bp) => bp.predict_taken(pc),
        }
    }

    #[inline]
    fn resolve(&mut self, pc: u32, taken: bool, target: i32) -> bool {
        match self {
            Self::Bimodal(bp) => bp.resolve(pc, taken, target),
            Self::Static(bp) => bp.resolve(pc, taken, target),
        }
    }
}
