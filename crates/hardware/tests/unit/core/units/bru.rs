//! Branch Predictor Tests.
//!
//! Exercises the resolution protocol through the same wrapper the CPU uses:
//! flush decisions read the state from before the update, the BTB entry is
//! always overwritten, and aliasing branches share a counter.

use rstest::rstest;

use pipesim_core::config::{PipelineConfig, PredictorKind};
use pipesim_core::core::units::bru::btb::Btb;
use pipesim_core::core::units::bru::{BranchPredictor, BranchPredictorWrapper};

fn bimodal() -> BranchPredictorWrapper {
    BranchPredictorWrapper::new(&PipelineConfig::default())
}

#[test]
fn cold_counter_predicts_not_taken() {
    let bp = bimodal();
    for pc in (0..64).step_by(4) {
        assert!(!bp.predict_taken(pc));
        assert_eq!(bp.counter(pc), Some(3));
    }
}

#[rstest]
#[case::taken_cold(&[], true, true)]
#[case::not_taken_cold(&[], false, false)]
#[case::taken_after_training(&[true], true, false)]
#[case::not_taken_after_training(&[true], false, true)]
#[case::taken_after_decay(&[true, false], true, true)]
fn flush_decision(#[case] history: &[bool], #[case] taken: bool, #[case] flush: bool) {
    let mut bp = bimodal();
    for &h in history {
        let _ = bp.resolve(8, h, 40);
    }
    assert_eq!(bp.resolve(8, taken, 40), flush);
}

#[test]
fn resolution_overwrites_the_btb_entry() {
    let mut bp = bimodal();
    let _ = bp.resolve(8, false, 40);
    assert_eq!(bp.btb().lookup(8), Some(40));
    let _ = bp.resolve(8, true, 44);
    assert_eq!(bp.btb().lookup(8), Some(44));
}

#[test]
fn aliasing_branches_share_an_entry() {
    let mut bp = bimodal();
    // 0x00 and 0x40 map to index 0 but carry different tags.
    assert_eq!(Btb::tag_of(0x00), 0);
    assert_eq!(Btb::tag_of(0x40), 1);

    let _ = bp.resolve(0x00, true, 12);
    assert_eq!(bp.counter(0x40), Some(4));
    assert!(bp.predict_taken(0x40));
    assert_eq!(bp.btb().lookup(0x40), None, "tag mismatch");

    let _ = bp.resolve(0x40, true, 80);
    assert_eq!(bp.btb().lookup(0x00), None, "evicted by the alias");
    assert_eq!(bp.counter(0x00), Some(5));
}

#[test]
fn static_predictor_never_predicts_taken() {
    let config = PipelineConfig {
        branch_predictor: PredictorKind::Static,
        ..PipelineConfig::default()
    };
    let mut bp = BranchPredictorWrapper::new(&config);
    for _ in 0..4 {
        assert!(bp.resolve(4, true, 0));
        assert!(!bp.predict_taken(4));
    }
    assert!(!bp.resolve(4, false, 0));
    assert_eq!(bp.counter(4), None);
}
