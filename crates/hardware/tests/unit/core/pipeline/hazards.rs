//! In-order Hazard Tests.
//!
//! Register-Read stalls while a source register is busy, and the busy flag is
//! only cleared by Writeback. A consumer directly behind its producer is
//! therefore held for seven cycles: the producer needs seven more stages to
//! get from ADD to WB, and the value is visible the cycle after.

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::harness::TestContext;
use pipesim_core::config::BackendType;
use pipesim_core::core::pipeline::Stage;

#[test]
fn consumer_waits_for_writeback() {
    let mut tc = TestContext::new("0 set R1 #5\n1 add R2 R1 #1\n2 ret\n", BackendType::InOrder);
    let report = tc.run_to_halt();

    assert_eq!(report.stats.stalls_data, 7);
    assert_eq!(report.stats.cycles, 14 + 7);
    assert_eq!(report.registers[2], 6);
}

#[test]
fn front_stays_frozen_until_the_producer_writes_back() {
    let mut tc = TestContext::new("0 set R1 #5\n1 add R2 R1 #1\n2 ret\n", BackendType::InOrder);
    // After four cycles `set` sits in ADD and `add` waits in RR.
    tc.tick_n(4);
    let before = tc.sim.snapshot();
    assert_eq!(before.get(Stage::Add).map(|i| i.index), Some(0));
    assert_eq!(before.get(Stage::RegisterRead).map(|i| i.index), Some(1));
    assert_eq!(before.get(Stage::Analyze).map(|i| i.index), Some(2));

    // Cycle 5: `set` has a result, but R1 stays busy and the front holds.
    tc.tick_n(1);
    let stalled = tc.sim.snapshot();
    assert_eq!(tc.stats().stalls_data, 1);
    assert_eq!(stalled.get(Stage::Mul).map(|i| i.index), Some(0));
    assert_eq!(stalled.get(Stage::RegisterRead).map(|i| i.index), Some(1));
    assert!(stalled.get(Stage::Add).is_none(), "a bubble follows the producer");

    // Cycles 6..=11: still frozen while `set` walks down to WB.
    for cycle in 6..=11 {
        tc.tick_n(1);
        let snap = tc.sim.snapshot();
        assert_eq!(tc.stats().stalls_data, cycle - 4);
        assert_eq!(snap.get(Stage::RegisterRead).map(|i| i.index), Some(1));
        assert_eq!(snap.get(Stage::Analyze).map(|i| i.index), Some(2));
        assert!(tc.cpu().regs.producer(1).is_some() || cycle == 11);
    }
    assert_eq!(tc.get_reg(1), 5);
    assert!(tc.cpu().regs.is_ready(1), "WB in cycle 11 clears the busy flag");

    // Cycle 12: `add` reads the written-back value and the front moves again.
    tc.tick_n(1);
    let resumed = tc.sim.snapshot();
    assert_eq!(tc.stats().stalls_data, 7);
    assert_eq!(resumed.get(Stage::Add).map(|i| i.index), Some(1));
    assert_eq!(resumed.get(Stage::RegisterRead).map(|i| i.index), Some(2));
}

#[test]
fn independent_instructions_never_stall() {
    let source = "set R1 #1\nset R2 #2\nadd R3 R4 #7\nmul R5 R6 #2\nret\n";
    let mut tc = TestContext::new(source, BackendType::InOrder);
    let report = tc.run_to_halt();

    assert_eq!(report.stats.stalls_data, 0);
    assert_eq!(report.stats.cycles, 5 + 11);
    assert_eq!(report.registers[3], 7);
}

#[rstest]
#[case::arithmetic("0 set R1 #41\n1 add R2 R1 #1\n2 ret\n")]
#[case::load("0 ld R1 #0\n1 add R2 R1 #1\n2 ret\n")]
#[case::multiply("0 mul R1 R0 #0\n1 add R2 R1 #42\n2 ret\n")]
fn every_producer_costs_the_same(#[case] source: &str) {
    let mut tc = TestContext::with_image(source, BackendType::InOrder, &[41]);
    let report = tc.run_to_halt();

    assert_eq!(report.registers[2], 42);
    assert_eq!(report.stats.stalls_data, 7);
}

#[rstest]
#[case(1, 7)]
#[case(2, 6)]
#[case(4, 4)]
#[case(7, 1)]
#[case(8, 0)]
fn stalls_shrink_with_distance(#[case] distance: usize, #[case] stalls: u64) {
    // `distance - 1` independent sets separate the producer from its consumer.
    let mut source = String::from("set R1 #9\n");
    for reg in 0..distance - 1 {
        source.push_str(&format!("set R{} #0\n", reg + 2));
    }
    source.push_str("add R11 R1 #1\nret\n");

    let mut tc = TestContext::new(&source, BackendType::InOrder);
    let report = tc.run_to_halt();

    assert_eq!(report.stats.stalls_data, stalls);
    assert_eq!(report.registers[11], 10);
}

#[test]
fn busy_flag_clears_at_writeback() {
    let mut tc = TestContext::new("0 set R1 #5\n1 ret\n", BackendType::InOrder);
    tc.tick_n(4);
    assert!(!tc.cpu().regs.is_ready(1), "R1 is claimed at register read");

    tc.tick_n(6);
    assert!(!tc.cpu().regs.is_ready(1), "still busy with `set` in WB");

    tc.tick_n(1);
    assert_eq!(tc.get_reg(1), 5);
    assert!(tc.cpu().regs.is_ready(1));
}
