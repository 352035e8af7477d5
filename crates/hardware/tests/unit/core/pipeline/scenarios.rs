//! End-to-end Program Tests.
//!
//! Short programs whose timing can be traced by hand. A straight-line program
//! of `n` instructions with no stalls retires `ret` in cycle `n + 11`: the
//! last fetch happens in cycle `n` and Retire is eleven latches downstream.

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::harness::TestContext;
use pipesim_core::common::SimError;
use pipesim_core::config::BackendType;

#[rstest]
fn set_then_ret(#[values(BackendType::InOrder, BackendType::OutOfOrder)] backend: BackendType) {
    let mut tc = TestContext::new("0 set R1 #5\n1 ret\n", backend);
    let report = tc.run_to_halt();

    assert_eq!(report.registers[1], 5);
    assert_eq!(report.stats.instructions_retired, 2);
    assert_eq!(report.stats.cycles, 13);
    assert_eq!(report.stats.stalled_cycles(), 0);
    assert_eq!(report.stats.flushes, 0);
}

#[rstest]
#[case::in_order(BackendType::InOrder, 15, 1)]
#[case::out_of_order(BackendType::OutOfOrder, 9, 0)]
fn divide_by_zero_aborts_in_the_divide_stage(
    #[case] backend: BackendType,
    #[case] cycles: u64,
    #[case] retired: u64,
) {
    let mut tc = TestContext::new("0 set R1 #5\n1 div R2 R1 #0\n2 ret\n", backend);
    let err = tc.run_to_fault();

    assert_eq!(err, SimError::DivideByZero { index: 1 });
    assert_eq!(tc.get_reg(2), 0, "the divide must never write R2");
    assert_eq!(tc.get_reg(1), 5);
    // The run stops in the cycle the divide reaches DIV, not at commit.
    assert_eq!(tc.stats().cycles, cycles);
    assert_eq!(tc.stats().instructions_retired, retired);
}

#[test]
fn divide_by_zero_marks_its_rob_entry() {
    let mut tc = TestContext::new("0 set R1 #5\n1 div R2 R1 #0\n2 ret\n", BackendType::OutOfOrder);
    let _ = tc.run_to_fault();

    let head = tc.cpu().rob.peek_head().cloned();
    assert_eq!(head.as_ref().map(|e| e.index), Some(1));
    assert_eq!(
        head.and_then(|e| e.exception),
        Some(SimError::DivideByZero { index: 1 })
    );
}

#[rstest]
fn taken_branch_skips_the_fall_through(
    #[values(BackendType::InOrder, BackendType::OutOfOrder)] backend: BackendType,
) {
    let source = "0 bez R1 #12\n1 set R2 #1\n2 set R2 #2\n3 ret\n";
    let mut tc = TestContext::new(source, backend);
    let report = tc.run_to_halt();

    assert_eq!(report.registers[2], 0, "squashed sets must not commit");
    assert_eq!(report.stats.instructions_retired, 2);
    assert_eq!(report.stats.flushes, 1);
    assert_eq!(report.stats.branch_mispredictions, 1);
    // Both sets and the first `ret` were on the wrong path.
    assert_eq!(report.stats.squashed, 3);
    assert_eq!(tc.cpu().branch_predictor.counter(0), Some(4));
    assert_eq!(tc.cpu().branch_predictor.btb().lookup(0), Some(12));
}

#[rstest]
#[case::in_order(BackendType::InOrder, 21)]
#[case::out_of_order(BackendType::OutOfOrder, 15)]
fn dependent_add_reads_the_produced_value(#[case] backend: BackendType, #[case] cycles: u64) {
    let mut tc = TestContext::new("0 set R1 #5\n1 add R2 R1 #1\n2 ret\n", backend);
    let report = tc.run_to_halt();

    assert_eq!(report.registers[1], 5);
    assert_eq!(report.registers[2], 6);
    assert_eq!(report.stats.cycles, cycles);
}

#[rstest]
#[case::add("add R3 R1 R2", 10)]
#[case::sub("sub R3 R1 R2", 4)]
#[case::mul("mul R3 R1 R2", 21)]
#[case::div("div R3 R1 R2", 2)]
fn register_forms(
    #[values(BackendType::InOrder, BackendType::OutOfOrder)] backend: BackendType,
    #[case] op: &str,
    #[case] expected: i32,
) {
    let source = format!("set R1 #7\nset R2 #3\n{op}\nret\n");
    let mut tc = TestContext::new(&source, backend);
    let report = tc.run_to_halt();
    assert_eq!(report.registers[3], expected);
}

#[rstest]
fn preset_registers_are_read(
    #[values(BackendType::InOrder, BackendType::OutOfOrder)] backend: BackendType,
) {
    let mut tc = TestContext::new("0 mul R2 R1 #-3\n1 sub R3 R1 #10\n2 ret\n", backend);
    tc.set_reg(1, 4);
    let report = tc.run_to_halt();

    assert_eq!(report.registers[2], -12);
    assert_eq!(report.registers[3], -6);
    assert_eq!(report.stats.inst_alu, 2);
    assert_eq!(report.stats.inst_control, 1);
}

#[rstest]
fn later_writer_wins(#[values(BackendType::InOrder, BackendType::OutOfOrder)] backend: BackendType) {
    let source = "set R1 #1\nset R1 #2\nadd R2 R1 #0\nset R1 #3\nret\n";
    let mut tc = TestContext::new(source, backend);
    let report = tc.run_to_halt();

    assert_eq!(report.registers[1], 3);
    assert_eq!(report.registers[2], 2);
}

#[test]
fn straight_line_program_fills_the_pipe_once() {
    let source = "set R1 #1\nset R2 #2\nset R3 #3\nset R4 #4\nset R5 #5\nret\n";
    let mut tc = TestContext::new(source, BackendType::InOrder);
    let report = tc.run_to_halt();

    assert_eq!(report.stats.cycles, 6 + 11);
    assert_eq!(report.stats.instructions_retired, 6);
    assert_eq!(&report.registers[1..6], &[1, 2, 3, 4, 5]);
}
