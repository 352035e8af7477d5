//! Load/Store Tests.

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::harness::TestContext;
use pipesim_core::common::SimError;
use pipesim_core::config::{BackendType, Config};

#[rstest]
fn loads_sum_and_store(
    #[values(BackendType::InOrder, BackendType::OutOfOrder)] backend: BackendType,
) {
    let source = "0 ld R1 #4\n1 ld R2 #8\n2 add R3 R1 R2\n3 st R3 #12\n4 ret\n";
    let mut tc = TestContext::with_image(source, backend, &[10, 20, 30, 0]);
    let report = tc.run_to_halt();

    assert_eq!(report.registers[1], 20);
    assert_eq!(report.registers[2], 30);
    assert_eq!(report.registers[3], 50);
    assert_eq!(tc.cpu().memory.image(), &[10, 20, 30, 50]);
    assert_eq!(report.stats.inst_load, 2);
    assert_eq!(report.stats.inst_store, 1);
}

#[rstest]
fn register_addressed_forms(
    #[values(BackendType::InOrder, BackendType::OutOfOrder)] backend: BackendType,
) {
    // R1 holds the byte address of word 2.
    let source = "0 set R1 #8\n1 ldl R2 R1\n2 mul R3 R2 #2\n3 stl R3 R1\n4 ret\n";
    let mut tc = TestContext::with_image(source, backend, &[1, 2, 3]);
    let report = tc.run_to_halt();

    assert_eq!(report.registers[2], 3);
    assert_eq!(tc.cpu().memory.image(), &[1, 2, 6]);
}

#[rstest]
fn store_then_load_same_word(
    #[values(BackendType::InOrder, BackendType::OutOfOrder)] backend: BackendType,
) {
    let source = "0 set R1 #-9\n1 st R1 #0\n2 ld R2 #0\n3 ret\n";
    let mut tc = TestContext::with_image(source, backend, &[5]);
    let report = tc.run_to_halt();

    assert_eq!(report.registers[2], -9);
}

#[rstest]
fn negative_address_faults(
    #[values(BackendType::InOrder, BackendType::OutOfOrder)] backend: BackendType,
) {
    let mut tc = TestContext::new("0 ld R1 #-4\n1 ret\n", backend);
    assert_eq!(
        tc.run_to_fault(),
        SimError::AddressOutOfRange { index: 0, addr: -4 }
    );
}

#[test]
fn store_past_capacity_faults() {
    let mut config = Config::default();
    config.memory.size = 4;
    let mut tc = TestContext::with_config("0 set R1 #1\n1 st R1 #16\n2 ret\n", &[], &config);

    assert_eq!(
        tc.run_to_fault(),
        SimError::AddressOutOfRange { index: 1, addr: 16 }
    );
    assert_eq!(tc.cpu().memory.words(4), &[0, 0, 0, 0]);
}
