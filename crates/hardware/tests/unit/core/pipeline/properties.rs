//! Randomized Invariant Tests.
//!
//! Properties that must hold for any input, checked with generated buffer
//! sizes, counter histories and straight-line programs.

use proptest::prelude::*;

use crate::common::harness::{BACKENDS, TestContext};
use pipesim_core::core::pipeline::InFlight;
use pipesim_core::core::pipeline::reservation::{Operand, ReservationStation, RsEntry};
use pipesim_core::core::pipeline::rob::Rob;
use pipesim_core::core::units::bru::pattern_table::PatternTable;
use pipesim_core::isa::{Instruction, Opcode};

fn ready_entry(seq: u64) -> RsEntry {
    let inst = Instruction::new(0, Opcode::Set, 1, 0, 0, 0).expect("R1 exists");
    RsEntry::new(
        InFlight::fetched(&inst, seq, false),
        Operand::ready(0),
        Operand::ready(0),
    )
}

/// One independent instruction: reads nothing but R0, which is never written.
#[derive(Clone, Debug)]
enum Independent {
    Set(usize, i32),
    Add(usize, i32),
    Sub(usize, i32),
    Mul(usize, i32),
}

impl Independent {
    fn source(&self) -> String {
        match self {
            Self::Set(d, v) => format!("set R{d} #{v}"),
            Self::Add(d, v) => format!("add R{d} R0 #{v}"),
            Self::Sub(d, v) => format!("sub R{d} R0 #{v}"),
            Self::Mul(d, v) => format!("mul R{d} R0 #{v}"),
        }
    }

    fn effect(&self) -> (usize, i32) {
        match *self {
            Self::Set(d, v) | Self::Add(d, v) => (d, v),
            Self::Sub(d, v) => (d, v.wrapping_neg()),
            Self::Mul(d, _) => (d, 0),
        }
    }
}

fn independent() -> impl Strategy<Value = Independent> {
    (0..4u8, 1..16usize, -1000..1000i32).prop_map(|(kind, d, v)| match kind {
        0 => Independent::Set(d, v),
        1 => Independent::Add(d, v),
        2 => Independent::Sub(d, v),
        _ => Independent::Mul(d, v),
    })
}

proptest! {
    #[test]
    fn rob_holds_one_less_than_capacity(capacity in 2..32usize) {
        let mut rob = Rob::new(capacity);
        let mut seq = 0;
        while rob.allocate(seq, 0, 1).is_some() {
            seq += 1;
        }
        prop_assert_eq!(rob.len(), capacity - 1);
        prop_assert!(rob.is_full());

        let head = rob.peek_head().map(|e| e.tag);
        prop_assert!(head.is_some());
        rob.complete(head.unwrap_or_default(), 5);
        prop_assert!(rob.commit_head().is_some());
        prop_assert!(rob.allocate(seq, 0, 1).is_some());
        prop_assert!(rob.allocate(seq + 1, 0, 1).is_none());
    }

    #[test]
    fn rs_holds_one_less_than_capacity(capacity in 2..32usize) {
        let mut rs = ReservationStation::new(capacity);
        let mut seq = 0;
        while rs.enqueue(ready_entry(seq)).is_some() {
            seq += 1;
        }
        prop_assert_eq!(rs.iter().count(), capacity - 1);
        prop_assert!(rs.is_full());

        // Oldest-first dispatch.
        prop_assert_eq!(rs.dispatch().map(|e| e.inst.seq), Some(0));
        prop_assert!(rs.enqueue(ready_entry(seq)).is_some());
        prop_assert!(rs.is_full());
    }

    #[test]
    fn counters_saturate(init in 0..=7u8, history in prop::collection::vec(any::<bool>(), 0..64)) {
        let mut pt = PatternTable::new(16, init);
        let mut model = i32::from(init);
        for taken in history {
            pt.train(0, taken);
            model = if taken { (model + 1).min(7) } else { (model - 1).max(0) };
            prop_assert_eq!(i32::from(pt.counter(0)), model);
            prop_assert_eq!(pt.predicts_taken(0), model >= 4);
        }
    }

    #[test]
    fn independent_code_never_stalls(body in prop::collection::vec(independent(), 1..16)) {
        let mut source: String = body.iter().map(|i| i.source() + "\n").collect();
        source.push_str("ret\n");

        let mut expected = [0i32; 16];
        for inst in &body {
            let (reg, value) = inst.effect();
            expected[reg] = value;
        }

        for backend in BACKENDS {
            let mut tc = TestContext::new(&source, backend);
            let report = tc.run();
            prop_assert!(report.halted());
            prop_assert_eq!(report.stats.stalled_cycles(), 0);
            prop_assert_eq!(report.stats.instructions_retired, body.len() as u64 + 1);
            prop_assert_eq!(report.stats.cycles, body.len() as u64 + 12);
            prop_assert_eq!(report.registers, expected);
        }
    }
}
