//! Register-Read / Issue (RR) Stage.
//!
//! The in-order backend reads source registers here and freezes the front of
//! the pipeline while any source is still busy, that is until its producer
//! has written back.
//!
//! The out-of-order backend instead renames: it allocates a ROB entry for the
//! destination, captures whichever operands are already known, and queues
//! the instruction in the reservation station to wait for the rest.

use tracing::trace;

use crate::common::RegisterFile;
use crate::core::Cpu;
use crate::core::pipeline::hazards::read_operand;
use crate::core::pipeline::latches::Stage;
use crate::core::pipeline::reservation::{Operand, RsEntry};
use crate::core::pipeline::rob::Rob;
use crate::core::pipeline::signals::{CycleEffects, StallCause};

/// Executes register read for the in-order backend.
///
/// On a stall the latch is left exactly as it was, so the read is retried
/// next cycle.
pub fn register_read_stage(cpu: &mut Cpu, fx: &mut CycleEffects) {
    let Some(mut inst) = cpu.latches.get(Stage::RegisterRead).copied() else {
        return;
    };
    let ops = inst.operands;

    let mut values = [None; 2];
    for (slot, reg) in [ops.src1, ops.src2].into_iter().enumerate() {
        let Some(reg) = reg else { continue };
        match read_operand(&cpu.regs, &cpu.forwarding, reg) {
            Some(value) => values[slot] = Some(value),
            None => {
                trace!(stage = "RR", seq = inst.seq, reg, "stall: R{reg} busy");
                fx.stall(StallCause::DataHazard);
                return;
            }
        }
    }
    if let Some(v) = values[0] {
        inst.src1_value = v;
    }
    if let Some(v) = values[1] {
        inst.src2_value = v;
    }

    if let Some(dest) = ops.dest {
        let tag = cpu.tags.next_tag();
        cpu.regs.set_producer(dest, tag);
        inst.tag = Some(tag);
    }
    cpu.latches.put(Stage::RegisterRead, inst);
}

/// Resolves one source register for the reservation station.
fn resolve_operand(regs: &RegisterFile, rob: &Rob, reg: usize) -> Operand {
    let Some(tag) = regs.producer(reg) else {
        return Operand::ready(regs.read(reg));
    };
    match rob.find(tag) {
        Some(entry) if entry.completed && entry.exception.is_none() => {
            Operand::ready(entry.result)
        }
        Some(_) => Operand::waiting(tag),
        None => Operand::ready(regs.read(reg)),
    }
}

/// Executes rename and issue for the out-of-order backend.
pub fn issue_stage(cpu: &mut Cpu, fx: &mut CycleEffects) {
    let Some(mut inst) = cpu.latches.get(Stage::RegisterRead).copied() else {
        return;
    };
    let ops = inst.operands;

    if ops.dest.is_some() && cpu.rob.is_full() {
        trace!(stage = "RR", seq = inst.seq, "stall: ROB full");
        fx.stall(StallCause::RobFull);
        return;
    }
    if cpu.rs.is_full() {
        trace!(stage = "RR", seq = inst.seq, "stall: RS full");
        fx.stall(StallCause::RsFull);
        return;
    }

    let src1 = ops.src1.map_or(Operand::ready(inst.src1_value), |reg| {
        resolve_operand(&cpu.regs, &cpu.rob, reg)
    });
    let src2 = ops.src2.map_or(Operand::ready(inst.src2_value), |reg| {
        resolve_operand(&cpu.regs, &cpu.rob, reg)
    });

    if let Some(dest) = ops.dest {
        let Some(tag) = cpu.rob.allocate(inst.seq, inst.index, dest) else {
            fx.stall(StallCause::RobFull);
            return;
        };
        cpu.regs.set_producer(dest, tag);
        inst.tag = Some(tag);
    }

    let slot = cpu.rs.enqueue(RsEntry::new(inst, src1, src2));
    debug_assert!(slot.is_some(), "RS fullness checked above");
    trace!(stage = "RR", seq = inst.seq, tag = ?inst.tag, ?src1, ?src2, "issued");
    fx.issued = true;
}
