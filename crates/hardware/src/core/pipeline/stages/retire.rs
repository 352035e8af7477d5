//! Retire (RET) Stage.
//!
//! Counts retired instructions and halts the run when `ret` retires. In the
//! out-of-order backend it also commits the ROB head: only a completed entry
//! older than every unresolved branch may update the register file, and
//! `ret` waits until the ROB has drained.

use tracing::{debug, trace};

use crate::config::BackendType;
use crate::core::Cpu;
use crate::core::pipeline::latches::Stage;
use crate::core::pipeline::signals::{CycleEffects, RegWrite};
use crate::isa::{Opcode, UnitClass};

fn commit_rob_head(cpu: &Cpu, fx: &mut CycleEffects) {
    let Some(head) = cpu.rob.peek_head() else {
        return;
    };
    if cpu
        .oldest_unresolved_branch()
        .is_some_and(|branch| head.seq > branch)
    {
        return;
    }
    if head.completed && head.exception.is_none() {
        trace!(stage = "RET", tag = %head.tag, reg = head.dest, value = head.result, "commit");
        fx.reg_writes.push(RegWrite {
            reg: head.dest,
            value: head.result,
            tag: head.tag,
        });
        fx.commit = true;
    }
}

/// Executes the retire stage.
pub fn retire_stage(cpu: &mut Cpu, fx: &mut CycleEffects) {
    if cpu.backend == BackendType::OutOfOrder {
        commit_rob_head(cpu, fx);
    }

    let Some(inst) = cpu.latches.get(Stage::Retire).copied() else {
        return;
    };

    if inst.opcode == Opcode::Ret && cpu.backend == BackendType::OutOfOrder {
        let pending = cpu.rob.len() - usize::from(fx.commit);
        if pending > 0 {
            trace!(stage = "RET", pending, "ret waiting for ROB to drain");
            fx.retire_blocked = true;
            return;
        }
    }

    let stats = &mut cpu.stats;
    stats.instructions_retired += 1;
    match inst.opcode.unit() {
        UnitClass::Add | UnitClass::Mul | UnitClass::Div => stats.inst_alu += 1,
        UnitClass::Memory if inst.opcode.is_load() => stats.inst_load += 1,
        UnitClass::Memory => stats.inst_store += 1,
        UnitClass::Branch => stats.inst_branch += 1,
        UnitClass::Control => stats.inst_control += 1,
    }
    trace!(stage = "RET", seq = inst.seq, index = inst.index, "retired");

    if inst.opcode == Opcode::Ret {
        debug!(cycle = stats.cycles, "ret retired, halting");
        fx.halt = true;
    }
}
