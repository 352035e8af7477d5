//! Writeback (WB) Stage.
//!
//! In the in-order backend this is where a result reaches the register file:
//! the write (and the clearing of the busy flag, if the register still names
//! this producer) is applied at the end of the cycle. The out-of-order
//! backend writes registers at commit instead, so here it only passes
//! instructions through.

use tracing::trace;

use crate::config::BackendType;
use crate::core::Cpu;
use crate::core::pipeline::latches::Stage;
use crate::core::pipeline::signals::{CycleEffects, RegWrite};

/// Executes the writeback stage.
pub fn wb_stage(cpu: &Cpu, fx: &mut CycleEffects) {
    if cpu.backend != BackendType::InOrder {
        return;
    }
    let Some(inst) = cpu.latches.get(Stage::Writeback) else {
        return;
    };
    if let (Some(reg), Some(tag)) = (inst.operands.dest, inst.tag) {
        trace!(stage = "WB", seq = inst.seq, reg, value = inst.result, %tag, "write");
        fx.reg_writes.push(RegWrite {
            reg,
            value: inst.result,
            tag,
        });
    }
}
