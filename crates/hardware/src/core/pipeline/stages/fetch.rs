//! Instruction Fetch (IF) Stage.
//!
//! Reads the instruction at the PC into the Fetch latch and chooses the next
//! PC. Conditional branches consult the branch predictor: a predicted-taken
//! branch redirects to its immediate target, everything else falls through.
//! Fetch stops after `ret` until a redirect restarts it.

use tracing::trace;

use crate::common::WORD_SIZE;
use crate::core::Cpu;
use crate::core::pipeline::latches::{InFlight, Stage};
use crate::core::pipeline::signals::CycleEffects;
use crate::core::units::bru::BranchPredictor;
use crate::isa::Opcode;

/// Converts a branch immediate (a byte address) into an instruction index.
///
/// Negative targets map to an index no program can reach, so fetching there
/// ends the run as an overrun rather than wrapping.
pub fn target_index(imm: i32) -> usize {
    usize::try_from(imm / WORD_SIZE).unwrap_or(usize::MAX)
}

/// Executes the instruction fetch stage.
///
/// Does nothing when a flush redirected the PC this cycle, when fetch has
/// stopped at `ret`, when the Fetch latch is still occupied, or when the PC
/// lies past the end of the program.
pub fn fetch_stage(cpu: &mut Cpu, fx: &CycleEffects) {
    if fx.flushed || cpu.fetch_stopped || !cpu.latches.is_free(Stage::Fetch) {
        return;
    }
    let Some(inst) = cpu.program.get(cpu.pc).copied() else {
        return;
    };

    let pred_taken = inst.opcode.is_branch() && cpu.branch_predictor.predict_taken(inst.byte_pc());
    let seq = cpu.next_seq();
    cpu.latches
        .put(Stage::Fetch, InFlight::fetched(&inst, seq, pred_taken));

    cpu.pc = if pred_taken {
        target_index(inst.imm)
    } else {
        cpu.pc + 1
    };
    if inst.opcode == Opcode::Ret {
        cpu.fetch_stopped = true;
    }

    trace!(
        stage = "IF",
        seq,
        index = inst.index,
        pred_taken,
        next_pc = cpu.pc,
        "fetched {}",
        inst
    );
}
