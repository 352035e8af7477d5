//! Branch-Resolve (BR) Stage.
//!
//! Evaluates the branch condition against the captured register value,
//! trains the predictor, and on a misprediction squashes every younger
//! instruction and redirects Fetch.

use tracing::{debug, trace};

use crate::core::Cpu;
use crate::core::pipeline::latches::Stage;
use crate::core::pipeline::signals::CycleEffects;
use crate::core::pipeline::stages::fetch::target_index;
use crate::core::units::bru::BranchPredictor;
use crate::isa::Instruction;

/// Executes the branch-resolve stage.
pub fn branch_stage(cpu: &mut Cpu, fx: &mut CycleEffects) {
    let Some(inst) = cpu.latches.get(Stage::Branch).copied() else {
        return;
    };
    if !inst.opcode.is_branch() {
        return;
    }

    let taken = inst.opcode.branch_taken(inst.src1_value);
    let target = inst.src2_value;
    let pc = Instruction::byte_pc_of(inst.index);
    trace!(
        stage = "BR",
        seq = inst.seq,
        taken,
        btb_target = ?cpu.branch_predictor.btb().lookup(pc),
        "resolve"
    );
    let flush = cpu.branch_predictor.resolve(pc, taken, target);

    if !flush {
        cpu.stats.branch_predictions += 1;
        return;
    }

    cpu.stats.branch_mispredictions += 1;
    let redirect = if taken {
        target_index(target)
    } else {
        inst.index + 1
    };
    debug!(
        stage = "BR",
        seq = inst.seq,
        index = inst.index,
        taken,
        predicted = inst.pred_taken,
        redirect,
        "mispredict, flushing"
    );
    cpu.flush_younger(inst.seq, redirect);
    fx.flushed = true;
}
