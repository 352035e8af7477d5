//! Instruction Decode (ID) and Analyze (IA) Stages.
//!
//! Decode maps the raw instruction fields onto the uniform operand slots.
//! Analyze places the immediate into the second operand when the instruction
//! has no second source register, so every downstream unit reads its "B"
//! operand from the same place.

use tracing::trace;

use crate::core::Cpu;
use crate::core::pipeline::latches::Stage;

/// Executes the decode stage.
pub fn decode_stage(cpu: &mut Cpu) {
    if let Some(inst) = cpu.latches.get_mut(Stage::Decode) {
        inst.operands = cpu.program[inst.index].operands();
        trace!(stage = "ID", seq = inst.seq, operands = ?inst.operands, "decoded");
    }
}

/// Executes the analyze stage.
pub fn analyze_stage(cpu: &mut Cpu) {
    if let Some(inst) = cpu.latches.get_mut(Stage::Analyze) {
        if inst.operands.src2.is_none() {
            if let Some(imm) = inst.operands.imm {
                inst.src2_value = imm;
            }
        }
    }
}
