//! Execute Stages (ADD, MUL, DIV).
//!
//! The three arithmetic units sit one after another in the chain. Each acts
//! only on its own class of opcode and lets everything else pass through
//! untouched. A finished result is published on the unit's forwarding channel
//! (in-order) or reported as a ROB completion (out-of-order). A zero divisor
//! aborts the run on the spot in both backends.

use tracing::{debug, trace};

use crate::common::SimError;
use crate::config::BackendType;
use crate::core::Cpu;
use crate::core::pipeline::hazards::{Channel, Forward};
use crate::core::pipeline::latches::{InFlight, Stage};
use crate::core::pipeline::signals::CycleEffects;
use crate::core::units::alu::{Alu, AluOp};
use crate::isa::UnitClass;

/// Makes a finished result visible to consumers.
pub(crate) fn produce(cpu: &mut Cpu, fx: &mut CycleEffects, channel: Channel, inst: &InFlight) {
    let Some(tag) = inst.tag else { return };
    match cpu.backend {
        BackendType::InOrder => {
            if let Some(reg) = inst.operands.dest {
                cpu.forwarding.publish(
                    channel,
                    Forward {
                        reg,
                        value: inst.result,
                    },
                );
            }
        }
        BackendType::OutOfOrder => fx.completions.push((tag, inst.result)),
    }
}

fn execute_unit(
    cpu: &mut Cpu,
    fx: &mut CycleEffects,
    stage: Stage,
    unit: UnitClass,
    channel: Channel,
) -> Result<(), SimError> {
    let Some(mut inst) = cpu.latches.get(stage).copied() else {
        return Ok(());
    };
    if inst.opcode.unit() != unit {
        return Ok(());
    }
    let Some(op) = AluOp::from_opcode(inst.opcode) else {
        return Ok(());
    };

    match Alu::execute(op, inst.src1_value, inst.src2_value) {
        Some(result) => {
            inst.result = result;
            cpu.latches.put(stage, inst);
            trace!(stage = stage.label(), seq = inst.seq, result, "executed");
            produce(cpu, fx, channel, &inst);
        }
        None => {
            let err = SimError::DivideByZero { index: inst.index };
            debug!(stage = stage.label(), seq = inst.seq, "fault: {err}");
            if let (BackendType::OutOfOrder, Some(tag)) = (cpu.backend, inst.tag) {
                cpu.rob.fault(tag, err.clone());
            }
            return Err(err);
        }
    }
    Ok(())
}

/// Executes the add stage (`add`, `sub`, `set` and their register forms).
pub fn add_stage(cpu: &mut Cpu, fx: &mut CycleEffects) -> Result<(), SimError> {
    execute_unit(cpu, fx, Stage::Add, UnitClass::Add, Channel::Add)
}

/// Executes the multiply stage.
pub fn mul_stage(cpu: &mut Cpu, fx: &mut CycleEffects) -> Result<(), SimError> {
    execute_unit(cpu, fx, Stage::Mul, UnitClass::Mul, Channel::Mul)
}

/// Executes the divide stage.
///
/// # Errors
///
/// Returns [`SimError::DivideByZero`] on a zero divisor. The out-of-order
/// backend also marks the instruction's ROB entry with the fault.
pub fn div_stage(cpu: &mut Cpu, fx: &mut CycleEffects) -> Result<(), SimError> {
    execute_unit(cpu, fx, Stage::Div, UnitClass::Div, Channel::Div)
}
