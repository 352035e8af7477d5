//! Memory Stages (MEM1, MEM2).
//!
//! MEM1 forms the effective byte address: the immediate for `ld`/`st`, the
//! address register for `ldl`/`stl`. MEM2 performs the word access, so a
//! load's value becomes available one stage later than arithmetic results.

use tracing::trace;

use crate::common::SimError;
use crate::core::Cpu;
use crate::core::pipeline::hazards::Channel;
use crate::core::pipeline::latches::Stage;
use crate::core::pipeline::signals::CycleEffects;
use crate::core::pipeline::stages::execute::produce;
use crate::isa::Opcode;

/// Executes the address-calculation stage.
pub fn mem1_stage(cpu: &mut Cpu) {
    let Some(inst) = cpu.latches.get_mut(Stage::Mem1) else {
        return;
    };
    inst.addr = match inst.opcode {
        Opcode::Ld | Opcode::St | Opcode::StL => inst.src2_value,
        Opcode::LdL => inst.src1_value,
        _ => return,
    };
    trace!(stage = "MEM1", seq = inst.seq, addr = inst.addr, "address");
}

/// Executes the memory-access stage.
///
/// # Errors
///
/// Returns [`SimError::AddressOutOfRange`] when the address is negative or
/// past the end of data memory.
pub fn mem2_stage(cpu: &mut Cpu, fx: &mut CycleEffects) -> Result<(), SimError> {
    let Some(mut inst) = cpu.latches.get(Stage::Mem2).copied() else {
        return Ok(());
    };
    let (index, addr) = (inst.index, inst.addr);
    let fault = move |_| SimError::AddressOutOfRange { index, addr };

    if inst.opcode.is_load() {
        inst.result = cpu.memory.read(addr).map_err(fault)?;
        cpu.latches.put(Stage::Mem2, inst);
        trace!(stage = "MEM2", seq = inst.seq, addr = inst.addr, value = inst.result, "load");
        produce(cpu, fx, Channel::Memory, &inst);
    } else if inst.opcode.is_store() {
        cpu.memory.write(addr, inst.src1_value).map_err(fault)?;
        trace!(stage = "MEM2", seq = inst.seq, addr = inst.addr, value = inst.src1_value, "store");
    }
    Ok(())
}
