//! Operand decode table.
//!
//! Each opcode gives its raw `rd` / `rs1` / `rs2` / `imm` fields a different
//! meaning. This module collapses those meanings into one table mapping every
//! opcode onto four uniform slots:
//!
//! | form             | dest | src1 | src2 | imm    |
//! |------------------|------|------|------|--------|
//! | `op Rd Rs #i`    | Rd   | Rs   | -    | i      |
//! | `opl Rd Rs Rt`   | Rd   | Rs   | Rt   | -      |
//! | `ld Rd #a`       | Rd   | -    | -    | a      |
//! | `ldl Rd Ra`      | Rd   | Ra   | -    | -      |
//! | `st Rs #a`       | -    | Rs   | -    | a      |
//! | `stl Rs Ra`      | -    | Rs   | Ra   | -      |
//! | `set Rd #i`      | Rd   | -    | -    | i      |
//! | `bxx Rc #t`      | -    | Rc   | -    | t      |
//! | `ret`            | -    | -    | -    | -      |
//!
//! Decode fills a latch from this table and Register-Read reads sources from
//! it, so both stages agree on which registers an instruction touches.

use super::instruction::Instruction;
use super::opcode::Opcode;

/// Uniform view of an instruction's register and immediate operands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Operands {
    /// Register written by the instruction.
    pub dest: Option<usize>,
    /// First source register.
    pub src1: Option<usize>,
    /// Second source register.
    pub src2: Option<usize>,
    /// Immediate operand.
    pub imm: Option<i32>,
}

impl Operands {
    /// Applies the decode table to one instruction.
    pub const fn decode(inst: &Instruction) -> Self {
        let (dest, src1, src2, imm) = match inst.opcode {
            Opcode::Mul | Opcode::Add | Opcode::Sub | Opcode::Div => {
                (Some(inst.rd), Some(inst.rs1), None, Some(inst.imm))
            }
            Opcode::MulL | Opcode::AddL | Opcode::SubL | Opcode::DivL => {
                (Some(inst.rd), Some(inst.rs1), Some(inst.rs2), None)
            }
            Opcode::Ld | Opcode::Set => (Some(inst.rd), None, None, Some(inst.imm)),
            Opcode::LdL => (Some(inst.rd), Some(inst.rs1), None, None),
            Opcode::St
            | Opcode::Bez
            | Opcode::Bgez
            | Opcode::Blez
            | Opcode::Bgtz
            | Opcode::Bltz => (None, Some(inst.rd), None, Some(inst.imm)),
            Opcode::StL => (None, Some(inst.rd), Some(inst.rs1), None),
            Opcode::Ret => (None, None, None, None),
        };
        Self {
            dest,
            src1,
            src2,
            imm,
        }
    }
}
