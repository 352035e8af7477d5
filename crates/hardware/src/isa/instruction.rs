//! Parsed instructions and the instruction table.
//!
//! An [`Instruction`] is created once at load time and never mutated. Pipeline
//! latches refer to it by its index in the [`InstructionTable`].

use std::fmt;
use std::ops::Index;

use super::decode::Operands;
use super::opcode::Opcode;
use crate::common::{REG_COUNT, WORD_SIZE};

/// One parsed instruction.
///
/// The meaning of `rd`, `rs1`, `rs2` and `imm` depends on the opcode; use
/// [`Instruction::operands`] rather than reading the raw fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// Position in the program (instruction index, not byte address).
    pub index: usize,
    /// Instruction form.
    pub opcode: Opcode,
    /// First register field.
    pub rd: usize,
    /// Second register field.
    pub rs1: usize,
    /// Third register field.
    pub rs2: usize,
    /// Immediate field (byte address for memory and branch forms).
    pub imm: i32,
}

impl Instruction {
    /// Builds an instruction with every field explicit.
    ///
    /// Returns `None` if a register field names a register outside the
    /// register file.
    pub const fn new(
        index: usize,
        opcode: Opcode,
        rd: usize,
        rs1: usize,
        rs2: usize,
        imm: i32,
    ) -> Option<Self> {
        if rd >= REG_COUNT || rs1 >= REG_COUNT || rs2 >= REG_COUNT {
            return None;
        }
        Some(Self {
            index,
            opcode,
            rd,
            rs1,
            rs2,
            imm,
        })
    }

    /// Decodes the raw fields into destination / source / immediate slots.
    #[inline]
    pub const fn operands(&self) -> Operands {
        Operands::decode(self)
    }

    /// Byte address of this instruction, as seen by the branch predictor.
    #[inline]
    pub const fn byte_pc(&self) -> u32 {
        Self::byte_pc_of(self.index)
    }

    /// Byte address of the instruction at table index `index`.
    #[inline]
    pub const fn byte_pc_of(index: usize) -> u32 {
        (index as u32).wrapping_mul(WORD_SIZE as u32)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.index, self.opcode)?;
        match self.opcode {
            Opcode::Mul | Opcode::Add | Opcode::Sub | Opcode::Div => {
                write!(f, " R{} R{} #{}", self.rd, self.rs1, self.imm)
            }
            Opcode::MulL | Opcode::AddL | Opcode::SubL | Opcode::DivL => {
                write!(f, " R{} R{} R{}", self.rd, self.rs1, self.rs2)
            }
            Opcode::Ld
            | Opcode::St
            | Opcode::Set
            | Opcode::Bez
            | Opcode::Bgez
            | Opcode::Blez
            | Opcode::Bgtz
            | Opcode::Bltz => write!(f, " R{} #{}", self.rd, self.imm),
            Opcode::LdL | Opcode::StL => write!(f, " R{} R{}", self.rd, self.rs1),
            Opcode::Ret => Ok(()),
        }
    }
}

/// Immutable, ordered table of the program's instructions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstructionTable {
    instructions: Vec<Instruction>,
}

impl InstructionTable {
    /// Wraps a list of instructions. Indices are renumbered to their position.
    pub fn new(instructions: Vec<Instruction>) -> Self {
        let instructions = instructions
            .into_iter()
            .enumerate()
            .map(|(index, inst)| Instruction { index, ..inst })
            .collect();
        Self { instructions }
    }

    /// Returns the instruction at `index`, if it exists.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    /// Number of instructions.
    #[inline]
    pub const fn len(&self) -> usize {
        self.instructions.len()
    }

    /// True if the table has no instructions.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Iterates the instructions in program order.
    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }
}

impl Index<usize> for InstructionTable {
    type Output = Instruction;

    fn index(&self, index: usize) -> &Instruction {
        &self.instructions[index]
    }
}

impl<'a> IntoIterator for &'a InstructionTable {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

impl fmt::Display for InstructionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for inst in &self.instructions {
            writeln!(f, "{inst}")?;
        }
        Ok(())
    }
}
