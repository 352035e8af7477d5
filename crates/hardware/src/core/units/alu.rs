//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer arithmetic shared by the add, multiply
//! and divide units. Values are 32-bit signed words; overflow wraps, and
//! division truncates toward zero.

use crate::isa::Opcode;

/// Arithmetic operation performed by one of the execute units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `b` (the immediate of `set`)
    Set,
    /// `a * b`
    Mul,
    /// `a / b`
    Div,
}

impl AluOp {
    /// Maps an opcode onto its arithmetic operation, if it has one.
    pub const fn from_opcode(op: Opcode) -> Option<Self> {
        match op {
            Opcode::Add | Opcode::AddL => Some(Self::Add),
            Opcode::Sub | Opcode::SubL => Some(Self::Sub),
            Opcode::Set => Some(Self::Set),
            Opcode::Mul | Opcode::MulL => Some(Self::Mul),
            Opcode::Div | Opcode::DivL => Some(Self::Div),
            Opcode::Ld
            | Opcode::St
            | Opcode::LdL
            | Opcode::StL
            | Opcode::Bez
            | Opcode::Bgez
            | Opcode::Blez
            | Opcode::Bgtz
            | Opcode::Bltz
            | Opcode::Ret => None,
        }
    }
}

/// Integer ALU.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an arithmetic operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The operation to perform.
    /// * `a`  - First operand (value of the first source register).
    /// * `b`  - Second operand (second source register or immediate).
    ///
    /// # Returns
    ///
    /// The result, or `None` for a division by zero.
    pub const fn execute(op: AluOp, a: i32, b: i32) -> Option<i32> {
        match op {
            AluOp::Add => Some(a.wrapping_add(b)),
            AluOp::Sub => Some(a.wrapping_sub(b)),
            AluOp::Set => Some(b),
            AluOp::Mul => Some(a.wrapping_mul(b)),
            AluOp::Div => {
                if b == 0 {
                    None
                } else {
                    Some(a.wrapping_div(b))
                }
            }
        }
    }
}
