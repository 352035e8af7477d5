//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the opcode set, the parsed instruction representation, the operand
//! decode table and the assembly-text parser.
//!
//! # Instruction forms
//!
//! * Arithmetic: `mul add sub div` with an immediate, and `mull addl subl divl`
//!   with a second source register.
//! * Memory: `ld st` with an immediate byte address, `ldl stl` with the address
//!   in a register.
//! * `set`, the five conditional branches `bez bgez blez bgtz bltz`, and `ret`.

/// Operand decode table shared by Decode and Register-Read.
pub mod decode;

/// Parsed instructions and the instruction table.
pub mod instruction;

/// Opcode enumeration and per-opcode properties.
pub mod opcode;

/// Assembly text parser.
pub mod parse;

pub use decode::Operands;
pub use instruction::{Instruction, InstructionTable};
pub use opcode::{Opcode, UnitClass};
pub use parse::parse_program;
