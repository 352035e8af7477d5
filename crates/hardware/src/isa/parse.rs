//! Assembly text parser.
//!
//! One instruction per line: `<index> <mnemonic> <operands...>`, where register
//! operands are written `R<n>` and immediates `#<signed n>`. Arithmetic, load
//! and store mnemonics select their register-register form either explicitly
//! (`addl`, `ldl`, ...) or implicitly when a register appears where the
//! immediate would be. Blank lines and `;` comments are ignored.
//!
//! Parsing is all-or-nothing: the first malformed line aborts with a
//! diagnostic naming the line, and no partial table is produced.

use tracing::warn;

use super::instruction::{Instruction, InstructionTable};
use super::opcode::Opcode;
use crate::common::constants::REG_COUNT;
use crate::common::error::LoadError;

/// A single operand token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Operand {
    Reg(usize),
    Imm(i32),
}

/// Parses a whole program.
///
/// # Arguments
///
/// * `text` - Program source, one instruction per line.
///
/// # Returns
///
/// The instruction table, or the first error found.
pub fn parse_program(text: &str) -> Result<InstructionTable, LoadError> {
    let mut instructions = Vec::new();
    for (lineno, raw) in text.lines().enumerate() {
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }
        let position = instructions.len();
        instructions.push(parse_line(line, lineno + 1, position)?);
    }
    if instructions.is_empty() {
        return Err(LoadError::EmptyProgram);
    }
    Ok(InstructionTable::new(instructions))
}

/// Parses one non-empty source line into the instruction at `position`.
///
/// `line` is the 1-based source line used in diagnostics. A leading index
/// token is optional; when present and different from `position` it is
/// reported and the position wins.
pub fn parse_line(text: &str, line: usize, position: usize) -> Result<Instruction, LoadError> {
    let mut tokens = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .peekable();

    if let Some(declared) = tokens.peek().and_then(|t| t.parse::<i64>().ok()) {
        let _ = tokens.next();
        if usize::try_from(declared).ok() != Some(position) {
            warn!(line, declared, position, "instruction index does not match its position");
        }
    }

    let malformed = |reason: &str| LoadError::Malformed {
        line,
        text: text.to_string(),
        reason: reason.to_string(),
    };

    let mnemonic = tokens
        .next()
        .ok_or_else(|| malformed("missing mnemonic"))?
        .to_ascii_lowercase();
    let opcode = Opcode::from_mnemonic(&mnemonic).ok_or_else(|| LoadError::UnknownMnemonic {
        line,
        mnemonic: mnemonic.clone(),
    })?;

    let operands = tokens
        .map(|tok| parse_operand(tok, line, text))
        .collect::<Result<Vec<_>, _>>()?;

    let inst = |opcode, rd, rs1, rs2, imm| {
        Instruction::new(position, opcode, rd, rs1, rs2, imm)
            .ok_or_else(|| malformed("register out of range"))
    };

    match opcode {
        Opcode::Mul | Opcode::Add | Opcode::Sub | Opcode::Div => match operands.as_slice() {
            [Operand::Reg(d), Operand::Reg(s), Operand::Imm(i)] => inst(opcode, *d, *s, 0, *i),
            [Operand::Reg(d), Operand::Reg(s), Operand::Reg(t)] => {
                let reg_form = opcode.register_form().unwrap_or(opcode);
                inst(reg_form, *d, *s, *t, 0)
            }
            _ => Err(malformed("expected `Rd Rs #imm` or `Rd Rs Rt`")),
        },
        Opcode::MulL | Opcode::AddL | Opcode::SubL | Opcode::DivL => match operands.as_slice() {
            [Operand::Reg(d), Operand::Reg(s), Operand::Reg(t)] => inst(opcode, *d, *s, *t, 0),
            _ => Err(malformed("expected `Rd Rs Rt`")),
        },
        Opcode::Ld | Opcode::St => match operands.as_slice() {
            [Operand::Reg(r), Operand::Imm(a)] => inst(opcode, *r, 0, 0, *a),
            [Operand::Reg(r), Operand::Reg(a)] => {
                let reg_form = opcode.register_form().unwrap_or(opcode);
                inst(reg_form, *r, *a, 0, 0)
            }
            _ => Err(malformed("expected `R #addr` or `R Ra`")),
        },
        Opcode::LdL | Opcode::StL => match operands.as_slice() {
            [Operand::Reg(r), Operand::Reg(a)] => inst(opcode, *r, *a, 0, 0),
            _ => Err(malformed("expected `R Ra`")),
        },
        Opcode::Set
        | Opcode::Bez
        | Opcode::Bgez
        | Opcode::Blez
        | Opcode::Bgtz
        | Opcode::Bltz => match operands.as_slice() {
            [Operand::Reg(r), Operand::Imm(i)] => inst(opcode, *r, 0, 0, *i),
            _ => Err(malformed("expected `R #imm`")),
        },
        Opcode::Ret => {
            if operands.is_empty() {
                inst(opcode, 0, 0, 0, 0)
            } else {
                Err(malformed("`ret` takes no operands"))
            }
        }
    }
}

fn strip_comment(line: &str) -> &str {
    line.split_once(';').map_or(line, |(code, _)| code)
}

fn parse_operand(tok: &str, line: usize, text: &str) -> Result<Operand, LoadError> {
    let malformed = |reason: String| LoadError::Malformed {
        line,
        text: text.to_string(),
        reason,
    };

    if let Some(num) = tok.strip_prefix(['R', 'r']) {
        let register: i64 = num
            .parse()
            .map_err(|_| malformed(format!("bad register `{tok}`")))?;
        return usize::try_from(register)
            .ok()
            .filter(|&r| r < REG_COUNT)
            .map(Operand::Reg)
            .ok_or(LoadError::RegisterOutOfRange {
                line,
                register,
                max: REG_COUNT - 1,
            });
    }
    if let Some(num) = tok.strip_prefix('#') {
        return num
            .parse()
            .map(Operand::Imm)
            .map_err(|_| malformed(format!("bad immediate `{tok}`")));
    }
    Err(malformed(format!("unexpected operand `{tok}`")))
}
