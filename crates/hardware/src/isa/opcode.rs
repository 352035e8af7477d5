//! Opcode definitions.
//!
//! The machine has nineteen instruction forms. Every stage matches over
//! [`Opcode`] exhaustively, so adding a form forces each stage to decide what
//! to do with it.

use std::fmt;

/// Functional unit class an opcode is executed by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnitClass {
    /// Add / subtract / set unit.
    Add,
    /// Multiplier.
    Mul,
    /// Divider.
    Div,
    /// Branch-resolve unit.
    Branch,
    /// Two-stage memory unit (address, access).
    Memory,
    /// No functional unit (`ret`).
    Control,
}

/// The nineteen instruction forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `mul Rd Rs #imm`
    Mul,
    /// `add Rd Rs #imm`
    Add,
    /// `sub Rd Rs #imm`
    Sub,
    /// `div Rd Rs #imm`
    Div,
    /// `ld Rd #addr`
    Ld,
    /// `st Rs #addr`
    St,
    /// `mul Rd Rs Rt`
    MulL,
    /// `add Rd Rs Rt`
    AddL,
    /// `sub Rd Rs Rt`
    SubL,
    /// `div Rd Rs Rt`
    DivL,
    /// `ld Rd Ra` (address in register)
    LdL,
    /// `st Rs Ra` (address in register)
    StL,
    /// `set Rd #imm`
    Set,
    /// Branch if equal to zero.
    Bez,
    /// Branch if greater than or equal to zero.
    Bgez,
    /// Branch if less than or equal to zero.
    Blez,
    /// Branch if greater than zero.
    Bgtz,
    /// Branch if less than zero.
    Bltz,
    /// Halt the program.
    Ret,
}

impl Opcode {
    /// Every opcode, in declaration order.
    pub const ALL: [Self; 19] = [
        Self::Mul,
        Self::Add,
        Self::Sub,
        Self::Div,
        Self::Ld,
        Self::St,
        Self::MulL,
        Self::AddL,
        Self::SubL,
        Self::DivL,
        Self::LdL,
        Self::StL,
        Self::Set,
        Self::Bez,
        Self::Bgez,
        Self::Blez,
        Self::Bgtz,
        Self::Bltz,
        Self::Ret,
    ];

    /// Assembly mnemonic. Register-register forms carry the `l` suffix.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Mul => "mul",
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Div => "div",
            Self::Ld => "ld",
            Self::St => "st",
            Self::MulL => "mull",
            Self::AddL => "addl",
            Self::SubL => "subl",
            Self::DivL => "divl",
            Self::LdL => "ldl",
            Self::StL => "stl",
            Self::Set => "set",
            Self::Bez => "bez",
            Self::Bgez => "bgez",
            Self::Blez => "blez",
            Self::Bgtz => "bgtz",
            Self::Bltz => "bltz",
            Self::Ret => "ret",
        }
    }

    /// Looks an opcode up by its mnemonic.
    pub fn from_mnemonic(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.mnemonic() == text)
    }

    /// Register-register counterpart of an immediate form, if one exists.
    pub const fn register_form(self) -> Option<Self> {
        match self {
            Self::Mul => Some(Self::MulL),
            Self::Add => Some(Self::AddL),
            Self::Sub => Some(Self::SubL),
            Self::Div => Some(Self::DivL),
            Self::Ld => Some(Self::LdL),
            Self::St => Some(Self::StL),
            Self::MulL
            | Self::AddL
            | Self::SubL
            | Self::DivL
            | Self::LdL
            | Self::StL
            | Self::Set
            | Self::Bez
            | Self::Bgez
            | Self::Blez
            | Self::Bgtz
            | Self::Bltz
            | Self::Ret => None,
        }
    }

    /// The functional unit that executes this opcode.
    pub const fn unit(self) -> UnitClass {
        match self {
            Self::Add | Self::AddL | Self::Sub | Self::SubL | Self::Set => UnitClass::Add,
            Self::Mul | Self::MulL => UnitClass::Mul,
            Self::Div | Self::DivL => UnitClass::Div,
            Self::Ld | Self::LdL | Self::St | Self::StL => UnitClass::Memory,
            Self::Bez | Self::Bgez | Self::Blez | Self::Bgtz | Self::Bltz => UnitClass::Branch,
            Self::Ret => UnitClass::Control,
        }
    }

    /// True for the five conditional branches.
    #[inline]
    pub const fn is_branch(self) -> bool {
        matches!(self.unit(), UnitClass::Branch)
    }

    /// True for loads and stores.
    #[inline]
    pub const fn is_memory(self) -> bool {
        matches!(self.unit(), UnitClass::Memory)
    }

    /// True for the two load forms.
    #[inline]
    pub const fn is_load(self) -> bool {
        matches!(self, Self::Ld | Self::LdL)
    }

    /// True for the two store forms.
    #[inline]
    pub const fn is_store(self) -> bool {
        matches!(self, Self::St | Self::StL)
    }

    /// Evaluates a branch condition against the captured register value.
    ///
    /// Returns false for every non-branch opcode.
    pub const fn branch_taken(self, value: i32) -> bool {
        match self {
            Self::Bez => value == 0,
            Self::Bgez => value >= 0,
            Self::Blez => value <= 0,
            Self::Bgtz => value > 0,
            Self::Bltz => value < 0,
            Self::Mul
            | Self::Add
            | Self::Sub
            | Self::Div
            | Self::Ld
            | Self::St
            | Self::MulL
            | Self::AddL
            | Self::SubL
            | Self::DivL
            | Self::LdL
            | Self::StL
            | Self::Set
            | Self::Ret => false,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
