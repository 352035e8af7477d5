//! Per-cycle pipeline signals.
//!
//! Stage handlers never mutate state another handler reads in the same cycle.
//! Instead they record what should happen in a [`CycleEffects`], which the
//! cycle driver applies after the advance pass. It carries:
//! 1. **Register Writes:** Values headed for the architectural register file.
//! 2. **Completions:** Out-of-order results for the ROB and RS wakeup.
//! 3. **Control:** Stall, flush, issue, commit and halt decisions.

use std::fmt;

use crate::common::Tag;

/// Why the front of the pipeline froze this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StallCause {
    /// A source register is busy and nothing forwards its value.
    DataHazard,
    /// No free ROB slot for a destination-writing instruction.
    RobFull,
    /// No free reservation station slot.
    RsFull,
}

impl fmt::Display for StallCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::DataHazard => "data hazard",
            Self::RobFull => "ROB full",
            Self::RsFull => "RS full",
        })
    }
}

/// A pending architectural register write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegWrite {
    /// Destination register.
    pub reg: usize,
    /// Value written.
    pub value: i32,
    /// Producer tag; the busy flag is cleared only if it still names this tag.
    pub tag: Tag,
}

/// Everything the handlers decided during one cycle.
#[derive(Clone, Debug, Default)]
pub struct CycleEffects {
    /// Register file writes, in the order they were produced.
    pub reg_writes: Vec<RegWrite>,
    /// Out-of-order results: mark the ROB entry completed and wake the RS.
    pub completions: Vec<(Tag, i32)>,
    /// The ROB head commits.
    pub commit: bool,
    /// The front of the pipeline (Register-Read and above) is frozen.
    pub stall: Option<StallCause>,
    /// The Register-Read/Issue latch moved into the reservation station.
    pub issued: bool,
    /// A branch redirected Fetch.
    pub flushed: bool,
    /// The instruction in Retire must stay there this cycle.
    pub retire_blocked: bool,
    /// `ret` retired.
    pub halt: bool,
}

impl CycleEffects {
    /// Records a stall; the first cause reported in a cycle wins.
    pub fn stall(&mut self, cause: StallCause) {
        if self.stall.is_none() {
            self.stall = Some(cause);
        }
    }
}
