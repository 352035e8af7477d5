//! Architectural Register File and Rename State.
//!
//! This module provides the `RegisterFile` struct, which holds both the
//! architectural value of every register and the tag of its latest in-flight
//! producer. It provides:
//! 1. **Storage:** Value access for the sixteen architectural registers.
//! 2. **Rename State:** A producer tag per register; a register is ready
//!    exactly when it has no live producer.
//! 3. **Recovery:** Clearing and rebuilding the producer map after a flush.
//! 4. **Observability:** A formatted dump of the register state.

use std::fmt;

use super::constants::REG_COUNT;
use super::tag::Tag;

/// One architectural register together with its rename state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Register {
    /// Last committed value.
    pub value: i32,
    /// Tag of the youngest in-flight instruction that will write this register.
    pub producer: Option<Tag>,
}

impl Register {
    /// Returns true if no in-flight instruction targets this register.
    #[inline]
    pub const fn is_ready(&self) -> bool {
        self.producer.is_none()
    }
}

/// Architectural register file with per-register producer tags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [Register; REG_COUNT],
}

impl RegisterFile {
    /// Creates a register file with every register zero and ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the committed value of register `idx`.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-15).
    #[inline]
    pub const fn read(&self, idx: usize) -> i32 {
        self.regs[idx].value
    }

    /// Writes a committed value into register `idx`. Rename state is untouched.
    #[inline]
    pub const fn write(&mut self, idx: usize, value: i32) {
        self.regs[idx].value = value;
    }

    /// Returns the tag of the latest in-flight producer, if any.
    #[inline]
    pub const fn producer(&self, idx: usize) -> Option<Tag> {
        self.regs[idx].producer
    }

    /// Returns true if register `idx` has no live producer.
    #[inline]
    pub const fn is_ready(&self, idx: usize) -> bool {
        self.regs[idx].is_ready()
    }

    /// Marks register `idx` as pending on the instruction tagged `tag`.
    pub const fn set_producer(&mut self, idx: usize, tag: Tag) {
        self.regs[idx].producer = Some(tag);
    }

    /// Clears the producer of register `idx`, but only if it is still `tag`.
    ///
    /// A younger writer that renamed the register after `tag` keeps its claim.
    /// Returns true if the producer was cleared.
    pub fn clear_if_match(&mut self, idx: usize, tag: Tag) -> bool {
        let slot = &mut self.regs[idx].producer;
        if *slot == Some(tag) {
            *slot = None;
            true
        } else {
            false
        }
    }

    /// Forgets every producer; all registers become ready.
    pub fn clear_producers(&mut self) {
        for reg in &mut self.regs {
            reg.producer = None;
        }
    }

    /// Rebuilds the producer map from surviving in-flight writers.
    ///
    /// `writers` must be ordered oldest first so the youngest writer of each
    /// register wins.
    pub fn rebuild_producers(&mut self, writers: impl IntoIterator<Item = (usize, Tag)>) {
        self.clear_producers();
        for (idx, tag) in writers {
            self.regs[idx].producer = Some(tag);
        }
    }

    /// Returns a snapshot of all register values.
    pub fn values(&self) -> [i32; REG_COUNT] {
        self.regs.map(|r| r.value)
    }

    /// Returns an adapter that formats the register file as a table.
    pub const fn dump(&self) -> RegisterDump<'_> {
        RegisterDump(self)
    }
}

/// Display adapter printing one `REG[ n] | Value=v` row per register, each
/// row closed by a dashed rule.
#[derive(Debug)]
pub struct RegisterDump<'a>(&'a RegisterFile);

impl fmt::Display for RegisterDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const RULE: &str = "--------------------------------";
        writeln!(f, "================================")?;
        writeln!(f)?;
        writeln!(
            f,
            "=============== STATE OF ARCHITECTURAL REGISTER FILE =========="
        )?;
        writeln!(f)?;
        writeln!(f, "{RULE}")?;
        for (i, reg) in self.0.regs.iter().enumerate() {
            write!(f, "REG[{i:2}]   |   Value={}", reg.value)?;
            if let Some(tag) = reg.producer {
                write!(f, "   (pending {tag})")?;
            }
            writeln!(f)?;
            writeln!(f, "{RULE}")?;
        }
        write!(f, "================================")
    }
}
