//! Data Hazard Detection and Forwarding.
//!
//! This module implements the in-order backend's answer to read-after-write
//! dependencies. It provides:
//! 1. **Forwarding Channels:** One channel per producing unit (add, mul, div,
//!    memory), each holding at most one `(register, tag, value)` triple.
//! 2. **Double Buffering:** Units publish into the `next` set during a cycle;
//!    Register-Read only sees the `current` set, which is what was published
//!    the cycle before.
//! 3. **Operand Read:** [`read_operand`] stalls on a busy register. Only a
//!    register that is not busy is looked up on the channels, then in the
//!    register file.
//!
//! The busy flag is cleared by Writeback alone, so a consumer always waits
//! for its producer to write back.

use std::mem;

use crate::common::RegisterFile;

/// A producing unit with its own forwarding channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Add / subtract / set unit.
    Add,
    /// Multiplier.
    Mul,
    /// Divider.
    Div,
    /// Memory unit (loads).
    Memory,
}

impl Channel {
    /// Lookup order when more than one channel matches.
    pub const PRECEDENCE: [Self; 4] = [Self::Add, Self::Mul, Self::Div, Self::Memory];

    const fn slot(self) -> usize {
        self as usize
    }
}

/// A value offered on a forwarding channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Forward {
    /// Destination register of the producer.
    pub reg: usize,
    /// Produced value.
    pub value: i32,
}

/// Forwarding channels, double-buffered across the cycle boundary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ForwardingUnit {
    current: [Option<Forward>; 4],
    next: [Option<Forward>; 4],
}

impl ForwardingUnit {
    /// Creates a unit with every channel empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers a value on `channel`, visible from the next cycle.
    pub const fn publish(&mut self, channel: Channel, forward: Forward) {
        self.next[channel.slot()] = Some(forward);
    }

    /// The value currently visible on `channel`.
    pub const fn current(&self, channel: Channel) -> Option<Forward> {
        self.current[channel.slot()]
    }

    /// Finds a value for `reg`, searching channels in precedence order.
    pub fn lookup(&self, reg: usize) -> Option<i32> {
        Channel::PRECEDENCE
            .into_iter()
            .filter_map(|ch| self.current(ch))
            .find(|fwd| fwd.reg == reg)
            .map(|fwd| fwd.value)
    }

    /// Makes this cycle's publications visible and empties the next set.
    pub fn end_cycle(&mut self) {
        self.current = mem::take(&mut self.next);
    }

    /// Drops every published value. Called on a flush.
    pub const fn clear(&mut self) {
        self.current = [None; 4];
        self.next = [None; 4];
    }
}

/// Reads a source register for Register-Read.
///
/// Returns `None` while the register is busy; the caller must stall. A ready
/// register takes the first matching channel, then the register file.
pub fn read_operand(regs: &RegisterFile, forwarding: &ForwardingUnit, reg: usize) -> Option<i32> {
    if !regs.is_ready(reg) {
        return None;
    }
    Some(forwarding.lookup(reg).unwrap_or_else(|| regs.read(reg)))
}
