//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the twelve-stage chain and the single-slot latch each
//! stage owns:
//! Fetch → Decode → Analyze → Register-Read/Issue → Add → Mul → Div → Branch
//! → Mem1 → Mem2 → Writeback → Retire.
//!
//! 1. **Instruction Flow:** An [`InFlight`] record carries one instruction's
//!    decoded operands and intermediate values down the chain.
//! 2. **Occupancy:** Each latch holds at most one record; `None` is a bubble.
//! 3. **Squash:** Records younger than a mispredicted branch are discarded by
//!    fetch sequence number.

use std::fmt;

use crate::common::Tag;
use crate::isa::{Instruction, Opcode, Operands};

/// A pipeline stage, in program-flow order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    /// Instruction fetch and prediction.
    Fetch,
    /// Operand decode.
    Decode,
    /// Operand analysis (immediate placement).
    Analyze,
    /// Register read (in-order) or rename + issue (out-of-order).
    RegisterRead,
    /// Add / subtract / set unit.
    Add,
    /// Multiplier.
    Mul,
    /// Divider.
    Div,
    /// Branch resolution.
    Branch,
    /// Memory address calculation.
    Mem1,
    /// Memory access.
    Mem2,
    /// Register writeback.
    Writeback,
    /// Retirement.
    Retire,
}

impl Stage {
    /// Number of stages.
    pub const COUNT: usize = 12;

    /// Every stage, Fetch first.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Fetch,
        Self::Decode,
        Self::Analyze,
        Self::RegisterRead,
        Self::Add,
        Self::Mul,
        Self::Div,
        Self::Branch,
        Self::Mem1,
        Self::Mem2,
        Self::Writeback,
        Self::Retire,
    ];

    /// Position in the chain.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The stage an instruction moves to after this one.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Fetch => Some(Self::Decode),
            Self::Decode => Some(Self::Analyze),
            Self::Analyze => Some(Self::RegisterRead),
            Self::RegisterRead => Some(Self::Add),
            Self::Add => Some(Self::Mul),
            Self::Mul => Some(Self::Div),
            Self::Div => Some(Self::Branch),
            Self::Branch => Some(Self::Mem1),
            Self::Mem1 => Some(Self::Mem2),
            Self::Mem2 => Some(Self::Writeback),
            Self::Writeback => Some(Self::Retire),
            Self::Retire => None,
        }
    }

    /// Short label used in traces.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fetch => "IF",
            Self::Decode => "ID",
            Self::Analyze => "IA",
            Self::RegisterRead => "RR",
            Self::Add => "ADD",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::Branch => "BR",
            Self::Mem1 => "MEM1",
            Self::Mem2 => "MEM2",
            Self::Writeback => "WB",
            Self::Retire => "RET",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One instruction in flight between stages.
///
/// Holds the instruction's table index plus by-value copies of everything
/// downstream stages need, so no stage reaches back into the table after
/// Decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InFlight {
    /// Fetch sequence number; strictly increasing in fetch order.
    pub seq: u64,
    /// Index of the instruction in the instruction table (the fetch-time PC).
    pub index: usize,
    /// Instruction form.
    pub opcode: Opcode,
    /// Decoded operand slots, filled by Decode.
    pub operands: Operands,
    /// Value of the first source register.
    pub src1_value: i32,
    /// Value of the second source register, or the immediate.
    pub src2_value: i32,
    /// Effective byte address for memory instructions.
    pub addr: i32,
    /// Result produced by the executing unit.
    pub result: i32,
    /// Producer tag (in-order) or ROB tag (out-of-order) for the destination.
    pub tag: Option<Tag>,
    /// Whether Fetch predicted this branch taken.
    pub pred_taken: bool,
}

impl InFlight {
    /// Creates the record Fetch places in its latch.
    pub fn fetched(inst: &Instruction, seq: u64, pred_taken: bool) -> Self {
        Self {
            seq,
            index: inst.index,
            opcode: inst.opcode,
            operands: Operands::default(),
            src1_value: 0,
            src2_value: 0,
            addr: 0,
            result: 0,
            tag: None,
            pred_taken,
        }
    }
}

/// The twelve single-slot latches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Latches {
    slots: [Option<InFlight>; Stage::COUNT],
}

impl Latches {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// The record in `stage`, if occupied.
    #[inline]
    pub const fn get(&self, stage: Stage) -> Option<&InFlight> {
        self.slots[stage.index()].as_ref()
    }

    /// Mutable access to the record in `stage`.
    #[inline]
    pub const fn get_mut(&mut self, stage: Stage) -> Option<&mut InFlight> {
        self.slots[stage.index()].as_mut()
    }

    /// True if `stage` holds no instruction.
    #[inline]
    pub const fn is_free(&self, stage: Stage) -> bool {
        self.slots[stage.index()].is_none()
    }

    /// Places a record in `stage`, replacing whatever was there.
    #[inline]
    pub const fn put(&mut self, stage: Stage, inst: InFlight) {
        self.slots[stage.index()] = Some(inst);
    }

    /// Removes and returns the record in `stage`.
    #[inline]
    pub const fn take(&mut self, stage: Stage) -> Option<InFlight> {
        self.slots[stage.index()].take()
    }

    /// Moves the record in `from` into `to` if `to` is free.
    ///
    /// Returns true if something moved.
    pub fn advance(&mut self, from: Stage, to: Stage) -> bool {
        if self.is_free(to) {
            if let Some(inst) = self.take(from) {
                self.put(to, inst);
                return true;
            }
        }
        false
    }

    /// Discards every record fetched after `seq`. Returns how many were dropped.
    pub fn squash_younger(&mut self, seq: u64) -> usize {
        let mut dropped = 0;
        for slot in &mut self.slots {
            if slot.is_some_and(|inst| inst.seq > seq) {
                *slot = None;
                dropped += 1;
            }
        }
        dropped
    }

    /// True if every latch is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Iterates `(stage, record)` pairs, Fetch first.
    pub fn iter(&self) -> impl Iterator<Item = (Stage, Option<&InFlight>)> {
        Stage::ALL
            .into_iter()
            .zip(self.slots.iter().map(Option::as_ref))
    }
}
