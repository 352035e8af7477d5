//! Reservation Station (RS).
//!
//! Issued instructions wait here until their source operands are available,
//! then dispatch one per cycle into the execute chain. The station is a
//! circular buffer with the same fullness law as the ROB: `head == tail` is
//! empty and `(tail + 1) % capacity == head` is full.
//!
//! Dispatch picks the oldest entry whose operands are ready, subject to:
//! 1. **Branches:** nothing dispatches past an older, undispatched branch.
//! 2. **Memory:** a load or store never passes an older load or store.
//! 3. **Return:** `ret` dispatches only once every older entry has left.
//!
//! Dispatching from the middle leaves a hole; the head skips holes so the
//! occupied span stays tight.

use crate::common::Tag;
use crate::core::pipeline::latches::InFlight;
use crate::isa::Opcode;

/// A source operand held in the station.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Operand {
    /// The value, valid once `tag` is `None`.
    pub value: i32,
    /// ROB tag of the producer still being waited on.
    pub tag: Option<Tag>,
}

impl Operand {
    /// An operand whose value is known.
    pub const fn ready(value: i32) -> Self {
        Self { value, tag: None }
    }

    /// An operand waiting for the producer tagged `tag`.
    pub const fn waiting(tag: Tag) -> Self {
        Self {
            value: 0,
            tag: Some(tag),
        }
    }

    /// True if the value is available.
    #[inline]
    pub const fn is_ready(&self) -> bool {
        self.tag.is_none()
    }

    fn wake(&mut self, tag: Tag, value: i32) {
        if self.tag == Some(tag) {
            self.value = value;
            self.tag = None;
        }
    }
}

/// One waiting instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RsEntry {
    /// The instruction, as it left Register-Read.
    pub inst: InFlight,
    /// First source operand.
    pub src1: Operand,
    /// Second source operand (or the immediate).
    pub src2: Operand,
}

impl RsEntry {
    /// Bundles an instruction with its operands.
    pub const fn new(inst: InFlight, src1: Operand, src2: Operand) -> Self {
        Self { inst, src1, src2 }
    }

    /// True if both operands are available.
    #[inline]
    pub const fn is_ready(&self) -> bool {
        self.src1.is_ready() && self.src2.is_ready()
    }

    /// The instruction with its operand values filled in, ready for the
    /// execute chain.
    pub const fn into_inflight(self) -> InFlight {
        let mut inst = self.inst;
        inst.src1_value = self.src1.value;
        inst.src2_value = self.src2.value;
        inst
    }
}

/// Reservation Station.
#[derive(Clone, Debug)]
pub struct ReservationStation {
    /// Slots; `None` is an invalid (free or dispatched) slot.
    slots: Vec<Option<RsEntry>>,
    head: usize,
    tail: usize,
}

impl ReservationStation {
    /// Creates a station with `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity.max(2)],
            head: 0,
            tail: 0,
        }
    }

    /// Number of slots between head and tail, holes included.
    pub fn len(&self) -> usize {
        (self.tail + self.slots.len() - self.head) % self.slots.len()
    }

    /// Returns true if the station holds nothing.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Returns true if no further entry can be enqueued.
    pub fn is_full(&self) -> bool {
        (self.tail + 1) % self.slots.len() == self.head
    }

    /// Appends an entry at the tail.
    ///
    /// Returns the slot used, or `None` (state unchanged) when full.
    pub fn enqueue(&mut self, entry: RsEntry) -> Option<usize> {
        if self.is_full() {
            return None;
        }
        let slot = self.tail;
        self.slots[slot] = Some(entry);
        self.tail = (self.tail + 1) % self.slots.len();
        Some(slot)
    }

    /// Delivers a produced value to every operand waiting on `tag`.
    pub fn wakeup(&mut self, tag: Tag, value: i32) {
        for entry in self.slots.iter_mut().flatten() {
            entry.src1.wake(tag, value);
            entry.src2.wake(tag, value);
        }
    }

    /// Chooses the slot to dispatch this cycle, if any.
    pub fn select(&self) -> Option<usize> {
        let mut older_any = false;
        let mut older_memory = false;
        for (slot, entry) in self.occupied() {
            let op = entry.inst.opcode;
            let blocked = (op.is_memory() && older_memory) || (op == Opcode::Ret && older_any);
            if entry.is_ready() && !blocked {
                return Some(slot);
            }
            if op.is_branch() {
                return None;
            }
            older_any = true;
            older_memory |= op.is_memory();
        }
        None
    }

    /// Removes the entry in `slot`.
    pub fn take(&mut self, slot: usize) -> Option<RsEntry> {
        let entry = self.slots.get_mut(slot)?.take();
        self.compact();
        entry
    }

    /// Selects and removes the next entry to dispatch.
    pub fn dispatch(&mut self) -> Option<RsEntry> {
        let slot = self.select()?;
        self.take(slot)
    }

    /// Drops every entry fetched after `seq`. Returns how many were dropped.
    pub fn flush_after(&mut self, seq: u64) -> usize {
        let mut dropped = 0;
        for slot in &mut self.slots {
            if slot.is_some_and(|e| e.inst.seq > seq) {
                *slot = None;
                dropped += 1;
            }
        }
        self.compact();
        dropped
    }

    /// Iterates the valid entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &RsEntry> {
        self.occupied().map(|(_, e)| e)
    }

    fn occupied(&self) -> impl Iterator<Item = (usize, &RsEntry)> {
        let cap = self.slots.len();
        (0..self.len()).filter_map(move |i| {
            let slot = (self.head + i) % cap;
            self.slots[slot].as_ref().map(|e| (slot, e))
        })
    }

    /// Moves head forward and tail backward over invalid slots.
    fn compact(&mut self) {
        let cap = self.slots.len();
        while self.head != self.tail && self.slots[self.head].is_none() {
            self.head = (self.head + 1) % cap;
        }
        while self.head != self.tail && self.slots[(self.tail + cap - 1) % cap].is_none() {
            self.tail = (self.tail + cap - 1) % cap;
        }
    }
}
