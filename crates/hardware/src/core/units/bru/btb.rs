//! Branch Target Buffer (BTB).
//!
//! The BTB is a direct-mapped table that records, per index, the tag of the
//! last branch resolved there and its target. Its index space is shared with
//! the pattern table, so two branches sixteen instructions apart alias on
//! both tables.
//!
//! The misprediction test only asks whether an index has been tagged at all,
//! not whether the tag matches the branch being resolved.

use crate::common::constants::{PC_TAG_MASK, PC_TAG_SHIFT};

/// An entry in the Branch Target Buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BtbEntry {
    /// Tag of the branch that last wrote this entry; `None` until first resolved.
    pub tag: Option<u32>,
    /// Resolved target (byte address).
    pub target: i32,
}

/// Branch Target Buffer structure.
#[derive(Clone, Debug)]
pub struct Btb {
    /// The table of BTB entries.
    table: Vec<BtbEntry>,
}

impl Btb {
    /// Creates a new Branch Target Buffer with the specified size.
    ///
    /// # Arguments
    ///
    /// * `size` - The number of entries in the BTB. Must be a power of 2.
    pub fn new(size: usize) -> Self {
        Self {
            table: vec![BtbEntry::default(); size.max(1)],
        }
    }

    /// Calculates the table index for a byte program counter.
    ///
    /// Shifts the PC right by 2 bits (instruction alignment) and masks it
    /// against the table size.
    #[inline]
    pub fn index(&self, pc: u32) -> usize {
        ((pc >> 2) as usize) & (self.table.len() - 1)
    }

    /// Extracts the tag stored for a byte program counter.
    #[inline]
    pub const fn tag_of(pc: u32) -> u32 {
        (pc & PC_TAG_MASK) >> PC_TAG_SHIFT
    }

    /// Returns the entry the PC maps to.
    pub fn entry(&self, pc: u32) -> BtbEntry {
        self.table[self.index(pc)]
    }

    /// Returns true if the entry at the PC's index has ever been written.
    pub fn is_tagged(&self, pc: u32) -> bool {
        self.entry(pc).tag.is_some()
    }

    /// Looks up a target address for the given program counter.
    ///
    /// # Returns
    ///
    /// The recorded target if the entry's tag matches this PC, otherwise `None`.
    pub fn lookup(&self, pc: u32) -> Option<i32> {
        let e = self.entry(pc);
        (e.tag == Some(Self::tag_of(pc))).then_some(e.target)
    }

    /// Overwrites the entry for a program counter.
    ///
    /// # Arguments
    ///
    /// * `pc` - Byte address of the branch.
    /// * `target` - The branch target (byte address).
    pub fn update(&mut self, pc: u32, target: i32) {
        let idx = self.index(pc);
        self.table[idx] = BtbEntry {
            tag: Some(Self::tag_of(pc)),
            target,
        };
    }
}
