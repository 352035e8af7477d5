//! Reorder Buffer (ROB) for in-order commit.
//!
//! The ROB is a circular buffer that tracks every register-writing instruction
//! the out-of-order backend has issued. It provides:
//! 1. **Allocation:** Assigns a fresh tag to each destination-writing
//!    instruction at issue.
//! 2. **Completion:** Records results as units finish, in any order, and
//!    marks the entry that raised a fatal fault.
//! 3. **In-order Commit:** Releases entries from the head only, in program order.
//! 4. **Flush:** Drops entries younger than a mispredicted branch from the tail.
//!
//! One slot is always left unused so that `head == tail` means empty and
//! `(tail + 1) % capacity == head` means full; a ROB built with capacity `n`
//! holds at most `n - 1` entries.

use crate::common::{SimError, Tag, TagAllocator};

/// A single entry in the Reorder Buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RobEntry {
    /// Tag handed to consumers of this result.
    pub tag: Tag,
    /// Fetch sequence number of the instruction.
    pub seq: u64,
    /// Instruction table index.
    pub index: usize,
    /// Destination register.
    pub dest: usize,
    /// Result value, meaningful once `completed`.
    pub result: i32,
    /// Whether a unit has produced the result.
    pub completed: bool,
    /// Fault raised while executing. Recording one also aborts the run.
    pub exception: Option<SimError>,
}

/// Reorder Buffer.
#[derive(Clone, Debug)]
pub struct Rob {
    /// Fixed-size slot array; `None` slots lie outside `head..tail`.
    entries: Vec<Option<RobEntry>>,
    /// Index of the oldest entry (commit point).
    head: usize,
    /// Index where the next entry will be allocated.
    tail: usize,
    tags: TagAllocator,
}

impl Rob {
    /// Creates a new ROB with `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: vec![None; capacity.max(2)],
            head: 0,
            tail: 0,
            tags: TagAllocator::new(),
        }
    }

    /// Number of occupied entries.
    #[inline]
    pub fn len(&self) -> usize {
        (self.tail + self.entries.len() - self.head) % self.entries.len()
    }

    /// Returns true if the ROB is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Returns true if no further entry can be allocated.
    #[inline]
    pub fn is_full(&self) -> bool {
        (self.tail + 1) % self.entries.len() == self.head
    }

    /// Allocates an entry at the tail. Returns `None` if the ROB is full.
    pub fn allocate(&mut self, seq: u64, index: usize, dest: usize) -> Option<Tag> {
        if self.is_full() {
            return None;
        }
        let tag = self.tags.next_tag();
        self.entries[self.tail] = Some(RobEntry {
            tag,
            seq,
            index,
            dest,
            result: 0,
            completed: false,
            exception: None,
        });
        self.tail = (self.tail + 1) % self.entries.len();
        Some(tag)
    }

    /// Marks the entry tagged `tag` completed with `result`.
    ///
    /// Unknown tags (already flushed) are ignored.
    pub fn complete(&mut self, tag: Tag, result: i32) {
        if let Some(entry) = self.find_mut(tag) {
            entry.completed = true;
            entry.result = result;
        }
    }

    /// Records a fault against the entry tagged `tag`.
    pub fn fault(&mut self, tag: Tag, error: SimError) {
        if let Some(entry) = self.find_mut(tag) {
            entry.completed = true;
            entry.exception = Some(error);
        }
    }

    /// The entry tagged `tag`, if it is still in the buffer.
    pub fn find(&self, tag: Tag) -> Option<&RobEntry> {
        self.iter().find(|e| e.tag == tag)
    }

    fn find_mut(&mut self, tag: Tag) -> Option<&mut RobEntry> {
        let cap = self.entries.len();
        let mut idx = self.head;
        while idx != self.tail {
            if self.entries[idx].as_ref().is_some_and(|e| e.tag == tag) {
                return self.entries[idx].as_mut();
            }
            idx = (idx + 1) % cap;
        }
        None
    }

    /// Returns a reference to the head entry (oldest), if any.
    pub fn peek_head(&self) -> Option<&RobEntry> {
        if self.is_empty() {
            None
        } else {
            self.entries[self.head].as_ref()
        }
    }

    /// Removes and returns the head entry if it completed without a fault.
    pub fn commit_head(&mut self) -> Option<RobEntry> {
        let ready = self
            .peek_head()
            .is_some_and(|e| e.completed && e.exception.is_none());
        if !ready {
            return None;
        }
        let entry = self.entries[self.head].take();
        self.head = (self.head + 1) % self.entries.len();
        entry
    }

    /// Drops every entry fetched after `seq`, youngest first.
    ///
    /// Returns how many entries were removed.
    pub fn flush_after(&mut self, seq: u64) -> usize {
        let cap = self.entries.len();
        let mut removed = 0;
        while !self.is_empty() {
            let last = (self.tail + cap - 1) % cap;
            if self.entries[last].as_ref().is_some_and(|e| e.seq > seq) {
                self.entries[last] = None;
                self.tail = last;
                removed += 1;
            } else {
                break;
            }
        }
        removed
    }

    /// Iterates the entries from head (oldest) to tail.
    pub fn iter(&self) -> impl Iterator<Item = &RobEntry> {
        let cap = self.entries.len();
        (0..self.len()).filter_map(move |i| self.entries[(self.head + i) % cap].as_ref())
    }
}
