//! In-flight producer tags.

use std::fmt;

/// Unique tag identifying an in-flight instruction that will write a register.
///
/// The in-order backend hands these out at register read; the out-of-order
/// backend uses them as ROB entry ids. Tags are never reused within a run,
/// so a stale tag can never alias a live producer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Tag(pub u32);

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Monotonic tag source.
#[derive(Clone, Debug)]
pub struct TagAllocator {
    next: u32,
}

impl Default for TagAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl TagAllocator {
    /// Creates an allocator whose first tag is `t1`.
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Returns a fresh tag.
    pub fn next_tag(&mut self) -> Tag {
        let tag = Tag(self.next);
        self.next = self.next.wrapping_add(1);
        if self.next == 0 {
            self.next = 1; // skip 0
        }
        tag
    }
}
