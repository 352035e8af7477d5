//! Word-addressed data memory.
//!
//! Memory is a flat array of 32-bit signed words. Instructions address it with
//! byte addresses, which are divided by the word size on access; anything that
//! lands outside the array is a fatal fault for the run.

use std::fmt;

use crate::common::WORD_SIZE;
use crate::common::error::LoadError;

/// A byte address that does not name a word of data memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressFault {
    /// The offending byte address.
    pub addr: i32,
}

/// Flat data memory.
#[derive(Clone, PartialEq, Eq)]
pub struct DataMemory {
    words: Vec<i32>,
    /// Number of words supplied by the memory image at load time.
    image_len: usize,
}

impl fmt::Debug for DataMemory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataMemory")
            .field("capacity", &self.words.len())
            .field("image_len", &self.image_len)
            .finish()
    }
}

impl DataMemory {
    /// Creates a zero-filled memory of `capacity` words.
    pub fn new(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity],
            image_len: 0,
        }
    }

    /// Creates a memory of `capacity` words whose prefix is `image`.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Total size in words.
    /// * `image` - Initial contents, starting at word 0.
    ///
    /// # Returns
    ///
    /// The memory, or [`LoadError::MemoryImageTooLarge`] if `image` does not fit.
    pub fn with_image(capacity: usize, image: &[i32]) -> Result<Self, LoadError> {
        if image.len() > capacity {
            return Err(LoadError::MemoryImageTooLarge { capacity });
        }
        let mut mem = Self::new(capacity);
        mem.words[..image.len()].copy_from_slice(image);
        mem.image_len = image.len();
        Ok(mem)
    }

    /// Capacity in words.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.words.len()
    }

    /// Number of words that came from the memory image.
    #[inline]
    pub const fn image_len(&self) -> usize {
        self.image_len
    }

    /// Translates a byte address into a word index.
    #[inline]
    pub fn word_index(&self, addr: i32) -> Result<usize, AddressFault> {
        if addr < 0 {
            return Err(AddressFault { addr });
        }
        let idx = (addr / WORD_SIZE) as usize;
        if idx < self.words.len() {
            Ok(idx)
        } else {
            Err(AddressFault { addr })
        }
    }

    /// Reads the word containing byte address `addr`.
    pub fn read(&self, addr: i32) -> Result<i32, AddressFault> {
        self.word_index(addr).map(|idx| self.words[idx])
    }

    /// Writes the word containing byte address `addr`.
    pub fn write(&mut self, addr: i32, value: i32) -> Result<(), AddressFault> {
        let idx = self.word_index(addr)?;
        self.words[idx] = value;
        Ok(())
    }

    /// Returns the first `len` words (clamped to capacity).
    pub fn words(&self, len: usize) -> &[i32] {
        &self.words[..len.min(self.words.len())]
    }

    /// Returns the words that were covered by the memory image.
    pub fn image(&self) -> &[i32] {
        self.words(self.image_len)
    }
}
