//! Data and instruction memories.
//!
//! This module implements the two word-addressed stores of the machine. It provides:
//! 1. **Data memory:** A flat array of 32-bit words with alignment and range checks.
//! 2. **Instruction memory:** The loaded program, decoded on fetch.
//!
//! Both are byte-addressed from zero and only support aligned 32-bit accesses.

/// Program store decoded at fetch.
pub mod program;

pub use self::program::InstructionMemory;

use crate::common::SimError;
use crate::common::constants::WORD_BYTES;

/// Word-addressed data memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataMemory {
    words: Vec<u32>,
}

impl DataMemory {
    /// Creates a zeroed memory of `size_words` words.
    pub fn new(size_words: usize) -> Self {
        Self {
            words: vec![0; size_words],
        }
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the memory holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn index(&self, addr: u32, pc: u32) -> Result<usize, SimError> {
        if addr % WORD_BYTES != 0 {
            return Err(SimError::DataMisaligned { addr, pc });
        }
        let idx = (addr / WORD_BYTES) as usize;
        if idx >= self.words.len() {
            return Err(SimError::DataOutOfRange { addr, pc });
        }
        Ok(idx)
    }

    /// Reads the word at byte address `addr` on behalf of the instruction at `pc`.
    pub fn read(&self, addr: u32, pc: u32) -> Result<u32, SimError> {
        Ok(self.words[self.index(addr, pc)?])
    }

    /// Writes the word at byte address `addr` on behalf of the instruction at `pc`.
    pub fn write(&mut self, addr: u32, value: u32, pc: u32) -> Result<(), SimError> {
        let idx = self.index(addr, pc)?;
        self.words[idx] = value;
        Ok(())
    }

    /// Reads a word for inspection; `None` if misaligned or out of range.
    pub fn peek(&self, addr: u32) -> Option<u32> {
        self.index(addr, 0).ok().map(|idx| self.words[idx])
    }

    /// Zeroes every word.
    pub fn clear(&mut self) {
        self.words.fill(0);
    }
}
