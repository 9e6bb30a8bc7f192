//! Program store.
//!
//! Holds the raw instruction words of the loaded program. Words are decoded when they
//! are fetched, so an undecodable word is only fatal if control reaches it.

use crate::common::SimError;
use crate::common::constants::INSTRUCTION_BYTES;
use crate::isa::{Instruction, decode};

/// Instruction memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstructionMemory {
    words: Vec<u32>,
}

impl InstructionMemory {
    /// Wraps the program's words, the first at address zero.
    pub const fn new(words: Vec<u32>) -> Self {
        Self { words }
    }

    /// Raw words.
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Byte address one past the last instruction.
    pub fn end_pc(&self) -> u32 {
        (self.words.len() as u32).wrapping_mul(INSTRUCTION_BYTES)
    }

    /// Whether `pc` lies inside the program.
    pub fn contains(&self, pc: u32) -> bool {
        pc < self.end_pc()
    }

    /// Raw word at `pc`, if inside the program and aligned.
    pub fn word(&self, pc: u32) -> Option<u32> {
        if pc % INSTRUCTION_BYTES != 0 {
            return None;
        }
        self.words.get((pc / INSTRUCTION_BYTES) as usize).copied()
    }

    /// Fetches and decodes the instruction at `pc`.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` when `pc` is past the end of the program.
    /// * `Err(InstructionMisaligned)` when `pc` is not a multiple of four.
    /// * `Err(IllegalInstruction)` when the word does not decode.
    pub fn fetch(&self, pc: u32) -> Result<Option<Instruction>, SimError> {
        if pc % INSTRUCTION_BYTES != 0 {
            return Err(SimError::InstructionMisaligned { pc });
        }
        let Some(word) = self.word(pc) else {
            return Ok(None);
        };
        decode(word)
            .map(Some)
            .map_err(|source| SimError::IllegalInstruction { pc, source })
    }
}
