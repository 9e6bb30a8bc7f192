//! Simulation and decode errors.
//!
//! This module defines the error handling for the simulator. It provides:
//! 1. **Decode Errors:** Words the instruction codec cannot map to an instruction.
//! 2. **Simulation Errors:** Fatal conditions raised while stepping the machine, plus the
//!    few non-fatal conditions the caller is expected to report and carry on from.

use thiserror::Error;

/// Failure to decode a 32-bit instruction word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The top four bits name no opcode class.
    #[error("undefined opcode class {class:#x} in word {word:#010x}")]
    UnknownClass {
        /// The offending word.
        word: u32,
        /// Bits [31:28] of the word.
        class: u32,
    },

    /// The class is valid but its funct field is not.
    #[error("undefined funct {funct} for opcode class {class:#x} in word {word:#010x}")]
    UnknownFunct {
        /// The offending word.
        word: u32,
        /// Bits [31:28] of the word.
        class: u32,
        /// Bits [2:0] of the word.
        funct: u32,
    },
}

/// Errors raised while simulating.
///
/// Everything except [`SimError::UnknownBreakpoint`] terminates the run; callers flush
/// statistics before exiting.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SimError {
    /// An instruction word reached fetch that the codec rejects.
    #[error("illegal instruction at pc {pc:#010x}: {source}")]
    IllegalInstruction {
        /// Address of the word.
        pc: u32,
        /// Why decoding failed.
        #[source]
        source: DecodeError,
    },

    /// Fetch was redirected to an address that is not instruction-aligned.
    #[error("instruction address {pc:#010x} is not aligned")]
    InstructionMisaligned {
        /// The misaligned fetch address.
        pc: u32,
    },

    /// A load or store computed an address that is not word-aligned.
    #[error("data address {addr:#010x} is not aligned (pc {pc:#010x})")]
    DataMisaligned {
        /// The effective address.
        addr: u32,
        /// Address of the memory instruction.
        pc: u32,
    },

    /// A load or store computed an address beyond data memory.
    #[error("data address {addr:#010x} is out of range (pc {pc:#010x})")]
    DataOutOfRange {
        /// The effective address.
        addr: u32,
        /// Address of the memory instruction.
        pc: u32,
    },

    /// `recv` committed while the receive buffer held nothing.
    #[error("receive from empty buffer (pc {pc:#010x})")]
    ReceiveEmpty {
        /// Address of the `recv` instruction.
        pc: u32,
    },

    /// A unit was handed work the codec or hazard detector should have prevented.
    #[error("internal consistency violation: {0}")]
    Internal(String),

    /// A breakpoint selector named a breakpoint the program does not define.
    #[error("unknown breakpoint `{0}`")]
    UnknownBreakpoint(String),
}

impl SimError {
    /// Returns whether the error ends the simulation.
    ///
    /// Unknown breakpoint names are reported to the user without changing any state.
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::UnknownBreakpoint(_))
    }
}
