//! Machine-wide constants.
//!
//! These values are properties of the processor itself rather than tunable
//! simulation parameters; tunables live in [`crate::config`].

/// Number of instructions fetched and considered for dispatch together.
pub const ISSUE_WIDTH: usize = 2;

/// Integer results the writeback stage can commit in one cycle.
pub const INT_WRITE_PORTS: usize = 2;

/// Floating-point results the writeback stage can commit in one cycle.
pub const FLOAT_WRITE_PORTS: usize = 2;

/// Registers per bank.
pub const NUM_REGS: usize = 32;

/// Size of a data word in bytes; data accesses must be aligned to it.
pub const WORD_BYTES: u32 = 4;

/// Size of an instruction in bytes.
pub const INSTRUCTION_BYTES: u32 = 4;

/// Number of integer ALUs.
pub const NUM_ALUS: usize = 2;
