//! Instruction Set Architecture definitions.
//!
//! Contains the opcode/funct tables, the typed instruction descriptor, and the codec:
//!
//! * `opcodes`: Opcode classes and funct codes.
//! * `instruction`: Instruction kinds, operand shapes and the immutable descriptor.
//! * `decode` / `encode`: Conversion between 32-bit words and descriptors.
//! * `disasm`: Human-readable rendering for traces and the debugger.

/// Instruction decoding for every layout.
pub mod decode;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Instruction encoding (inverse of decode).
pub mod encode;

/// Instruction kinds and the decoded descriptor.
pub mod instruction;

/// Opcode class and funct constants.
pub mod opcodes;

pub use decode::decode;
pub use encode::encode;
pub use instruction::{ExecUnit, InstKind, Instruction, Layout};
