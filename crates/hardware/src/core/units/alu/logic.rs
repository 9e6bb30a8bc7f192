//! ALU bitwise logical operations.

use crate::isa::InstKind;

/// Executes a bitwise operation.
///
/// Returns `0` for non-logical kinds.
pub const fn execute(kind: InstKind, a: u32, b: u32) -> u32 {
    match kind {
        InstKind::And | InstKind::Andi => a & b,
        InstKind::Or | InstKind::Ori => a | b,
        InstKind::Xor | InstKind::Xori => a ^ b,
        _ => 0,
    }
}
