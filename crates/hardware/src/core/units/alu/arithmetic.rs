//! ALU arithmetic operations.
//!
//! Addition and subtraction wrap modulo 2^32. `lui` places the immediate in the upper
//! twenty bits.

use crate::isa::InstKind;

/// Bits `lui` shifts its immediate by.
const LUI_SHIFT: u32 = 12;

/// Executes an integer arithmetic operation.
///
/// Returns `0` for non-arithmetic kinds.
pub const fn execute(kind: InstKind, a: u32, b: u32) -> u32 {
    match kind {
        InstKind::Add | InstKind::Addi => a.wrapping_add(b),
        InstKind::Sub => a.wrapping_sub(b),
        InstKind::Lui => b << LUI_SHIFT,
        _ => 0,
    }
}
