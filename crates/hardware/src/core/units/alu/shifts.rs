//! ALU shift operations.
//!
//! Only the low five bits of the shift amount are used, for both the register and the
//! immediate forms.

use crate::isa::InstKind;

/// Mask for the shift amount.
const SHAMT_MASK: u32 = 0x1F;

/// Executes a shift.
///
/// Returns `0` for non-shift kinds.
pub const fn execute(kind: InstKind, a: u32, b: u32) -> u32 {
    let shamt = b & SHAMT_MASK;
    match kind {
        InstKind::Sll | InstKind::Slli => a << shamt,
        InstKind::Srl | InstKind::Srli => a >> shamt,
        InstKind::Sra | InstKind::Srai => ((a as i32) >> shamt) as u32,
        _ => 0,
    }
}
