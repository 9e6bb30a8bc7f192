//! Floating-Point Register File.
//!
//! Registers hold raw single-precision bit patterns; all interpretation happens in the
//! bit-exact FPU so the host floating point never touches register contents.
//! Register `f0` is hardwired to the all-zero pattern, mirroring `x0`.

use crate::common::constants::NUM_REGS;

/// Floating-Point Register file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fpr {
    fregs: [u32; NUM_REGS],
}

impl Fpr {
    /// Creates a new floating-point register bank with all registers zeroed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a floating-point register as raw bits. `f0` reads as `0x0000_0000`.
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 { 0 } else { self.fregs[idx] }
    }

    /// Writes raw bits to a floating-point register. Writes to `f0` are discarded.
    pub fn write(&mut self, idx: usize, bits: u32) {
        if idx != 0 {
            self.fregs[idx] = bits;
        }
    }

    /// Copy of the whole bank.
    pub const fn snapshot(&self) -> [u32; NUM_REGS] {
        self.fregs
    }
}
