//! Register identifiers and the unified register file.
//!
//! This module provides:
//! 1. **Typed Identifiers:** [`RegId`] pairs a bank with an index so integer and float
//!    registers can never be confused by the hazard logic.
//! 2. **Unified Storage:** [`RegisterFile`] fronts the integer and floating-point banks.
//! 3. **Observability:** Dump helpers used by tracing and the CLI.

use std::fmt;

use serde::Serialize;

use crate::core::arch::fpr::Fpr;
use crate::core::arch::gpr::Gpr;

/// Register bank selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum RegClass {
    /// Integer bank (`x0`-`x31`).
    Int,
    /// Floating-point bank (`f0`-`f31`).
    Float,
}

/// A register in one of the two banks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RegId {
    /// Bank the register lives in.
    pub class: RegClass,
    /// Index within the bank (0-31).
    pub index: u8,
}

impl RegId {
    /// Integer register `x{index}`.
    pub const fn int(index: u8) -> Self {
        Self {
            class: RegClass::Int,
            index,
        }
    }

    /// Floating-point register `f{index}`.
    pub const fn float(index: u8) -> Self {
        Self {
            class: RegClass::Float,
            index,
        }
    }

    /// Register 0 of either bank is hardwired to zero.
    pub const fn is_zero(self) -> bool {
        self.index == 0
    }
}

impl fmt::Display for RegId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.class {
            RegClass::Int => write!(f, "x{}", self.index),
            RegClass::Float => write!(f, "f{}", self.index),
        }
    }
}

/// Both architectural register banks.
///
/// Values are raw 32-bit patterns; the float bank is interpreted by the FPU.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    gpr: Gpr,
    fpr: Fpr,
}

impl RegisterFile {
    /// Creates a register file with every register zeroed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register. Index 0 of either bank reads as zero.
    pub fn read(&self, reg: RegId) -> u32 {
        match reg.class {
            RegClass::Int => self.gpr.read(reg.index as usize),
            RegClass::Float => self.fpr.read(reg.index as usize),
        }
    }

    /// Writes a register. Writes to index 0 are discarded.
    pub fn write(&mut self, reg: RegId, val: u32) {
        match reg.class {
            RegClass::Int => self.gpr.write(reg.index as usize, val),
            RegClass::Float => self.fpr.write(reg.index as usize, val),
        }
    }

    /// Reads integer register `x{idx}`.
    pub fn read_int(&self, idx: usize) -> u32 {
        self.gpr.read(idx)
    }

    /// Reads floating-point register `f{idx}` as its bit pattern.
    pub fn read_float(&self, idx: usize) -> u32 {
        self.fpr.read(idx)
    }

    /// Integer bank contents, `x0` first.
    pub fn int_bank(&self) -> [u32; 32] {
        self.gpr.snapshot()
    }

    /// Float bank contents, `f0` first.
    pub fn float_bank(&self) -> [u32; 32] {
        self.fpr.snapshot()
    }
}
