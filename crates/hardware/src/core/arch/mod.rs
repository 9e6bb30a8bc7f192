//! Architectural register banks.
//!
//! 1. **GPRs:** The 32-entry integer bank.
//! 2. **FPRs:** The 32-entry floating-point bank.
//!
//! Both banks hardwire index 0 to zero.

/// Floating-point register bank.
pub mod fpr;

/// Integer register bank.
pub mod gpr;
