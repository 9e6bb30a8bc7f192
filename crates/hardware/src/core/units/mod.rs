//! Execution units and functional components.
//!
//! This module contains the stateless computation behind each execution unit
//! (integer ALU, bit-exact FPU, branch resolution, load/store) together with the
//! direction predictors and the statistics-only data cache.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch Resolution Unit and direction predictors.
pub mod bru;

/// Statistics-only data cache with LRU replacement.
pub mod cache;

/// Bit-exact Floating-Point Unit.
pub mod fpu;

/// Load/Store Unit for memory and I/O buffer operations.
pub mod lsu;
