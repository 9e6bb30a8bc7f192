//! Core processor implementation.
//!
//! This module contains the CPU context, the dual-issue timing pipeline, the
//! execution units and the architectural register banks.

/// Architectural register banks.
pub mod arch;

/// CPU context and the unit semantics shared by both execution models.
pub mod cpu;

/// Dual-issue timing pipeline (state, hazards, stages, clock engine).
pub mod pipeline;

/// Execution units (ALU, FPU, LSU, branch unit and predictors, data cache).
pub mod units;

pub use self::cpu::Cpu;
