//! Dual-issue processor simulator library.
//!
//! This crate implements a cycle-level simulator for a custom dual-issue core with the following:
//! 1. **Core:** A four-stage timing pipeline (fetch, decode/dispatch, execute, writeback) with
//!    two ALUs, a branch unit, a memory pipeline, a multi-cycle FPU and a pipelined FPU.
//! 2. **Hazards:** Intra- and inter-group RAW/WAW, control, structural and write-port checks.
//! 3. **FPU:** Bit-exact single-precision arithmetic built from fixed-point significand
//!    operations, lookup tables and Newton refinement.
//! 4. **ISA:** A 32-bit encoding with a decoder, encoder and disassembler.
//! 5. **SoC:** Data memory and the send/receive buffers, with optional TCP transport.
//! 6. **Simulation:** Loader, debug maps, inspection, configuration and statistics.

/// Common types and constants (register identifiers, register file, errors).
pub mod common;
/// Simulator configuration (defaults and JSON-backed sections).
pub mod config;
/// CPU core (context, pipeline, execution units, register banks).
pub mod core;
/// Instruction set (decode, encode, disassembly).
pub mod isa;
/// Loader, debug maps, inspection, simulator context and reference interpreter.
pub mod sim;
/// System-on-chip (program and data memory, I/O buffers, network transport).
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// CPU context; holds registers, memory, predictor, cache and stats.
pub use crate::core::Cpu;
/// Clock transition entry point and its status.
pub use crate::core::pipeline::{ClockStatus, advance_clock};
/// Simulator context; construct with `Simulator::new`.
pub use crate::sim::Simulator;
/// Memory-side state (program, data memory, buffers); construct with `System::new`.
pub use crate::soc::System;
