//! Common types shared by every part of the simulator.
//!
//! This module provides the building blocks used across the core and its collaborators:
//! 1. **Constants:** Machine-wide widths (issue width, write ports, word size).
//! 2. **Error Handling:** Fatal and non-fatal simulation errors, and codec errors.
//! 3. **Register Management:** Typed register identifiers and the two-bank register file.

/// Machine-wide constants.
pub mod constants;

/// Error types for decoding and simulation.
pub mod error;

/// Register identifiers and the register file.
pub mod reg;

pub use error::{DecodeError, SimError};
pub use reg::{RegClass, RegId, RegisterFile};
