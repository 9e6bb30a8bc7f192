//! # Unit Components
//!
//! Organizes the tests by the component they exercise: the shared register file,
//! the instruction codec, the execution units, the pipeline, and the simulator
//! surface built on top of them.

/// Register identifiers and the two-bank register file.
pub mod common;

/// Configuration parsing and validation.
pub mod config;


/// Pipeline versus reference interpreter on whole programs.
pub mod differential;


/// Loader, debug maps and the simulator lifecycle.
pub mod sim;

/// External buffers and the network transport.
pub mod soc;

/// Statistics accounting and reports.
///
/// Checks that [`SimStats`](dualsim_core::stats::SimStats) counts match the
/// program that produced them.
pub mod stats;
