//! System components around the core.
//!
//! This module organizes the memory-side state the execution units act on and the
//! transport that connects the send/receive buffers to the outside world.

/// System builder for assembling the memories and buffers.
pub mod builder;

/// Thread-safe send/receive FIFOs.
pub mod buffers;

/// Data and instruction memories.
pub mod memory;

/// TCP receive and transmit tasks.
pub mod net;

/// Transport trait definitions.
pub mod traits;

pub use builder::System;
pub use buffers::{IoBuffers, WordQueue};
