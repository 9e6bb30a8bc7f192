//! System construction and top-level `System` type.
//!
//! This module assembles everything outside the core that the execution units touch:
//! 1. **Program:** The instruction memory holding the loaded words.
//! 2. **Data memory:** Sized from the configuration.
//! 3. **I/O buffers:** The receive and send FIFOs shared with the network tasks.

use crate::config::Config;
use crate::soc::buffers::IoBuffers;
use crate::soc::memory::{DataMemory, InstructionMemory};

/// Memory-side state of the machine.
#[derive(Clone, Debug)]
pub struct System {
    /// Loaded program.
    pub program: InstructionMemory,
    /// Data memory.
    pub memory: DataMemory,
    /// External send/receive buffers.
    pub io: IoBuffers,
}

impl System {
    /// Builds a system around `program` with fresh memory and empty buffers.
    ///
    /// # Arguments
    ///
    /// * `config` - Simulator configuration (memory size).
    /// * `program` - Instruction words, the first at address zero.
    pub fn new(config: &Config, program: Vec<u32>) -> Self {
        Self {
            program: InstructionMemory::new(program),
            memory: DataMemory::new(config.memory.size_words),
            io: IoBuffers::new(),
        }
    }

    /// Clears data memory and both buffers; the program is kept.
    pub fn reset(&mut self) {
        self.memory.clear();
        self.io.clear();
    }
}
