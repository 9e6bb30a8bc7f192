//! Reference interpreter.
//!
//! A non-pipelined model that executes one instruction per step with no hazards and no
//! unit latencies. It shares [`Cpu::execute`] with the pipeline, so the two models must
//! reach the same architectural state for any program.

use tracing::debug;

use crate::common::SimError;
use crate::common::constants::INSTRUCTION_BYTES;
use crate::config::Config;
use crate::core::Cpu;
use crate::core::pipeline::latches::{FetchedInstruction, IssuedInstruction};
use crate::soc::System;

/// Sequential interpreter over a private CPU context.
#[derive(Clone, Debug)]
pub struct ReferenceModel {
    /// Architectural context.
    pub cpu: Cpu,
    /// Address of the next instruction.
    pub pc: u32,
}

impl ReferenceModel {
    /// Creates an interpreter for `words` with fresh memory and buffers.
    pub fn new(config: &Config, words: Vec<u32>) -> Self {
        Self {
            cpu: Cpu::new(System::new(config, words), config),
            pc: 0,
        }
    }

    /// Executes one instruction.
    ///
    /// # Returns
    ///
    /// `Ok(false)` once the pc is past the end of the program, `Ok(true)` otherwise.
    pub fn step(&mut self) -> Result<bool, SimError> {
        let pc = self.pc;
        let Some(inst) = self.cpu.bus.program.fetch(pc)? else {
            return Ok(false);
        };
        let (rv1, rv2) = self.cpu.read_operands(&inst);
        let iss = IssuedInstruction::new(&FetchedInstruction::new(pc, inst, None), rv1, rv2);
        let done = self.cpu.execute(&iss)?;
        self.cpu.stats.cycles += 1;
        self.cpu.stats.instructions_dispatched += 1;
        if self.cpu.trace {
            debug!(target: "dualsim::reference", "{pc:#x}: {inst}");
        }
        self.pc = done
            .branch
            .map_or(pc.wrapping_add(INSTRUCTION_BYTES), |b| b.next_pc);
        Ok(true)
    }

    /// Runs until the program ends or `max_steps` instructions have executed.
    ///
    /// # Returns
    ///
    /// The number of instructions executed by this call.
    pub fn run(&mut self, max_steps: Option<u64>) -> Result<u64, SimError> {
        let mut steps = 0;
        while max_steps.is_none_or(|max| steps < max) && self.step()? {
            steps += 1;
        }
        Ok(steps)
    }
}
