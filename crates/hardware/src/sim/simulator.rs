//! Simulator: owns the CPU context and the pipeline state side-by-side.
//!
//! The pipeline state is a plain value replaced by its successor on every clock, so
//! the engine never needs to borrow the CPU and the stage registers from one struct.

use tracing::{info, warn};

use crate::common::SimError;
use crate::config::Config;
use crate::core::Cpu;
use crate::core::pipeline::{ClockStatus, PipelineState, advance_clock};
use crate::sim::debug::DebugInfo;
use crate::sim::loader::Program;
use crate::soc::{IoBuffers, System};
use crate::stats::SimStats;

/// Why [`Simulator::run`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunExit {
    /// The program drained.
    Ended,
    /// A selected breakpoint dispatched at this pc.
    Breakpoint(u32),
    /// The cycle limit was reached first.
    CycleLimit,
}

/// Top-level simulator: CPU architectural state + pipeline state + debug maps.
#[derive(Clone, Debug)]
pub struct Simulator {
    cpu: Cpu,
    state: PipelineState,
    debug: DebugInfo,
}

impl Simulator {
    /// Creates a simulator for a loaded program.
    pub fn new(config: &Config, program: Program) -> Self {
        let cpu = Cpu::new(System::new(config, program.words), config);
        let state = PipelineState::new(&config.pipeline);
        info!(
            words = cpu.bus.program.words().len(),
            predictor = ?config.pipeline.branch_predictor,
            "simulator initialised"
        );
        Self {
            cpu,
            state,
            debug: program.debug,
        }
    }

    /// Creates a simulator for bare words with no debug information.
    pub fn from_words(config: &Config, words: Vec<u32>) -> Self {
        Self::new(
            config,
            Program {
                words,
                debug: DebugInfo::new(),
            },
        )
    }

    /// Returns the machine to its power-on state; the program and debug maps are kept.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.state = PipelineState::new(&self.cpu.pipeline);
        info!("simulator reset");
    }

    /// Advances the machine by one clock.
    ///
    /// # Arguments
    ///
    /// * `verbose` - Emit the per-cycle trace at `info` level.
    /// * `selector` - Breakpoint selector: `""`, `"*"`, or a breakpoint name.
    ///
    /// # Returns
    ///
    /// The clock status. An unknown breakpoint name yields the non-fatal
    /// `SimError::UnknownBreakpoint` and leaves every piece of state unchanged.
    pub fn advance_clock(
        &mut self,
        verbose: bool,
        selector: &str,
    ) -> Result<ClockStatus, SimError> {
        let matcher = self.debug.matcher(selector).inspect_err(|e| warn!("{e}"))?;
        let transition = advance_clock(&self.state, &mut self.cpu, &matcher, verbose)?;
        self.state = transition.next;
        Ok(transition.status)
    }

    /// Clocks until the program drains, a selected breakpoint dispatches, or `max_cycles`
    /// clocks have run in this call.
    pub fn run(
        &mut self,
        max_cycles: Option<u64>,
        verbose: bool,
        selector: &str,
    ) -> Result<RunExit, SimError> {
        let mut cycles = 0;
        loop {
            if max_cycles.is_some_and(|max| cycles >= max) {
                return Ok(RunExit::CycleLimit);
            }
            match self.advance_clock(verbose, selector)? {
                ClockStatus::End => return Ok(RunExit::Ended),
                ClockStatus::Breakpoint(pc) => return Ok(RunExit::Breakpoint(pc)),
                ClockStatus::Continue => cycles += 1,
            }
        }
    }

    /// Integer register `x{idx}`.
    pub fn int_register(&self, idx: usize) -> u32 {
        self.cpu.regs.read_int(idx)
    }

    /// Floating-point register `f{idx}` as its bit pattern.
    pub fn float_register(&self, idx: usize) -> u32 {
        self.cpu.regs.read_float(idx)
    }

    /// Data memory word at byte address `addr`, if aligned and in range.
    pub fn memory_word(&self, addr: u32) -> Option<u32> {
        self.cpu.bus.memory.peek(addr)
    }

    /// Statistics so far.
    pub const fn stats(&self) -> &SimStats {
        &self.cpu.stats
    }

    /// Current pipeline state.
    pub const fn state(&self) -> &PipelineState {
        &self.state
    }

    /// CPU context.
    pub const fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Labels, breakpoints and source lines of the program.
    pub const fn debug_info(&self) -> &DebugInfo {
        &self.debug
    }

    /// External send/receive buffers.
    pub const fn io(&self) -> &IoBuffers {
        &self.cpu.bus.io
    }
}
