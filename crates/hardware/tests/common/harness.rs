use dualsim_core::Simulator;
use dualsim_core::common::SimError;
use dualsim_core::config::Config;
use dualsim_core::core::pipeline::{ClockStatus, PipelineState};
use dualsim_core::isa::Instruction;
use dualsim_core::sim::{ReferenceModel, RunExit};
use dualsim_core::stats::SimStats;

use crate::common::builder::asm;

/// Clock budget for `run`; every test program drains well inside it.
const MAX_CYCLES: u64 = 100_000;

/// Owns a simulator loaded with a test program.
pub struct TestContext {
    pub config: Config,
    pub sim: Simulator,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
        let sim = Simulator::from_words(&config, Vec::new());
        Self { config, sim }
    }

    /// Replaces the program with `insts`, resetting every piece of state.
    pub fn load(mut self, insts: &[Instruction]) -> Self {
        self.sim = Simulator::from_words(&self.config, asm::program(insts));
        self
    }

    /// Replaces the program with raw words.
    pub fn load_words(mut self, words: Vec<u32>) -> Self {
        self.sim = Simulator::from_words(&self.config, words);
        self
    }

    /// Runs to completion.
    pub fn run(&mut self) -> Result<RunExit, SimError> {
        self.sim.run(Some(MAX_CYCLES), false, "")
    }

    /// Runs to completion and fails the test on any error or timeout.
    pub fn run_to_end(&mut self) {
        let exit = self.run().unwrap();
        assert_eq!(exit, RunExit::Ended, "program should drain within the clock budget");
    }

    /// Advances exactly one clock with no breakpoints selected.
    pub fn step(&mut self) -> ClockStatus {
        self.sim.advance_clock(false, "").unwrap()
    }

    pub fn reg(&self, idx: usize) -> u32 {
        self.sim.int_register(idx)
    }

    pub fn freg(&self, idx: usize) -> f32 {
        f32::from_bits(self.sim.float_register(idx))
    }

    pub fn state(&self) -> &PipelineState {
        self.sim.state()
    }

    pub fn stats(&self) -> &SimStats {
        self.sim.stats()
    }

    pub fn cycles(&self) -> u64 {
        self.sim.state().cycle
    }

    /// Runs the same program on the reference interpreter.
    pub fn reference(&self) -> ReferenceModel {
        let words = self.sim.cpu().bus.program.words().to_vec();
        let mut model = ReferenceModel::new(&self.config, words);
        let _ = model.run(Some(MAX_CYCLES)).unwrap();
        model
    }
}
