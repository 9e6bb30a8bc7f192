//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, the explicit simulator context every
//! pipeline operation receives. It holds:
//! 1. **Architectural State:** The integer and floating-point register banks.
//! 2. **System Integration:** Program, data memory and the external I/O buffers.
//! 3. **Speculation:** The direction predictor consulted at fetch.
//! 4. **Observability:** The statistics-only data cache, counters and the trace flag.
//!
//! Timing state (stage registers, unit occupancy) is not here; it lives in
//! [`crate::core::pipeline::state::PipelineState`].

/// Unit semantics shared by the pipeline and the reference interpreter.
pub mod execution;

use crate::common::RegisterFile;
use crate::config::{Config, LatencyConfig, PipelineConfig};
use crate::core::units::bru::{BranchPredictor, BranchPredictorWrapper};
use crate::core::units::cache::CacheSim;
use crate::soc::System;
use crate::stats::SimStats;

/// Main CPU structure containing all processor state and components.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// General Purpose and Floating Point Registers.
    pub regs: RegisterFile,
    /// Program, data memory and I/O buffers.
    pub bus: System,
    /// Branch Predictor Unit.
    pub branch_predictor: BranchPredictorWrapper,
    /// Statistics-only L1 data cache.
    pub dcache: CacheSim,
    /// Performance statistics.
    pub stats: SimStats,
    /// Stage depths, used to size a fresh pipeline state.
    pub pipeline: PipelineConfig,
    /// Multi-cycle FPU latencies.
    pub latency: LatencyConfig,
    /// Enable per-cycle tracing at `info` level.
    pub trace: bool,
}

impl Cpu {
    /// Creates a new CPU instance with the specified system and configuration.
    ///
    /// # Arguments
    ///
    /// * `system` - Program, memory and buffers.
    /// * `config` - The simulator configuration parameters.
    pub fn new(system: System, config: &Config) -> Self {
        Self {
            regs: RegisterFile::new(),
            bus: system,
            branch_predictor: BranchPredictorWrapper::new(&config.pipeline),
            dcache: CacheSim::new(&config.cache),
            stats: SimStats::default(),
            pipeline: config.pipeline.clone(),
            latency: config.latency.clone(),
            trace: config.general.trace,
        }
    }

    /// Returns every component to its power-on state. The program is kept.
    pub fn reset(&mut self) {
        self.regs = RegisterFile::new();
        self.bus.reset();
        self.branch_predictor.reset();
        self.dcache.flush();
        self.stats = SimStats::default();
    }

    /// Address one past the last instruction.
    pub fn end_pc(&self) -> u32 {
        self.bus.program.end_pc()
    }
}
