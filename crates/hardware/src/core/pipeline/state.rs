//! Pipeline configuration: the whole machine state at one clock edge.
//!
//! Every stage register is a plain value. The engine clones the current state and
//! builds the successor from it, so a state is never observed half-updated.

use crate::common::SimError;
use crate::common::constants::{ISSUE_WIDTH, NUM_ALUS};
use crate::config::PipelineConfig;
use crate::core::pipeline::hazards::Hazard;
use crate::core::pipeline::latches::{FetchedInstruction, IssuedInstruction, WritebackRequest};

/// A fixed-depth pipeline modeled as a shift register.
///
/// Stage 0 receives dispatched work; the entry in the last stage completes on the
/// next advance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShiftRegister {
    stages: Vec<Option<IssuedInstruction>>,
}

impl ShiftRegister {
    /// Creates an empty shift register with `depth` stages.
    pub fn new(depth: usize) -> Self {
        Self {
            stages: vec![None; depth.max(1)],
        }
    }

    /// Number of stages.
    pub fn depth(&self) -> usize {
        self.stages.len()
    }

    /// Moves every entry one stage forward and returns the one leaving the last stage.
    pub fn advance(&mut self) -> Option<IssuedInstruction> {
        let done = self.stages.pop().flatten();
        self.stages.insert(0, None);
        done
    }

    /// Places a dispatched instruction in stage 0.
    pub fn accept(&mut self, inst: IssuedInstruction) -> Result<(), SimError> {
        match self.stages.first_mut() {
            Some(slot @ None) => {
                *slot = Some(inst);
                Ok(())
            }
            _ => Err(SimError::Internal(format!(
                "pipelined unit stage 0 occupied at dispatch of pc {:#x}",
                inst.pc
            ))),
        }
    }

    /// Occupied stages with their index.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &IssuedInstruction)> {
        self.stages
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|inst| (i, inst)))
    }

    /// Entry at a stage.
    pub fn stage(&self, index: usize) -> Option<&IssuedInstruction> {
        self.stages.get(index).and_then(Option::as_ref)
    }

    /// Whether no stage is occupied.
    pub fn is_empty(&self) -> bool {
        self.stages.iter().all(Option::is_none)
    }

    /// Advances needed before the entry at `index` commits, counting the commit itself.
    pub fn commit_offset(&self, index: usize) -> u32 {
        (self.stages.len() - index) as u32
    }
}

/// Non-pipelined multi-cycle FPU.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MultiCycleFpu {
    /// Ready to accept.
    #[default]
    Idle,
    /// Counting down the operation's latency.
    Busy {
        /// The operation in progress.
        inst: IssuedInstruction,
        /// Cycles left before completion.
        remaining: u32,
    },
    /// Result is computed and written back on the next advance.
    Completed {
        /// The finished operation.
        inst: IssuedInstruction,
    },
}

impl MultiCycleFpu {
    /// State entered when an operation with `latency` busy cycles is accepted.
    pub const fn start(inst: IssuedInstruction, latency: u32) -> Self {
        if latency == 0 {
            Self::Completed { inst }
        } else {
            Self::Busy {
                inst,
                remaining: latency,
            }
        }
    }

    /// Instruction held by the unit, if any.
    pub const fn in_flight(&self) -> Option<&IssuedInstruction> {
        match self {
            Self::Idle => None,
            Self::Busy { inst, .. } | Self::Completed { inst } => Some(inst),
        }
    }

    /// Advances needed before the held instruction commits.
    pub const fn commit_offset(&self) -> Option<u32> {
        match self {
            Self::Idle => None,
            Self::Busy { remaining, .. } => Some(*remaining + 1),
            Self::Completed { .. } => Some(1),
        }
    }

    /// Whether the unit holds nothing.
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Fetch stage register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchStage {
    /// Address of the next instruction to fetch.
    pub pc: u32,
}

/// Decode stage register: the two candidates for dispatch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodeStage {
    /// Candidates, oldest first. An empty slot 0 implies an empty slot 1.
    pub slots: [Option<FetchedInstruction>; ISSUE_WIDTH],
    /// Classification each slot received in the transition that produced this state.
    pub hazards: [Hazard; ISSUE_WIDTH],
}

impl DecodeStage {
    /// Whether both slots are empty.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

/// Execution stage registers, one per unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecuteStage {
    /// The two single-cycle integer ALUs.
    pub alu: [Option<IssuedInstruction>; NUM_ALUS],
    /// Branch unit.
    pub branch: Option<IssuedInstruction>,
    /// Memory-access pipeline.
    pub memory: ShiftRegister,
    /// Divide/sqrt/convert/move unit.
    pub mc_fpu: MultiCycleFpu,
    /// Add/subtract/multiply pipeline.
    pub p_fpu: ShiftRegister,
}

impl ExecuteStage {
    /// Creates idle units with the configured depths.
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            alu: [None; NUM_ALUS],
            branch: None,
            memory: ShiftRegister::new(config.memory_stages),
            mc_fpu: MultiCycleFpu::Idle,
            p_fpu: ShiftRegister::new(config.fpu_stages),
        }
    }

    /// Whether every unit is empty.
    pub fn is_idle(&self) -> bool {
        self.alu.iter().all(Option::is_none)
            && self.branch.is_none()
            && self.memory.is_empty()
            && self.mc_fpu.is_idle()
            && self.p_fpu.is_empty()
    }
}

/// Writeback stage register: writes committed in the last transition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WritebackStage {
    /// Integer-bank writes (at most two).
    pub int: Vec<WritebackRequest>,
    /// Float-bank writes (at most two).
    pub float: Vec<WritebackRequest>,
}

impl WritebackStage {
    /// Every request, integer bank first.
    pub fn requests(&self) -> impl Iterator<Item = &WritebackRequest> {
        self.int.iter().chain(&self.float)
    }
}

/// The machine state at one clock edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineState {
    /// Completed transitions.
    pub cycle: u64,
    /// Fetch stage.
    pub fetch: FetchStage,
    /// Decode slots.
    pub decode: DecodeStage,
    /// Execution units.
    pub execute: ExecuteStage,
    /// Writes committed in the last transition.
    pub writeback: WritebackStage,
}

impl PipelineState {
    /// Power-on state: fetch at address zero, everything else empty.
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            cycle: 0,
            fetch: FetchStage::default(),
            decode: DecodeStage::default(),
            execute: ExecuteStage::new(config),
            writeback: WritebackStage::default(),
        }
    }

    /// Whether no work remains: fetch is past `end_pc` and every stage is empty.
    ///
    /// The writeback record does not count as work.
    pub fn is_drained(&self, end_pc: u32) -> bool {
        self.fetch.pc >= end_pc && self.decode.is_empty() && self.execute.is_idle()
    }
}
