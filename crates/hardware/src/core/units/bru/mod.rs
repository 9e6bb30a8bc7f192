//! Branch resolution unit (BRU) and direction predictors.
//!
//! This module contains the direction predictors consulted at fetch (static and
//! gshare, behind the [`BranchPredictor`] trait) and the resolution logic the branch
//! unit runs one cycle after dispatch.

pub use self::branch_predictor::{BranchPredictor, Prediction};

/// Branch predictor trait and prediction snapshot.
pub mod branch_predictor;

/// Global history branch predictor (gshare algorithm).
pub mod gshare;

/// Static branch predictor (always not-taken).
pub mod static_bp;

use self::{gshare::GSharePredictor, static_bp::StaticPredictor};
use crate::common::SimError;
use crate::common::constants::INSTRUCTION_BYTES;
use crate::config::{BranchPredictor as BpType, PipelineConfig};
use crate::core::units::fpu::Fpu;
use crate::isa::{InstKind, Instruction};

/// Enum wrapper for static dispatch of Branch Predictors.
/// This avoids vtable lookups in the fetch path.
#[derive(Clone, Debug)]
pub enum BranchPredictorWrapper {
    /// Always not-taken.
    Static(StaticPredictor),
    /// Global history XOR pc.
    GShare(GSharePredictor),
}

impl BranchPredictorWrapper {
    /// Creates a new branch predictor wrapper based on configuration.
    pub fn new(config: &PipelineConfig) -> Self {
        match config.branch_predictor {
            BpType::Static => Self::Static(StaticPredictor),
            BpType::GShare => Self::GShare(GSharePredictor::new(
                config.history_bits,
                config.initial_counter,
            )),
        }
    }
}

impl BranchPredictor for BranchPredictorWrapper {
    #[inline(always)]
    fn predict(&self, pc: u32) -> Prediction {
        match self {
            Self::Static(bp) => bp.predict(pc),
            Self::GShare(bp) => bp.predict(pc),
        }
    }

    #[inline(always)]
    fn update(&mut self, prediction: &Prediction, taken: bool) {
        match self {
            Self::Static(bp) => bp.update(prediction, taken),
            Self::GShare(bp) => bp.update(prediction, taken),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Static(bp) => bp.reset(),
            Self::GShare(bp) => bp.reset(),
        }
    }
}

/// Resolved behavior of a control-flow instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BranchOutcome {
    /// Whether control left the sequential path.
    pub taken: bool,
    /// Address of the next instruction to execute.
    pub next_pc: u32,
    /// Link value for `jal`/`jalr`.
    pub link: Option<u32>,
}

/// Target of a pc-relative branch or jump.
pub const fn relative_target(pc: u32, imm: i32) -> u32 {
    pc.wrapping_add((imm as u32).wrapping_mul(INSTRUCTION_BYTES))
}

/// Resolves a branch or jump.
///
/// # Arguments
///
/// * `inst` - A control-flow instruction.
/// * `pc` - Its address.
/// * `rv1`, `rv2` - Source operand values read at dispatch.
///
/// # Returns
///
/// The outcome, or `SimError::Internal` when `inst` is not control flow.
pub fn resolve(inst: &Instruction, pc: u32, rv1: u32, rv2: u32) -> Result<BranchOutcome, SimError> {
    let imm = inst.imm_or_zero();
    let fallthrough = pc.wrapping_add(INSTRUCTION_BYTES);
    let cond = |taken: bool| BranchOutcome {
        taken,
        next_pc: if taken {
            relative_target(pc, imm)
        } else {
            fallthrough
        },
        link: None,
    };

    let outcome = match inst.kind {
        InstKind::Beq => cond(rv1 == rv2),
        InstKind::Bne => cond(rv1 != rv2),
        InstKind::Blt => cond((rv1 as i32) < (rv2 as i32)),
        InstKind::Bge => cond((rv1 as i32) >= (rv2 as i32)),
        InstKind::Fbeq | InstKind::Fblt => {
            let taken = Fpu::compare(inst.kind, rv1, rv2).unwrap_or(false);
            cond(taken)
        }
        InstKind::Jal => BranchOutcome {
            taken: true,
            next_pc: relative_target(pc, imm),
            link: Some(fallthrough),
        },
        InstKind::Jalr => BranchOutcome {
            taken: true,
            next_pc: relative_target(rv1, imm),
            link: Some(fallthrough),
        },
        other => {
            return Err(SimError::Internal(format!(
                "branch unit handed `{}`",
                other.mnemonic()
            )));
        }
    };
    Ok(outcome)
}
