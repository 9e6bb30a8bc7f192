//! Execute (EX) Stage.
//!
//! This module advances every execution unit by one clock:
//! 1. **ALUs:** Compute and commit, then empty.
//! 2. **Branch unit:** Resolves, trains the predictor and detects mispredictions.
//! 3. **Memory pipeline:** Shifts; the entry leaving the last stage performs its access.
//! 4. **Multi-cycle FPU:** Counts down; a completed operation computes and commits.
//! 5. **Pipelined FPU:** Shifts; the entry leaving the last stage computes and commits.

use crate::common::SimError;
use crate::core::Cpu;
use crate::core::cpu::execution::Executed;
use crate::core::pipeline::latches::{IssuedInstruction, WritebackRequest};
use crate::core::pipeline::state::{ExecuteStage, MultiCycleFpu};
use crate::core::units::bru::BranchPredictor;

/// Effects of one clock of unit resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Register writes committed, in unit order.
    pub committed: Vec<WritebackRequest>,
    /// Correct fetch address after a mispredicted control transfer.
    pub redirect: Option<u32>,
}

/// Executes the execute stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - CPU context; committed values are written to its register file.
/// * `exec` - The units of the successor state, resolved in place.
///
/// # Returns
///
/// The committed writes and any misprediction redirect, or the fatal error a unit raised.
pub fn execute_stage(cpu: &mut Cpu, exec: &mut ExecuteStage) -> Result<Resolution, SimError> {
    let mut res = Resolution::default();
    let mut commit = |cpu: &mut Cpu, iss: &IssuedInstruction| -> Result<Executed, SimError> {
        let done = cpu.execute(iss)?;
        if let Some(wb) = done.writeback {
            res.committed.push(wb);
        }
        Ok(done)
    };

    for slot in &mut exec.alu {
        if let Some(iss) = slot.take() {
            let _ = commit(cpu, &iss)?;
        }
    }

    let mut redirect = None;
    if let Some(iss) = exec.branch.take() {
        if let Some(outcome) = commit(cpu, &iss)?.branch {
            if iss.inst.kind.is_conditional_branch() {
                cpu.stats.branch_lookups += 1;
                if let Some(prediction) = &iss.prediction {
                    cpu.branch_predictor.update(prediction, outcome.taken);
                }
            }
            if outcome.next_pc != iss.predicted_next {
                cpu.stats.branch_mispredictions += 1;
                redirect = Some(outcome.next_pc);
            }
        }
    }

    if let Some(iss) = exec.memory.advance() {
        let _ = commit(cpu, &iss)?;
    }

    exec.mc_fpu = match exec.mc_fpu {
        MultiCycleFpu::Idle => MultiCycleFpu::Idle,
        MultiCycleFpu::Busy { inst, remaining } if remaining <= 1 => {
            MultiCycleFpu::Completed { inst }
        }
        MultiCycleFpu::Busy { inst, remaining } => MultiCycleFpu::Busy {
            inst,
            remaining: remaining - 1,
        },
        MultiCycleFpu::Completed { inst } => {
            let _ = commit(cpu, &inst)?;
            MultiCycleFpu::Idle
        }
    };

    if let Some(iss) = exec.p_fpu.advance() {
        let _ = commit(cpu, &iss)?;
    }

    res.redirect = redirect;
    Ok(res)
}
