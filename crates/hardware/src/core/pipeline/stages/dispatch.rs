//! Dispatch Stage.
//!
//! This module admits decode slots into the execution units. It performs:
//! 1. **Hazard Classification:** Each slot, oldest first, against the units as they stand
//!    after this cycle's resolution with the older slot already placed.
//! 2. **Operand Read:** Source values come from the register file after this cycle's commits.
//! 3. **Routing:** Each slot goes to its owning unit; `nop` retires on the spot.
//! 4. **Decode Redirect:** `jal` and predicted-taken branches redirect fetch and
//!    discard the younger slot.

use crate::common::SimError;
use crate::common::constants::ISSUE_WIDTH;
use crate::core::Cpu;
use crate::core::pipeline::hazards::{self, Hazard, OlderSlot};
use crate::core::pipeline::latches::{FetchedInstruction, IssuedInstruction};
use crate::core::pipeline::state::{DecodeStage, ExecuteStage, MultiCycleFpu};
use crate::isa::ExecUnit;

/// Effects of one dispatch cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Program counters admitted this cycle, oldest first.
    pub dispatched: Vec<u32>,
    /// Fetch target requested by a dispatched jump or predicted-taken branch.
    pub redirect: Option<u32>,
}

/// Executes the dispatch stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - CPU context (register file, latencies, statistics).
/// * `decode` - Decode slots; held-back slots remain, compacted to the front.
/// * `exec` - Execution units receiving dispatched work.
/// * `fetch_exhausted` - Whether fetch is past the end of the program.
///
/// # Returns
///
/// The dispatched pcs and any decode redirect, or `IllegalInstruction` when an
/// undecodable word would dispatch.
pub fn dispatch_stage(
    cpu: &mut Cpu,
    decode: &mut DecodeStage,
    exec: &mut ExecuteStage,
    fetch_exhausted: bool,
) -> Result<DispatchOutcome, SimError> {
    let slots = std::mem::take(&mut decode.slots);
    let empty = if fetch_exhausted {
        Hazard::EndOfProgram
    } else {
        Hazard::None
    };
    let mut hazards = [empty; ISSUE_WIDTH];
    let mut held: Vec<FetchedInstruction> = Vec::with_capacity(ISSUE_WIDTH);
    let mut outcome = DispatchOutcome::default();
    let mut older = OlderSlot::Absent;

    for (i, slot) in slots.iter().enumerate() {
        let Some(fetched) = slot else {
            continue;
        };
        let hazard = hazards::classify(fetched, older, exec, &cpu.latency);
        hazards[i] = hazard;

        if !hazard.dispatches() {
            cpu.stats.record_stall(hazard);
            held.push(*fetched);
            older = OlderSlot::Stalled;
            continue;
        }
        if let Some(source) = fetched.illegal {
            return Err(SimError::IllegalInstruction {
                pc: fetched.pc,
                source,
            });
        }

        place(cpu, exec, fetched)?;
        cpu.stats.instructions_dispatched += 1;
        outcome.dispatched.push(fetched.pc);
        older = OlderSlot::Dispatched(&fetched.inst);

        if let Some(target) = fetched.decode_redirect() {
            outcome.redirect = Some(target);
            break;
        }
    }

    decode.hazards = hazards;
    for (slot, entry) in decode.slots.iter_mut().zip(held) {
        *slot = Some(entry);
    }
    Ok(outcome)
}

/// Routes a dispatched slot to its unit, reading its operands.
fn place(
    cpu: &mut Cpu,
    exec: &mut ExecuteStage,
    fetched: &FetchedInstruction,
) -> Result<(), SimError> {
    let (rv1, rv2) = cpu.read_operands(&fetched.inst);
    let iss = IssuedInstruction::new(fetched, rv1, rv2);
    let occupied = |unit: &str| {
        SimError::Internal(format!("{unit} occupied at dispatch of pc {:#x}", fetched.pc))
    };

    match fetched.inst.unit() {
        ExecUnit::Alu => {
            let slot = exec
                .alu
                .iter_mut()
                .find(|s| s.is_none())
                .ok_or_else(|| occupied("both ALUs"))?;
            *slot = Some(iss);
        }
        ExecUnit::Branch => {
            if exec.branch.is_some() {
                return Err(occupied("branch unit"));
            }
            exec.branch = Some(iss);
        }
        ExecUnit::Memory => exec.memory.accept(iss)?,
        ExecUnit::PipelinedFpu => exec.p_fpu.accept(iss)?,
        ExecUnit::MultiCycleFpu => {
            if !exec.mc_fpu.is_idle() {
                return Err(occupied("multi-cycle FPU"));
            }
            exec.mc_fpu = MultiCycleFpu::start(iss, cpu.latency.cycles(iss.inst.kind));
        }
        ExecUnit::Trivial => cpu.stats.record_executed(iss.inst.kind),
    }
    Ok(())
}
