//! Clock transition engine.
//!
//! `advance_clock` computes the successor of a pipeline state. The input state is
//! never mutated: the engine clones it and runs the stages against the clone in this
//! order:
//! 1. **Execute:** Units resolve and commit to the register file.
//! 2. **Writeback:** The commits are recorded, bounded by the write ports.
//! 3. **Dispatch:** Skipped entirely after a branch misprediction, which flushes decode.
//! 4. **Fetch:** Empty decode slots are refilled from the (possibly redirected) fetch pc.
//!
//! Architectural state (registers, memory, buffers, predictor, statistics) lives in the
//! [`Cpu`] context passed alongside.

use std::fmt::Write as _;

use tracing::{Level, info, trace};

use crate::common::SimError;
use crate::core::Cpu;
use crate::core::pipeline::state::{DecodeStage, MultiCycleFpu, PipelineState};
use crate::core::pipeline::stages::{dispatch_stage, execute_stage, fetch_stage, writeback_stage};
use crate::core::pipeline::traits::BreakpointMatcher;

/// Result of one clock transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockStatus {
    /// The machine still has work.
    Continue,
    /// The program is drained and fetch is past its end.
    End,
    /// An instruction at this pc, accepted by the breakpoint matcher, dispatched.
    Breakpoint(u32),
}

/// A successor state and the status of the transition that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// State after the clock edge.
    pub next: PipelineState,
    /// What happened.
    pub status: ClockStatus,
}

/// Advances the machine by one clock.
///
/// # Arguments
///
/// * `state` - Current configuration; left untouched.
/// * `cpu` - Architectural context; register writes, memory accesses and counters land here.
/// * `breakpoints` - Decides which dispatched pcs stop the clock.
/// * `verbose` - Emit the per-cycle trace at `info` level.
///
/// # Returns
///
/// The successor state and status, or the fatal error raised during the transition.
/// A drained state yields `ClockStatus::End` with an identical successor and no
/// change to `cpu`.
pub fn advance_clock(
    state: &PipelineState,
    cpu: &mut Cpu,
    breakpoints: &dyn BreakpointMatcher,
    verbose: bool,
) -> Result<Transition, SimError> {
    let end_pc = cpu.end_pc();
    if state.is_drained(end_pc) {
        return Ok(Transition {
            next: state.clone(),
            status: ClockStatus::End,
        });
    }

    let mut next = state.clone();
    next.cycle += 1;
    cpu.stats.cycles += 1;

    let resolution = execute_stage(cpu, &mut next.execute)?;
    next.writeback = writeback_stage(resolution.committed)?;

    let mut dispatched = Vec::new();
    if let Some(target) = resolution.redirect {
        next.decode = DecodeStage::default();
        next.fetch.pc = target;
    } else {
        let exhausted = next.fetch.pc >= end_pc;
        let outcome = dispatch_stage(cpu, &mut next.decode, &mut next.execute, exhausted)?;
        if let Some(target) = outcome.redirect {
            next.fetch.pc = target;
        }
        dispatched = outcome.dispatched;
    }

    let _ = fetch_stage(cpu, &mut next.fetch, &mut next.decode)?;

    let status = dispatched
        .iter()
        .copied()
        .find(|&pc| breakpoints.is_breakpoint(pc))
        .map_or(ClockStatus::Continue, ClockStatus::Breakpoint);

    if verbose || cpu.trace || cfg!(feature = "always-trace") {
        info!(target: "dualsim::pipeline", "{}", render_cycle(&next, resolution.redirect));
    } else if tracing::enabled!(Level::TRACE) {
        trace!(target: "dualsim::pipeline", "{}", render_cycle(&next, resolution.redirect));
    }

    Ok(Transition { next, status })
}

/// Formats the per-cycle trace line.
fn render_cycle(state: &PipelineState, flushed: Option<u32>) -> String {
    let mut out = String::new();
    let _ = write!(out, "cycle {} | fetch {:#x}", state.cycle, state.fetch.pc);
    if let Some(target) = flushed {
        let _ = write!(out, " (flush -> {target:#x})");
    }
    for (slot, hazard) in state.decode.slots.iter().zip(state.decode.hazards) {
        match slot {
            Some(f) => {
                let _ = write!(out, " | dec {:#x} {} [{hazard:?}]", f.pc, f.inst);
            }
            None => {
                let _ = write!(out, " | dec - [{hazard:?}]");
            }
        }
    }
    let exec = &state.execute;
    for iss in exec.alu.iter().flatten().chain(exec.branch.iter()) {
        let _ = write!(out, " | ex {:#x} {}", iss.pc, iss.inst);
    }
    for (stage, iss) in exec.memory.entries() {
        let _ = write!(out, " | mem{stage} {}", iss.inst);
    }
    match exec.mc_fpu {
        MultiCycleFpu::Idle => {}
        MultiCycleFpu::Busy { inst, remaining } => {
            let _ = write!(out, " | mcfpu busy({remaining}) {}", inst.inst);
        }
        MultiCycleFpu::Completed { inst } => {
            let _ = write!(out, " | mcfpu done {}", inst.inst);
        }
    }
    for (stage, iss) in exec.p_fpu.entries() {
        let _ = write!(out, " | pfpu{stage} {}", iss.inst);
    }
    for wb in state.writeback.requests() {
        let _ = write!(out, " | wb {}={:#x}", wb.reg, wb.value);
    }
    out
}
