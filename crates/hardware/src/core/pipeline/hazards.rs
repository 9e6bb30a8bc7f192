//! Dispatch hazard detection.
//!
//! This module classifies why a decode slot cannot dispatch this cycle. It provides:
//! 1. **Intra-group checks:** Dependencies between the two instructions fetched together.
//! 2. **Inter-group checks:** Dependencies on results still in flight in the memory
//!    pipeline and the two FPU units.
//! 3. **Write-port accounting:** At most two integer and two float results commit per cycle.
//!
//! Every check is a pure function of the execution stage as it stands after this cycle's
//! unit resolution, with the older slot already placed if it dispatched.

use serde::Serialize;

use crate::common::constants::{FLOAT_WRITE_PORTS, INT_WRITE_PORTS};
use crate::common::{RegClass, RegId};
use crate::config::LatencyConfig;
use crate::core::pipeline::latches::FetchedInstruction;
use crate::core::pipeline::state::ExecuteStage;
use crate::isa::{ExecUnit, Instruction};

/// Classification of a decode slot for one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Hazard {
    /// Dispatches to an execution unit.
    #[default]
    None,
    /// `nop`: dispatches without occupying a unit.
    Trivial,
    /// Empty slot with fetch past the end of the program.
    EndOfProgram,
    /// Reads the destination of the older slot.
    IntraRaw,
    /// Writes the destination of the older slot.
    IntraWaw,
    /// The older slot is a branch or jump.
    IntraControl,
    /// Both slots need the same single-entry unit.
    IntraStructural,
    /// Reads a register an in-flight memory instruction will write.
    LoadRaw,
    /// Writes a register an in-flight memory instruction will write.
    LoadWaw,
    /// Reads the pending multi-cycle FPU result.
    MultiCycleFpuRaw,
    /// Writes the register the multi-cycle FPU will write.
    MultiCycleFpuWaw,
    /// Reads a register a pipelined FPU stage will write.
    PipelinedFpuRaw,
    /// Writes a register a pipelined FPU stage will write.
    PipelinedFpuWaw,
    /// The multi-cycle FPU is occupied.
    MultiCycleFpuBusy,
    /// Commit would exceed the writeback ports of its register class.
    WritePort,
    /// The older slot did not dispatch.
    InOrder,
}

impl Hazard {
    /// Whether the slot dispatches (possibly as a trivial retire).
    pub const fn dispatches(self) -> bool {
        matches!(self, Self::None | Self::Trivial)
    }

    /// Whether the slot holds an instruction that was held back.
    pub const fn is_stall(self) -> bool {
        !matches!(self, Self::None | Self::Trivial | Self::EndOfProgram)
    }
}

/// What the older decode slot did this cycle, as seen by the younger one.
#[derive(Clone, Copy, Debug)]
pub enum OlderSlot<'a> {
    /// The candidate is the oldest slot.
    Absent,
    /// The older slot was held back.
    Stalled,
    /// The older slot dispatched this instruction.
    Dispatched(&'a Instruction),
}

/// Classifies one decode slot.
///
/// # Arguments
///
/// * `candidate` - The slot being considered.
/// * `older` - Outcome of the older slot this cycle.
/// * `exec` - Execution stage after resolution, with the older slot placed.
/// * `latency` - Multi-cycle FPU latencies, for the write-port offset of the candidate.
///
/// # Returns
///
/// The first hazard found, in priority order, or `Hazard::None` / `Hazard::Trivial`.
pub fn classify(
    candidate: &FetchedInstruction,
    older: OlderSlot<'_>,
    exec: &ExecuteStage,
    latency: &LatencyConfig,
) -> Hazard {
    let inst = &candidate.inst;
    match older {
        OlderSlot::Stalled => return Hazard::InOrder,
        OlderSlot::Dispatched(prev) => {
            if let Some(hazard) = intra_group(prev, inst) {
                return hazard;
            }
        }
        OlderSlot::Absent => {}
    }
    if let Some(hazard) = inter_group(inst, exec) {
        return hazard;
    }
    if inst.unit() == ExecUnit::MultiCycleFpu && !exec.mc_fpu.is_idle() {
        return Hazard::MultiCycleFpuBusy;
    }
    if write_port_conflict(inst, exec, latency) {
        return Hazard::WritePort;
    }
    if inst.unit() == ExecUnit::Trivial {
        return Hazard::Trivial;
    }
    Hazard::None
}

/// Checks the younger instruction against the older one of the same fetch group.
pub fn intra_group(older: &Instruction, younger: &Instruction) -> Option<Hazard> {
    if older.is_control_flow() {
        return Some(Hazard::IntraControl);
    }
    if let Some(dest) = older.dest() {
        if younger.reads(dest) {
            return Some(Hazard::IntraRaw);
        }
        if younger.dest() == Some(dest) {
            return Some(Hazard::IntraWaw);
        }
    }
    let unit = older.unit();
    let single_entry = matches!(
        unit,
        ExecUnit::Memory | ExecUnit::MultiCycleFpu | ExecUnit::PipelinedFpu
    );
    (single_entry && unit == younger.unit()).then_some(Hazard::IntraStructural)
}

/// Checks an instruction against results not yet committed.
pub fn inter_group(inst: &Instruction, exec: &ExecuteStage) -> Option<Hazard> {
    let conflict = |producer: &Instruction, raw: Hazard, waw: Hazard| {
        let dest = producer.dest()?;
        if inst.reads(dest) {
            Some(raw)
        } else if inst.dest() == Some(dest) {
            Some(waw)
        } else {
            None
        }
    };

    exec.memory
        .entries()
        .find_map(|(_, e)| conflict(&e.inst, Hazard::LoadRaw, Hazard::LoadWaw))
        .or_else(|| {
            exec.mc_fpu.in_flight().and_then(|e| {
                conflict(&e.inst, Hazard::MultiCycleFpuRaw, Hazard::MultiCycleFpuWaw)
            })
        })
        .or_else(|| {
            exec.p_fpu.entries().find_map(|(_, e)| {
                conflict(&e.inst, Hazard::PipelinedFpuRaw, Hazard::PipelinedFpuWaw)
            })
        })
}

/// Transitions from now until an instruction dispatched this cycle commits.
pub fn commit_offset(inst: &Instruction, exec: &ExecuteStage, latency: &LatencyConfig) -> u32 {
    match inst.unit() {
        ExecUnit::Memory => exec.memory.depth() as u32,
        ExecUnit::PipelinedFpu => exec.p_fpu.depth() as u32,
        ExecUnit::MultiCycleFpu => latency.cycles(inst.kind) + 1,
        ExecUnit::Alu | ExecUnit::Branch | ExecUnit::Trivial => 1,
    }
}

/// Register writes already scheduled, as `(offset, destination)` pairs.
pub fn scheduled_writes(exec: &ExecuteStage) -> Vec<(u32, RegId)> {
    let mut writes = Vec::new();
    for inst in exec.alu.iter().flatten().chain(exec.branch.iter()) {
        if let Some(dest) = inst.dest() {
            writes.push((1, dest));
        }
    }
    for unit in [&exec.memory, &exec.p_fpu] {
        for (stage, inst) in unit.entries() {
            if let Some(dest) = inst.dest() {
                writes.push((unit.commit_offset(stage), dest));
            }
        }
    }
    if let (Some(inst), Some(offset)) = (exec.mc_fpu.in_flight(), exec.mc_fpu.commit_offset()) {
        if let Some(dest) = inst.dest() {
            writes.push((offset, dest));
        }
    }
    writes
}

/// Whether committing `inst` would exceed the write ports of its register class.
pub fn write_port_conflict(inst: &Instruction, exec: &ExecuteStage, latency: &LatencyConfig) -> bool {
    let Some(dest) = inst.dest() else {
        return false;
    };
    let offset = commit_offset(inst, exec, latency);
    let landing = scheduled_writes(exec)
        .into_iter()
        .filter(|&(o, reg)| o == offset && reg.class == dest.class)
        .count();
    landing >= write_ports(dest.class)
}

/// Writeback capacity of a register class.
pub const fn write_ports(class: RegClass) -> usize {
    match class {
        RegClass::Int => INT_WRITE_PORTS,
        RegClass::Float => FLOAT_WRITE_PORTS,
    }
}
