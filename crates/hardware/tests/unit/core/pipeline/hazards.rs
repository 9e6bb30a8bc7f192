//! Hazard Classification Tests.
//!
//! Exercises `classify` directly on hand-built execution stages, checking each
//! hazard class and the priority between them.

use crate::common::builder::asm;
use dualsim_core::config::{LatencyConfig, PipelineConfig};
use dualsim_core::core::pipeline::Hazard;
use dualsim_core::core::pipeline::hazards::{OlderSlot, classify, scheduled_writes};
use dualsim_core::core::pipeline::latches::{FetchedInstruction, IssuedInstruction};
use dualsim_core::core::pipeline::state::{ExecuteStage, MultiCycleFpu};
use dualsim_core::isa::Instruction;

fn fetched(inst: Instruction) -> FetchedInstruction {
    FetchedInstruction::new(0x40, inst, None)
}

fn issued(inst: Instruction) -> IssuedInstruction {
    IssuedInstruction::new(&fetched(inst), 0, 0)
}

fn idle() -> ExecuteStage {
    ExecuteStage::new(&PipelineConfig::default())
}

fn check(candidate: Instruction, older: OlderSlot<'_>, exec: &ExecuteStage) -> Hazard {
    classify(&fetched(candidate), older, exec, &LatencyConfig::default())
}

/// Memory pipeline holding `inst` in its last stage.
fn load_in_last_stage(inst: Instruction) -> ExecuteStage {
    let mut exec = idle();
    exec.memory.accept(issued(inst)).unwrap();
    for _ in 1..exec.memory.depth() {
        assert!(exec.memory.advance().is_none());
    }
    exec
}

// ══════════════════════════════════════════════════════════
// 1. Intra-group
// ══════════════════════════════════════════════════════════

#[test]
fn stalled_older_slot_holds_the_younger() {
    let older = OlderSlot::Stalled;
    assert_eq!(check(asm::addi(1, 0, 1), older, &idle()), Hazard::InOrder);
}

#[test]
fn intra_group_priority() {
    let jal = asm::jal(1, 4);
    assert_eq!(
        check(asm::add(2, 1, 1), OlderSlot::Dispatched(&jal), &idle()),
        Hazard::IntraControl,
        "control outranks the RAW on the link register"
    );
    let addi = asm::addi(1, 0, 1);
    assert_eq!(check(asm::add(2, 1, 0), OlderSlot::Dispatched(&addi), &idle()), Hazard::IntraRaw);
    assert_eq!(check(asm::addi(1, 0, 2), OlderSlot::Dispatched(&addi), &idle()), Hazard::IntraWaw);
    let lw = asm::lw(3, 0, 0);
    assert_eq!(check(asm::sw(4, 0, 8), OlderSlot::Dispatched(&lw), &idle()), Hazard::IntraStructural);
}

#[test]
fn zero_register_carries_no_dependency() {
    let older = asm::addi(0, 0, 1);
    assert_eq!(check(asm::add(1, 0, 0), OlderSlot::Dispatched(&older), &idle()), Hazard::None);
}

// ══════════════════════════════════════════════════════════
// 2. Inter-group
// ══════════════════════════════════════════════════════════

#[test]
fn in_flight_load_blocks_readers_and_writers() {
    let mut exec = idle();
    exec.memory.accept(issued(asm::lw(5, 0, 0))).unwrap();
    assert_eq!(check(asm::add(1, 5, 0), OlderSlot::Absent, &exec), Hazard::LoadRaw);
    assert_eq!(check(asm::addi(5, 0, 1), OlderSlot::Absent, &exec), Hazard::LoadWaw);
    assert_eq!(check(asm::addi(6, 0, 1), OlderSlot::Absent, &exec), Hazard::None);
}

#[test]
fn multi_cycle_fpu_result_and_occupancy() {
    let mut exec = idle();
    exec.mc_fpu = MultiCycleFpu::start(issued(asm::fdiv(1, 2, 3)), 4);
    assert_eq!(check(asm::fadd(4, 1, 2), OlderSlot::Absent, &exec), Hazard::MultiCycleFpuRaw);
    assert_eq!(check(asm::fsqrt(1, 5), OlderSlot::Absent, &exec), Hazard::MultiCycleFpuWaw);
    assert_eq!(check(asm::fsqrt(6, 5), OlderSlot::Absent, &exec), Hazard::MultiCycleFpuBusy);
    assert_eq!(check(asm::fadd(6, 5, 5), OlderSlot::Absent, &exec), Hazard::None);
}

#[test]
fn pipelined_fpu_stages_are_checked() {
    let mut exec = idle();
    exec.p_fpu.accept(issued(asm::fmul(7, 1, 2))).unwrap();
    let _ = exec.p_fpu.advance();
    assert_eq!(check(asm::fsqrt(8, 7), OlderSlot::Absent, &exec), Hazard::PipelinedFpuRaw);
    assert_eq!(check(asm::ftoi(7, 1), OlderSlot::Absent, &exec), Hazard::None, "banks differ");
}

// ══════════════════════════════════════════════════════════
// 3. Write ports and trivial slots
// ══════════════════════════════════════════════════════════

#[test]
fn third_integer_write_in_one_cycle_is_refused() {
    let mut exec = load_in_last_stage(asm::lw(5, 0, 0));
    exec.alu[0] = Some(issued(asm::addi(6, 0, 1)));
    let older = asm::addi(6, 0, 1);
    assert_eq!(scheduled_writes(&exec).iter().filter(|(o, _)| *o == 1).count(), 2);
    assert_eq!(check(asm::addi(7, 0, 1), OlderSlot::Dispatched(&older), &exec), Hazard::WritePort);
    assert_eq!(
        check(asm::itof(7, 0), OlderSlot::Absent, &exec),
        Hazard::None,
        "float ports are separate"
    );
}

#[test]
fn nop_is_trivial() {
    assert_eq!(check(asm::nop(), OlderSlot::Absent, &idle()), Hazard::Trivial);
    assert!(Hazard::Trivial.dispatches());
    assert!(Hazard::WritePort.is_stall());
}
