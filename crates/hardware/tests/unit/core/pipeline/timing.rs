//! Unit Commit Timing Tests.
//!
//! Verifies when results become architecturally visible: single-cycle units one
//! transition after dispatch, the shift-register units after their depth, and the
//! multi-cycle FPU after its configured busy cycles plus one.

use crate::common::TestContext;
use crate::common::builder::asm;
use dualsim_core::common::RegId;
use dualsim_core::config::Config;
use dualsim_core::core::pipeline::Hazard;
use dualsim_core::isa::InstKind;

/// Steps until `pred` holds, returning the cycle it first held at.
fn step_until(tc: &mut TestContext, pred: impl Fn(&TestContext) -> bool) -> u64 {
    for _ in 0..64 {
        let _ = tc.step();
        if pred(tc) {
            return tc.cycles();
        }
    }
    panic!("condition never held within 64 cycles");
}

fn wrote(tc: &TestContext, reg: RegId) -> bool {
    tc.state().writeback.requests().any(|w| w.reg == reg)
}

// ══════════════════════════════════════════════════════════
// 1. Single-cycle units
// ══════════════════════════════════════════════════════════

#[test]
fn dependent_add_sees_committed_addi() {
    let mut tc = TestContext::new().load(&[asm::addi(1, 0, 5), asm::add(2, 1, 1)]);

    let _ = tc.step();
    assert_eq!(tc.cycles(), 1);
    assert!(tc.state().decode.slots.iter().all(Option::is_some), "first clock fetches both");

    let _ = tc.step();
    assert_eq!(
        tc.state().decode.hazards,
        [Hazard::None, Hazard::IntraRaw],
        "add reads the addi destination in the same group"
    );

    tc.run_to_end();
    assert_eq!(tc.reg(1), 5);
    assert_eq!(tc.reg(2), 10);
    assert_eq!(tc.stats().stall_count(Hazard::IntraRaw), 1);
}

#[test]
fn independent_pair_commits_together() {
    let mut tc = TestContext::new().load(&[asm::addi(1, 0, 1), asm::addi(2, 0, 2)]);
    let cycle = step_until(&mut tc, |tc| wrote(tc, RegId::int(1)));
    assert!(wrote(&tc, RegId::int(2)), "both ALUs commit in cycle {cycle}");
    assert_eq!(tc.state().writeback.int.len(), 2);
}

// ══════════════════════════════════════════════════════════
// 2. Multi-cycle FPU
// ══════════════════════════════════════════════════════════

#[test]
fn fdiv_commits_after_latency_plus_one() {
    let mut tc = TestContext::new().load(&[
        asm::addi(1, 0, 6),
        asm::addi(2, 0, 3),
        asm::itof(2, 1),
        asm::itof(3, 2),
        asm::fdiv(1, 2, 3),
    ]);
    let latency = u64::from(tc.config.latency.fdiv);

    let dispatched = step_until(&mut tc, |tc| {
        tc.state()
            .execute
            .mc_fpu
            .in_flight()
            .is_some_and(|i| i.inst.kind == InstKind::Fdiv)
    });
    let committed = step_until(&mut tc, |tc| wrote(tc, RegId::float(1)));
    assert_eq!(committed, dispatched + latency + 1);

    tc.run_to_end();
    assert_eq!(tc.freg(1), 2.0);
}

#[test]
fn busy_unit_holds_the_next_multi_cycle_op() {
    let mut tc = TestContext::new().load(&[asm::fdiv(1, 2, 3), asm::nop(), asm::fsqrt(4, 5)]);
    tc.run_to_end();
    assert!(tc.stats().stall_count(Hazard::MultiCycleFpuBusy) > 0);
}

#[test]
fn latency_is_configurable() {
    let mut config = Config::default();
    config.latency.fdiv = 9;
    let mut tc = TestContext::with_config(config).load(&[asm::fdiv(1, 2, 3)]);
    let dispatched = step_until(&mut tc, |tc| !tc.state().execute.mc_fpu.is_idle());
    let committed = step_until(&mut tc, |tc| wrote(tc, RegId::float(1)));
    assert_eq!(committed - dispatched, 10);
}

// ══════════════════════════════════════════════════════════
// 3. Shift-register units
// ══════════════════════════════════════════════════════════

#[test]
fn pipelined_fpu_commits_after_its_depth() {
    let mut tc = TestContext::new().load(&[asm::fadd(1, 2, 3)]);
    let depth = tc.config.pipeline.fpu_stages as u64;
    let dispatched = step_until(&mut tc, |tc| !tc.state().execute.p_fpu.is_empty());
    let committed = step_until(&mut tc, |tc| wrote(tc, RegId::float(1)));
    assert_eq!(committed, dispatched + depth);
}

#[test]
fn store_then_load_round_trips_through_memory() {
    let mut tc = TestContext::new().load(&[
        asm::addi(1, 0, 42),
        asm::addi(2, 0, 64),
        asm::sw(1, 2, 4),
        asm::lw(3, 2, 4),
        asm::add(4, 3, 3),
    ]);
    tc.run_to_end();
    assert_eq!(tc.sim.memory_word(68), Some(42));
    assert_eq!(tc.reg(3), 42);
    assert_eq!(tc.reg(4), 84, "add waits for the loaded value");
    assert!(tc.stats().stall_count(Hazard::LoadRaw) > 0);
}
