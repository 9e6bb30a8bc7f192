//! Simulator Lifecycle Tests.
//!
//! Covers the end-of-program contract, breakpoint selection, reset, cycle limits,
//! fatal errors and the external send/receive buffers.

use crate::common::TestContext;
use crate::common::builder::asm;
use dualsim_core::{ClockStatus, Simulator};
use dualsim_core::common::SimError;
use dualsim_core::config::Config;
use dualsim_core::isa::encode;
use dualsim_core::sim::loader::parse_text;
use dualsim_core::sim::{ANY_BREAKPOINT, RunExit};

/// Three annotated `addi` lines with breakpoints on the second and third.
fn annotated() -> Simulator {
    let line = |inst, note: &str| format!("{:032b}{note}\n", encode(&inst));
    let source = [
        line(asm::addi(1, 0, 1), "@1#entry"),
        line(asm::addi(2, 0, 2), "@2!second"),
        line(asm::addi(3, 0, 3), "@3!third"),
    ]
    .concat();
    Simulator::new(&Config::default(), parse_text(&source).unwrap())
}

// ══════════════════════════════════════════════════════════
// 1. End of program
// ══════════════════════════════════════════════════════════

#[test]
fn end_is_idempotent() {
    let mut tc = TestContext::new().load(&[asm::addi(1, 0, 1)]);
    tc.run_to_end();
    let state = tc.state().clone();
    let cycles = tc.stats().cycles;

    for _ in 0..3 {
        assert_eq!(tc.step(), ClockStatus::End);
    }
    assert_eq!(tc.state(), &state, "End leaves the state untouched");
    assert_eq!(tc.stats().cycles, cycles);
}

#[test]
fn empty_program_ends_on_the_first_clock() {
    let mut tc = TestContext::new();
    assert_eq!(tc.step(), ClockStatus::End);
    assert_eq!(tc.cycles(), 0);
}

#[test]
fn cycle_limit_stops_the_run() {
    let mut tc = TestContext::new().load(&[asm::addi(1, 0, 1); 16]);
    assert_eq!(tc.sim.run(Some(3), false, ""), Ok(RunExit::CycleLimit));
    assert_eq!(tc.cycles(), 3);
    tc.run_to_end();
}

// ══════════════════════════════════════════════════════════
// 2. Breakpoints
// ══════════════════════════════════════════════════════════

#[test]
fn named_breakpoint_stops_when_it_dispatches() {
    let mut sim = annotated();
    assert_eq!(sim.run(None, false, "third"), Ok(RunExit::Breakpoint(8)));
    assert_eq!(sim.run(None, false, "third"), Ok(RunExit::Ended));
    assert_eq!(sim.int_register(3), 3);
}

#[test]
fn any_selector_stops_at_the_first_breakpoint() {
    let mut sim = annotated();
    assert_eq!(sim.run(None, false, ANY_BREAKPOINT), Ok(RunExit::Breakpoint(4)));
    assert_eq!(sim.debug_info().breakpoint_at(4), Some("second"));
    assert_eq!(sim.debug_info().line_of(4), Some(2));
}

#[test]
fn unknown_breakpoint_changes_nothing() {
    let mut sim = annotated();
    let _ = sim.advance_clock(false, "").unwrap();
    let state = sim.state().clone();
    let cycles = sim.stats().cycles;

    let err = sim.advance_clock(false, "nowhere").unwrap_err();
    assert_eq!(err, SimError::UnknownBreakpoint("nowhere".to_owned()));
    assert!(!err.is_fatal());
    assert_eq!(sim.state(), &state);
    assert_eq!(sim.stats().cycles, cycles);
}

// ══════════════════════════════════════════════════════════
// 3. Reset and errors
// ══════════════════════════════════════════════════════════

#[test]
fn reset_restores_power_on_state() {
    let mut sim = annotated();
    let power_on = sim.state().clone();
    assert_eq!(sim.run(None, false, ""), Ok(RunExit::Ended));
    assert_eq!(sim.int_register(2), 2);

    sim.reset();
    assert_eq!(sim.state(), &power_on);
    assert_eq!(sim.int_register(2), 0);
    assert_eq!(sim.stats().cycles, 0);
    assert_eq!(sim.debug_info().label_pc("entry"), Some(0), "debug maps survive reset");
    assert_eq!(sim.run(None, false, ""), Ok(RunExit::Ended));
    assert_eq!(sim.int_register(3), 3);
}

#[test]
fn illegal_word_faults_only_when_it_would_dispatch() {
    let mut tc = TestContext::new().load_words(vec![
        encode(&asm::jal(0, 2)),
        0xA000_0000,
        encode(&asm::addi(1, 0, 9)),
    ]);
    tc.run_to_end();
    assert_eq!(tc.reg(1), 9, "the skipped illegal word never dispatches");

    let mut tc = TestContext::new().load_words(vec![encode(&asm::addi(1, 0, 9)), 0xA000_0000]);
    let err = tc.run().unwrap_err();
    assert!(matches!(err, SimError::IllegalInstruction { pc: 4, .. }), "{err}");
    assert!(err.is_fatal());
}

#[test]
fn misaligned_load_is_fatal() {
    let mut tc = TestContext::new().load(&[asm::lw(1, 0, 2)]);
    assert_eq!(
        tc.run(),
        Err(SimError::DataMisaligned { addr: 2, pc: 0 })
    );
}

// ══════════════════════════════════════════════════════════
// 4. External I/O
// ══════════════════════════════════════════════════════════

#[test]
fn send_and_receive_use_the_shared_buffers() {
    let mut tc = TestContext::new().load(&[
        asm::rready(1),
        asm::recv(2),
        asm::addi(3, 2, 1),
        asm::send(3),
        asm::rready(4),
    ]);
    tc.sim.io().receive.push(41);
    tc.run_to_end();
    assert_eq!(tc.reg(1), 1, "rready sees the pending word");
    assert_eq!(tc.reg(2), 41);
    assert_eq!(tc.reg(4), 0, "buffer drained by recv");
    assert_eq!(tc.sim.io().send.snapshot(), vec![42]);
}

#[test]
fn receive_from_empty_buffer_is_fatal() {
    let mut tc = TestContext::new().load(&[asm::recv(1)]);
    assert_eq!(tc.run(), Err(SimError::ReceiveEmpty { pc: 0 }));
}
