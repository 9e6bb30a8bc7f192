//! Differential Tests Against the Reference Interpreter.
//!
//! The reference interpreter executes one instruction per step with no hazards, so
//! any architectural difference after a pipelined run means a hazard was missed or a
//! result committed out of order. Random programs use a small register window to
//! force dependencies, word-aligned addresses in a small memory window, and
//! forward-only control flow so every program terminates.

use crate::common::TestContext;
use crate::common::builder::{InstructionBuilder, asm};
use dualsim_core::config::{BranchPredictor, Config};
use dualsim_core::isa::{InstKind, Instruction};
use proptest::prelude::*;

/// Registers 0..REGS are used, so producers and consumers collide often.
const REGS: u8 = 6;

fn reg() -> impl Strategy<Value = u8> {
    0..REGS
}

fn arb_inst() -> impl Strategy<Value = Instruction> {
    let rrr = (
        proptest::sample::select(vec![
            InstKind::Add,
            InstKind::Sub,
            InstKind::Xor,
            InstKind::Sll,
            InstKind::Sra,
            InstKind::Fadd,
            InstKind::Fsub,
            InstKind::Fmul,
            InstKind::Fdiv,
        ]),
        reg(),
        reg(),
        reg(),
    )
        .prop_map(|(k, d, a, b)| InstructionBuilder::new(k).rd(d).rs1(a).rs2(b).build());
    let unary = (
        proptest::sample::select(vec![
            InstKind::Fsqrt,
            InstKind::Fneg,
            InstKind::Fabs,
            InstKind::Itof,
            InstKind::Ftoi,
            InstKind::Fmvif,
            InstKind::Fmvfi,
        ]),
        reg(),
        reg(),
    )
        .prop_map(|(k, d, a)| InstructionBuilder::new(k).rd(d).rs1(a).build());
    let imm = (
        proptest::sample::select(vec![InstKind::Addi, InstKind::Xori, InstKind::Slli]),
        reg(),
        reg(),
        -64i32..64,
    )
        .prop_map(|(k, d, a, i)| InstructionBuilder::new(k).rd(d).rs1(a).imm(i).build());
    let mem = (0u8..4, reg(), 0i32..32).prop_map(|(op, r, slot)| match op {
        0 => asm::lw(r, 0, slot * 4),
        1 => asm::sw(r, 0, slot * 4),
        2 => asm::flw(r, 0, slot * 4),
        _ => asm::fsw(r, 0, slot * 4),
    });
    let branch = (0u8..4, reg(), reg(), 1i32..4).prop_map(|(op, a, b, off)| match op {
        0 => asm::beq(a, b, off),
        1 => asm::bne(a, b, off),
        2 => asm::blt(a, b, off),
        _ => asm::jal(a, off),
    });
    prop_oneof![
        4 => rrr,
        2 => unary,
        3 => imm,
        2 => mem,
        1 => branch,
        1 => Just(asm::nop()),
        1 => (reg(), -200i32..200).prop_map(|(d, i)| asm::lui(d, i)),
    ]
}

/// Runs `program` on both models and compares every architectural bank.
fn assert_equivalent(config: Config, program: &[Instruction]) -> Result<(), TestCaseError> {
    let mut tc = TestContext::with_config(config).load(program);
    let reference = tc.reference();
    tc.run_to_end();

    let cpu = tc.sim.cpu();
    prop_assert_eq!(cpu.regs.int_bank(), reference.cpu.regs.int_bank());
    prop_assert_eq!(cpu.regs.float_bank(), reference.cpu.regs.float_bank());
    for addr in (0..128).step_by(4) {
        prop_assert_eq!(
            cpu.bus.memory.peek(addr),
            reference.cpu.bus.memory.peek(addr),
            "memory word {:#x}",
            addr
        );
    }
    prop_assert_eq!(
        tc.stats().total_executed(),
        reference.cpu.stats.total_executed(),
        "both models commit the same dynamic instruction count"
    );
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn pipeline_matches_reference(program in proptest::collection::vec(arb_inst(), 1..40)) {
        assert_equivalent(Config::default(), &program)?;
    }

    #[test]
    fn pipeline_matches_reference_with_static_prediction_and_slow_units(
        program in proptest::collection::vec(arb_inst(), 1..40),
        fdiv in 1u32..8,
    ) {
        let mut config = Config::default();
        config.pipeline.branch_predictor = BranchPredictor::Static;
        config.pipeline.memory_stages = 5;
        config.pipeline.fpu_stages = 2;
        config.latency.fdiv = fdiv;
        config.latency.convert = 2;
        assert_equivalent(config, &program)?;
    }
}

#[test]
fn countdown_loop_matches_reference() {
    let program = [
        asm::addi(1, 0, 12),
        asm::addi(2, 0, 0),
        asm::add(2, 2, 1),
        asm::addi(1, 1, -1),
        asm::bne(1, 0, -2),
        asm::sw(2, 0, 16),
    ];
    assert_equivalent(Config::default(), &program).unwrap();
    let mut tc = TestContext::new().load(&program);
    tc.run_to_end();
    assert_eq!(tc.sim.memory_word(16), Some(78));
}
