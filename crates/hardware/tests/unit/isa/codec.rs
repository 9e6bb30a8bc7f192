//! Instruction Codec Properties.
//!
//! Verifies that `decode` and `encode` are inverse to each other for every kind
//! whose fields fit the layout, and that undefined words are rejected with the
//! offending fields.

use dualsim_core::common::DecodeError;
use dualsim_core::isa::instruction::InstructionBits;
use dualsim_core::isa::{InstKind, Instruction, Layout, decode, encode};
use proptest::prelude::*;

/// Generates an in-range instruction of any kind.
fn arb_instruction() -> impl Strategy<Value = Instruction> {
    (
        proptest::sample::select(InstKind::ALL.to_vec()),
        0u8..32,
        0u8..32,
        0u8..32,
        any::<i32>(),
    )
        .prop_map(|(kind, rd, rs1, rs2, raw)| {
            let imm = kind.layout().imm_bits().map_or(0, |bits| {
                let shift = 32 - bits;
                (raw << shift) >> shift
            });
            Instruction::from_fields(kind, rd, rs1, rs2, imm)
        })
}

// ══════════════════════════════════════════════════════════
// 1. Round trips
// ══════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn decode_inverts_encode(inst in arb_instruction()) {
        prop_assert_eq!(decode(encode(&inst)), Ok(inst));
    }

    #[test]
    fn accepted_words_reencode_to_an_equivalent_word(word in any::<u32>()) {
        if let Ok(inst) = decode(word) {
            let again = encode(&inst);
            prop_assert_eq!(decode(again), Ok(inst));
            prop_assert_eq!(again.class(), word.class());
            prop_assert_eq!(again.funct(), word.funct());
        }
    }
}

#[test]
fn every_kind_has_a_distinct_class_funct_pair() {
    let mut seen = std::collections::BTreeSet::new();
    for kind in InstKind::ALL {
        assert!(seen.insert(kind.class_funct()), "{kind:?} shares its encoding");
        assert_eq!(
            InstKind::from_class_funct(kind.class_funct().0, kind.class_funct().1),
            Some(kind)
        );
    }
}

// ══════════════════════════════════════════════════════════
// 2. Field extraction
// ══════════════════════════════════════════════════════════

#[test]
fn reference_addi_word() {
    let inst = decode(0x1000_2028).unwrap();
    assert_eq!(inst, Instruction::from_fields(InstKind::Addi, 1, 0, 0, 5));
}

#[test]
fn immediates_are_sign_extended() {
    let inst = Instruction::from_fields(InstKind::Beq, 0, 1, 2, -1);
    assert_eq!(decode(encode(&inst)).unwrap().imm, Some(-1));

    let jal = Instruction::from_fields(InstKind::Jal, 1, 0, 0, -(1 << 19));
    assert_eq!(decode(encode(&jal)).unwrap().imm, Some(-(1 << 19)));
    assert_eq!(InstKind::Jal.layout(), Layout::JU);
}

#[test]
fn unused_fields_are_dropped() {
    let inst = Instruction::from_fields(InstKind::Add, 1, 2, 3, 99);
    assert_eq!(inst.imm, None, "register-register kinds carry no immediate");
    let nop = Instruction::from_fields(InstKind::Nop, 1, 2, 3, 4);
    assert_eq!(nop, Instruction::NOP);
}

// ══════════════════════════════════════════════════════════
// 3. Rejection
// ══════════════════════════════════════════════════════════

#[test]
fn undefined_class_reports_the_word() {
    assert_eq!(
        decode(0xB123_4567),
        Err(DecodeError::UnknownClass {
            word: 0xB123_4567,
            class: 0xB,
        })
    );
}

#[test]
fn undefined_funct_reports_class_and_funct() {
    let err = decode(0x9000_0007).unwrap_err();
    assert_eq!(
        err,
        DecodeError::UnknownFunct {
            word: 0x9000_0007,
            class: 0x9,
            funct: 7,
        }
    );
    assert!(err.to_string().contains("funct 7"));
}
