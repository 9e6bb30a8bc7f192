//! Instruction Decoder.
//!
//! Decodes 32-bit words into [`Instruction`] descriptors. The opcode class and funct
//! code select the kind; the kind's layout then says where the immediate lives:
//!
//! * `I`: `class | rs1 | imm[14:10] | rd | imm[9:0] | funct`
//! * `BS`: `class | rs1 | rs2 | imm[14:0] | funct`
//! * `JU`: `class | imm[19:10] | rd | imm[9:0] | funct`
//!
//! Every immediate is sign-extended from its top bit.

use crate::common::error::DecodeError;
use crate::isa::instruction::{InstKind, Instruction, InstructionBits, Layout};
use crate::isa::opcodes::class;

/// Total width of an instruction in bits.
const INSTRUCTION_WIDTH: u32 = 32;

/// Bit shift of the low ten immediate bits shared by the I and JU layouts (bits 3-12).
const IMM_LOW_SHIFT: u32 = 3;

/// Bit mask for the low ten immediate bits.
const IMM_LOW_MASK: u32 = 0x3FF;

/// Number of immediate bits held in the low field.
const IMM_LOW_BITS: u32 = 10;

/// Bit shift of I-layout imm[14:10] (bits 18-22).
const I_IMM_HIGH_SHIFT: u32 = 18;

/// Bit mask for I-layout imm[14:10] (5 bits).
const I_IMM_HIGH_MASK: u32 = 0x1F;

/// Bit mask for the contiguous BS-layout immediate (15 bits).
const BS_IMM_MASK: u32 = 0x7FFF;

/// Bit shift of JU-layout imm[19:10] (bits 18-27).
const JU_IMM_HIGH_SHIFT: u32 = 18;

/// Bit mask for JU-layout imm[19:10] (10 bits).
const JU_IMM_HIGH_MASK: u32 = 0x3FF;

/// Opcode classes with at least one assigned funct code.
const DEFINED_CLASSES: [u32; 11] = [
    class::ALU,
    class::ALUI,
    class::FALU,
    class::BRANCH,
    class::JAL,
    class::JALR,
    class::STORE,
    class::LOAD,
    class::LUI,
    class::CONV,
    class::SYS,
];

/// Sign-extends the low `bits` bits of `value`.
#[inline(always)]
pub const fn sign_extend(value: u32, bits: u32) -> i32 {
    let shift = INSTRUCTION_WIDTH - bits;
    ((value << shift) as i32) >> shift
}

/// Extracts the split 15-bit immediate used by ALU-immediate, `jalr` and load kinds.
#[inline(always)]
pub const fn i_imm(word: u32) -> i32 {
    let high = (word >> I_IMM_HIGH_SHIFT) & I_IMM_HIGH_MASK;
    let low = (word >> IMM_LOW_SHIFT) & IMM_LOW_MASK;
    sign_extend((high << IMM_LOW_BITS) | low, 15)
}

/// Extracts the contiguous 15-bit immediate used by branch and store kinds.
#[inline(always)]
pub const fn bs_imm(word: u32) -> i32 {
    sign_extend((word >> IMM_LOW_SHIFT) & BS_IMM_MASK, 15)
}

/// Extracts the 20-bit immediate used by `jal` and `lui`.
#[inline(always)]
pub const fn ju_imm(word: u32) -> i32 {
    let high = (word >> JU_IMM_HIGH_SHIFT) & JU_IMM_HIGH_MASK;
    let low = (word >> IMM_LOW_SHIFT) & IMM_LOW_MASK;
    sign_extend((high << IMM_LOW_BITS) | low, 20)
}

/// Decodes a 32-bit instruction word.
///
/// # Arguments
///
/// * `word` - The raw instruction word.
///
/// # Returns
///
/// The decoded instruction, or a [`DecodeError`] naming the undefined class or funct.
pub fn decode(word: u32) -> Result<Instruction, DecodeError> {
    let cls = word.class();
    let funct = word.funct();

    let Some(kind) = InstKind::from_class_funct(cls, funct) else {
        return Err(if DEFINED_CLASSES.contains(&cls) {
            DecodeError::UnknownFunct {
                word,
                class: cls,
                funct,
            }
        } else {
            DecodeError::UnknownClass { word, class: cls }
        });
    };

    let imm = match kind.layout() {
        Layout::I => i_imm(word),
        Layout::BS => bs_imm(word),
        Layout::JU => ju_imm(word),
        Layout::R | Layout::Sys => 0,
    };

    Ok(Instruction::from_fields(
        kind,
        word.rd(),
        word.rs1(),
        word.rs2(),
        imm,
    ))
}
