//! Instruction Encoder.
//!
//! The inverse of [`crate::isa::decode`] on every operand field. Used by tests and by
//! tooling that assembles small programs; the pipeline itself never encodes.

use crate::common::reg::RegId;
use crate::isa::instruction::{
    CLASS_SHIFT, Instruction, Layout, RD_SHIFT, REG_MASK, RS1_SHIFT, RS2_SHIFT,
};

/// Encodes an instruction into its 32-bit word.
///
/// Immediates are truncated to the width of the kind's layout, so values outside that
/// range do not survive a decode.
pub fn encode(inst: &Instruction) -> u32 {
    let (cls, funct) = inst.kind.class_funct();
    let imm = inst.imm_or_zero() as u32;
    let idx = |r: Option<RegId>| r.map_or(0, |r| u32::from(r.index) & REG_MASK);
    let rd = idx(inst.rd) << RD_SHIFT;
    let rs1 = idx(inst.rs1) << RS1_SHIFT;
    let rs2 = idx(inst.rs2) << RS2_SHIFT;
    let low = (imm & 0x3FF) << 3;

    let fields = match inst.kind.layout() {
        Layout::R => rs1 | rs2 | rd,
        Layout::I => rs1 | (((imm >> 10) & 0x1F) << 18) | rd | low,
        Layout::BS => rs1 | rs2 | ((imm & 0x7FFF) << 3),
        Layout::JU => (((imm >> 10) & 0x3FF) << 18) | rd | low,
        Layout::Sys => 0,
    };

    (cls << CLASS_SHIFT) | fields | funct
}
