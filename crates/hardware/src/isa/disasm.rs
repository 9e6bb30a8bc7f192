//! Instruction Disassembler.
//!
//! Renders instructions in conventional assembly order for traces, the debugger's
//! decoded-instruction view and test diagnostics. Branch and jump offsets are printed
//! in words, as encoded.

use std::fmt;

use crate::common::reg::RegId;
use crate::isa::decode::decode;
use crate::isa::instruction::{InstKind, Instruction};

struct Reg(Option<RegId>);

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(r) => write!(f, "{r}"),
            None => f.write_str("?"),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.kind.mnemonic();
        let (rd, rs1, rs2) = (Reg(self.rd), Reg(self.rs1), Reg(self.rs2));
        let imm = self.imm_or_zero();
        match self.kind {
            InstKind::Nop => f.write_str(m),
            InstKind::Send => write!(f, "{m} {rs2}"),
            InstKind::Recv | InstKind::Rready => write!(f, "{m} {rd}"),
            InstKind::Jal | InstKind::Lui => write!(f, "{m} {rd}, {imm}"),
            InstKind::Lw | InstKind::Flw => write!(f, "{m} {rd}, {imm}({rs1})"),
            InstKind::Sw | InstKind::Fsw => write!(f, "{m} {rs2}, {imm}({rs1})"),
            k if k.is_conditional_branch() => write!(f, "{m} {rs1}, {rs2}, {imm}"),
            k if k.shape().imm => write!(f, "{m} {rd}, {rs1}, {imm}"),
            k if k.shape().rs2.is_some() => write!(f, "{m} {rd}, {rs1}, {rs2}"),
            _ => write!(f, "{m} {rd}, {rs1}"),
        }
    }
}

impl Instruction {
    /// Disassembly text, e.g. `addi x1, x0, 5`.
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }
}

/// Disassembles a raw word, or returns `"unknown"` if it does not decode.
pub fn disassemble(word: u32) -> String {
    decode(word).map_or_else(|_| "unknown".to_string(), |inst| inst.to_string())
}
