//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the entries carried between the four stages:
//! Fetch → Decode → Execute → Writeback.
//!
//! 1. **Fetched instructions:** Decoded word, pc and the predictor snapshot.
//! 2. **Issued instructions:** What an execution unit holds, with operands read at dispatch.
//! 3. **Writeback requests:** Register writes committed by a unit in one cycle.

use crate::common::constants::INSTRUCTION_BYTES;
use crate::common::{DecodeError, RegId};
use crate::core::units::bru::{Prediction, relative_target};
use crate::isa::{InstKind, Instruction};

/// Entry in a decode slot (Fetch to Decode).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchedInstruction {
    /// Program counter of the instruction.
    pub pc: u32,
    /// Decoded instruction; `NOP` when `illegal` is set.
    pub inst: Instruction,
    /// Predictor snapshot, for conditional branches only.
    pub prediction: Option<Prediction>,
    /// Decode failure, raised only if the slot reaches dispatch.
    pub illegal: Option<DecodeError>,
}

impl FetchedInstruction {
    /// Creates an entry for a successfully decoded instruction.
    pub const fn new(pc: u32, inst: Instruction, prediction: Option<Prediction>) -> Self {
        Self {
            pc,
            inst,
            prediction,
            illegal: None,
        }
    }

    /// Creates an entry for a word the codec rejected.
    pub const fn illegal(pc: u32, error: DecodeError) -> Self {
        Self {
            pc,
            inst: Instruction::NOP,
            prediction: None,
            illegal: Some(error),
        }
    }

    /// Fetch redirect requested when this instruction dispatches.
    ///
    /// `jal` always redirects; conditional branches redirect when predicted taken.
    /// `jalr` is predicted sequential.
    pub fn decode_redirect(&self) -> Option<u32> {
        let target = relative_target(self.pc, self.inst.imm_or_zero());
        match self.inst.kind {
            InstKind::Jal => Some(target),
            _ if self.prediction.is_some_and(|p| p.taken) => Some(target),
            _ => None,
        }
    }

    /// Address the front end assumed would follow this instruction.
    pub fn predicted_next_pc(&self) -> u32 {
        self.decode_redirect()
            .unwrap_or_else(|| self.pc.wrapping_add(INSTRUCTION_BYTES))
    }
}

/// Entry held by an execution unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IssuedInstruction {
    /// Program counter of the instruction.
    pub pc: u32,
    /// The instruction.
    pub inst: Instruction,
    /// Predictor snapshot carried from fetch.
    pub prediction: Option<Prediction>,
    /// Address the front end continued from.
    pub predicted_next: u32,
    /// Value read from `rs1` at dispatch.
    pub rv1: u32,
    /// Value read from `rs2` at dispatch.
    pub rv2: u32,
}

impl IssuedInstruction {
    /// Pairs a fetched instruction with its operand values.
    pub fn new(fetched: &FetchedInstruction, rv1: u32, rv2: u32) -> Self {
        Self {
            pc: fetched.pc,
            inst: fetched.inst,
            prediction: fetched.prediction,
            predicted_next: fetched.predicted_next_pc(),
            rv1,
            rv2,
        }
    }

    /// Destination register, excluding register 0.
    pub fn dest(&self) -> Option<RegId> {
        self.inst.dest()
    }
}

/// A register write committed by an execution unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WritebackRequest {
    /// Destination register.
    pub reg: RegId,
    /// Value written.
    pub value: u32,
    /// Program counter of the producing instruction.
    pub pc: u32,
}
