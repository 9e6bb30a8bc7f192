//! Load/Store Unit (LSU).
//!
//! This module performs the side effect of a memory-class instruction once it reaches
//! the final stage of the memory pipeline. It covers:
//! - Word loads and stores to data memory (integer and float banks alike).
//! - `send`, `recv` and `rready` against the external buffers.

use crate::common::SimError;
use crate::isa::{InstKind, Instruction};
use crate::soc::System;

/// Result of committing a memory-class instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemResult {
    /// Value for the destination register, if the kind writes one.
    pub value: Option<u32>,
    /// Data memory address touched, if any.
    pub addr: Option<u32>,
}

/// Load/Store Unit (LSU) for memory operations.
pub struct Lsu;

impl Lsu {
    /// Effective byte address `rs1 + imm`.
    pub const fn effective_address(base: u32, imm: i32) -> u32 {
        base.wrapping_add(imm as u32)
    }

    /// Commits a memory-class instruction.
    ///
    /// # Arguments
    ///
    /// * `inst` - The instruction leaving the final memory stage.
    /// * `pc` - Its address, for error reports.
    /// * `rv1` - Base register value (`rs1`).
    /// * `rv2` - Store data (`rs2`).
    /// * `system` - Data memory and external buffers.
    ///
    /// # Returns
    ///
    /// The loaded value and touched address, or the fatal error the access raised.
    pub fn execute(
        inst: &Instruction,
        pc: u32,
        rv1: u32,
        rv2: u32,
        system: &mut System,
    ) -> Result<MemResult, SimError> {
        let addr = Self::effective_address(rv1, inst.imm_or_zero());
        match inst.kind {
            InstKind::Lw | InstKind::Flw => Ok(MemResult {
                value: Some(system.memory.read(addr, pc)?),
                addr: Some(addr),
            }),
            InstKind::Sw | InstKind::Fsw => {
                system.memory.write(addr, rv2, pc)?;
                Ok(MemResult {
                    value: None,
                    addr: Some(addr),
                })
            }
            InstKind::Send => {
                system.io.send.push(rv2);
                Ok(MemResult::default())
            }
            InstKind::Recv => {
                let word = system.io.receive.pop().ok_or(SimError::ReceiveEmpty { pc })?;
                Ok(MemResult {
                    value: Some(word),
                    addr: None,
                })
            }
            InstKind::Rready => Ok(MemResult {
                value: Some(u32::from(!system.io.receive.is_empty())),
                addr: None,
            }),
            other => Err(SimError::Internal(format!(
                "memory unit handed `{}`",
                other.mnemonic()
            ))),
        }
    }
}
