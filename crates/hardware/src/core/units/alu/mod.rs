//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used by both single-cycle ALU slots. It
//! handles the register-register and register-immediate arithmetic, logical and shift
//! kinds, plus `lui`. All operations are 32-bit and wrap on overflow.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Lui
//! - [`logic`]:      And, Or, Xor
//! - [`shifts`]:     Sll, Srl, Sra

/// Integer arithmetic operations (add, subtract, load-upper).
pub mod arithmetic;

/// Bitwise logical operations (and, or, xor).
pub mod logic;

/// Shift operations (sll, srl, sra).
pub mod shifts;

use crate::common::SimError;
use crate::isa::{InstKind, Instruction};

/// Arithmetic Logic Unit (ALU) for integer operations.
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `kind` - The operation; register and immediate forms share an implementation.
    /// * `a`    - First operand (`rs1`).
    /// * `b`    - Second operand: `rs2` for register forms, the immediate otherwise.
    ///
    /// # Returns
    ///
    /// The 32-bit result, or `SimError::Internal` for kinds the ALU does not own.
    ///
    /// # Examples
    ///
    /// ```
    /// use dualsim_core::core::units::alu::Alu;
    /// use dualsim_core::isa::InstKind;
    ///
    /// assert_eq!(Alu::execute(InstKind::Add, 42, 8), Ok(50));
    /// assert_eq!(Alu::execute(InstKind::Addi, 5, -1i32 as u32), Ok(4));
    /// assert_eq!(Alu::execute(InstKind::Sra, 0x8000_0000, 4), Ok(0xF800_0000));
    /// assert_eq!(Alu::execute(InstKind::Lui, 0, 1), Ok(0x1000));
    /// ```
    pub fn execute(kind: InstKind, a: u32, b: u32) -> Result<u32, SimError> {
        match kind {
            InstKind::Add | InstKind::Addi | InstKind::Sub | InstKind::Lui => {
                Ok(arithmetic::execute(kind, a, b))
            }
            InstKind::And
            | InstKind::Andi
            | InstKind::Or
            | InstKind::Ori
            | InstKind::Xor
            | InstKind::Xori => Ok(logic::execute(kind, a, b)),
            InstKind::Sll
            | InstKind::Slli
            | InstKind::Srl
            | InstKind::Srli
            | InstKind::Sra
            | InstKind::Srai => Ok(shifts::execute(kind, a, b)),
            other => Err(SimError::Internal(format!(
                "ALU handed non-integer operation `{}`",
                other.mnemonic()
            ))),
        }
    }

    /// Executes a dispatched instruction given its register operand values.
    ///
    /// Immediate forms take the immediate as the second operand.
    pub fn execute_inst(inst: &Instruction, rv1: u32, rv2: u32) -> Result<u32, SimError> {
        let b = match inst.imm {
            Some(imm) => imm as u32,
            None => rv2,
        };
        Self::execute(inst.kind, rv1, b)
    }
}
