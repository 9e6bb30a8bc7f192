//! Execution unit semantics.
//!
//! This module performs the architectural effect of one instruction once its unit
//! commits it. Both the pipelined engine and the reference interpreter call it, so the
//! two models cannot disagree on what an instruction does:
//! 1. **Computation:** ALU, FPU, branch resolution or memory access, by owning unit.
//! 2. **Commit:** The destination register is written immediately.
//! 3. **Accounting:** Data-cache lookups and the per-kind execution counters.

use super::Cpu;
use crate::common::{RegId, SimError};
use crate::core::pipeline::latches::{IssuedInstruction, WritebackRequest};
use crate::core::units::alu::Alu;
use crate::core::units::bru::{self, BranchOutcome};
use crate::core::units::fpu::Fpu;
use crate::core::units::lsu::Lsu;
use crate::isa::{ExecUnit, Instruction};

/// Architectural effect of one committed instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Executed {
    /// Register write performed, if any.
    pub writeback: Option<WritebackRequest>,
    /// Resolution of a branch or jump.
    pub branch: Option<BranchOutcome>,
}

impl Cpu {
    /// Executes and commits an instruction.
    ///
    /// # Arguments
    ///
    /// * `iss` - The instruction with the operand values read at dispatch.
    ///
    /// # Returns
    ///
    /// The register write and branch outcome, or the fatal error the unit raised.
    pub fn execute(&mut self, iss: &IssuedInstruction) -> Result<Executed, SimError> {
        let inst = &iss.inst;
        let mut branch = None;
        let value = match inst.unit() {
            ExecUnit::Alu => Some(Alu::execute_inst(inst, iss.rv1, iss.rv2)?),
            ExecUnit::Branch => {
                let outcome = bru::resolve(inst, iss.pc, iss.rv1, iss.rv2)?;
                branch = Some(outcome);
                outcome.link
            }
            ExecUnit::Memory => {
                let result = Lsu::execute(inst, iss.pc, iss.rv1, iss.rv2, &mut self.bus)?;
                if let Some(hit) = result.addr.and_then(|addr| self.dcache.access(addr)) {
                    self.stats.record_dcache(hit);
                }
                result.value
            }
            ExecUnit::MultiCycleFpu | ExecUnit::PipelinedFpu => {
                Some(Fpu::execute(inst.kind, iss.rv1, iss.rv2)?)
            }
            ExecUnit::Trivial => None,
        };

        let writeback = match (inst.dest(), value) {
            (Some(reg), Some(value)) => {
                self.regs.write(reg, value);
                Some(WritebackRequest {
                    reg,
                    value,
                    pc: iss.pc,
                })
            }
            _ => None,
        };
        self.stats.record_executed(inst.kind);
        Ok(Executed { writeback, branch })
    }

    /// Reads the source operands of an instruction from the register file.
    ///
    /// Missing operands read as zero.
    pub fn read_operands(&self, inst: &Instruction) -> (u32, u32) {
        let read = |reg: Option<RegId>| reg.map_or(0, |r| self.regs.read(r));
        (read(inst.rs1), read(inst.rs2))
    }
}
