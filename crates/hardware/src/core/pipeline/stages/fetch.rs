//! Instruction Fetch (IF) Stage.
//!
//! Fills the empty decode slots from the fetch pc, two words at most per cycle. It
//! performs branch prediction for conditional branches and stops at the end of the
//! program. Words that fail to decode are carried as illegal entries and only become
//! fatal if they reach dispatch.

use crate::common::SimError;
use crate::common::constants::INSTRUCTION_BYTES;
use crate::core::Cpu;
use crate::core::pipeline::latches::FetchedInstruction;
use crate::core::pipeline::state::{DecodeStage, FetchStage};
use crate::core::units::bru::BranchPredictor;

/// Executes the instruction fetch stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - CPU context (program and predictor).
/// * `fetch` - Fetch pc of the successor state, advanced past every fetched word.
/// * `decode` - Decode slots of the successor state; only empty slots are filled.
///
/// # Returns
///
/// The number of words fetched, or `InstructionMisaligned` for a misaligned fetch pc.
pub fn fetch_stage(
    cpu: &Cpu,
    fetch: &mut FetchStage,
    decode: &mut DecodeStage,
) -> Result<usize, SimError> {
    let mut fetched = 0;
    for slot in decode.slots.iter_mut().filter(|s| s.is_none()) {
        let pc = fetch.pc;
        let entry = match cpu.bus.program.fetch(pc) {
            Ok(None) => break,
            Ok(Some(inst)) => {
                let prediction = inst
                    .kind
                    .is_conditional_branch()
                    .then(|| cpu.branch_predictor.predict(pc));
                FetchedInstruction::new(pc, inst, prediction)
            }
            Err(SimError::IllegalInstruction { pc, source }) => {
                FetchedInstruction::illegal(pc, source)
            }
            Err(e) => return Err(e),
        };
        *slot = Some(entry);
        fetch.pc = pc.wrapping_add(INSTRUCTION_BYTES);
        fetched += 1;
    }
    Ok(fetched)
}
