//! Writeback (WB) Stage.
//!
//! Register writes are applied by the units as they commit; this stage records them
//! per bank for the successor state and enforces the write-port capacity.

use crate::common::constants::{FLOAT_WRITE_PORTS, INT_WRITE_PORTS};
use crate::common::{RegClass, SimError};
use crate::core::pipeline::latches::WritebackRequest;
use crate::core::pipeline::state::WritebackStage;

/// Builds the writeback record from this cycle's commits.
///
/// # Returns
///
/// The record, or `SimError::Internal` if a bank received more writes than it has ports.
pub fn writeback_stage(committed: Vec<WritebackRequest>) -> Result<WritebackStage, SimError> {
    let (int, float): (Vec<_>, Vec<_>) = committed
        .into_iter()
        .partition(|wb| wb.reg.class == RegClass::Int);
    if int.len() > INT_WRITE_PORTS || float.len() > FLOAT_WRITE_PORTS {
        return Err(SimError::Internal(format!(
            "write ports exceeded: {} int, {} float",
            int.len(),
            float.len()
        )));
    }
    Ok(WritebackStage { int, float })
}
