//! Pipeline stage implementations.
//!
//! Each function here builds one part of the successor state during `advance_clock`.
//! They run in this order:
//! 1. **Execute:** Every unit resolves; completed work commits to the register file.
//! 2. **Writeback:** Records this cycle's commits, checking write-port capacity.
//! 3. **Dispatch:** Classifies hazards and routes up to two decode slots to units.
//! 4. **Fetch:** Refills the empty decode slots and consults the branch predictor.

/// Instruction dispatch stage implementation.
pub mod dispatch;

/// Execution unit resolution.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Writeback record.
pub mod writeback;

/// Dispatch stage entry point.
pub use dispatch::dispatch_stage;
/// Execute stage entry point.
pub use execute::execute_stage;
/// Fetch stage entry point.
pub use fetch::fetch_stage;
/// Writeback stage entry point.
pub use writeback::writeback_stage;
