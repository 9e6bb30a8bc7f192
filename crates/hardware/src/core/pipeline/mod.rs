//! Instruction pipeline implementation.
//!
//! This module contains the dual-issue timing engine. It includes the following components:
//! 1. **State:** The whole machine configuration at one clock edge.
//! 2. **Latches:** Entries carried between fetch, decode, the execution units and writeback.
//! 3. **Hazards:** Classification of why a decode slot cannot dispatch.
//! 4. **Stages:** Execute, writeback, dispatch and fetch.
//! 5. **Engine:** `advance_clock`, the pure transition from one state to the next.
//! 6. **Traits:** The breakpoint collaborator.

/// Clock transition function.
pub mod engine;

/// Dispatch hazard detection.
pub mod hazards;

/// Inter-stage entries (fetched, issued, writeback).
pub mod latches;

/// Pipeline stage implementations (execute, writeback, dispatch, fetch).
pub mod stages;

/// Machine state at a clock edge.
pub mod state;

/// Traits for pipeline collaborators.
pub mod traits;

pub use engine::{ClockStatus, Transition, advance_clock};
pub use hazards::Hazard;
pub use state::PipelineState;
pub use traits::{BreakpointMatcher, NoBreakpoints};
