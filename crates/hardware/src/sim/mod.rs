//! Simulation front end.
//!
//! Everything around the core that a user of the simulator touches:
//! 1. **Loader:** Text and binary program formats.
//! 2. **Debug maps:** Labels, named breakpoints and source lines.
//! 3. **Inspection:** Rendering of register and memory values.
//! 4. **Simulator:** The context object with its lifecycle and clock entry point.
//! 5. **Reference:** A non-pipelined interpreter for differential checks.

/// Label, breakpoint and line maps.
pub mod debug;

/// Value rendering formats.
pub mod inspect;

/// Program loading.
pub mod loader;

/// Non-pipelined reference interpreter.
pub mod reference;

/// Simulator context and lifecycle.
pub mod simulator;

pub use debug::{ANY_BREAKPOINT, DebugInfo};
pub use inspect::RenderFormat;
pub use loader::{LoadError, Program};
pub use reference::ReferenceModel;
pub use simulator::{RunExit, Simulator};
