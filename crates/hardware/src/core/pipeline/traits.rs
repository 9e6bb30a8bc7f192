//! Pipeline collaborator interfaces.
//!
//! The engine deals only in raw program counters. Anything that maps names to
//! addresses (labels, named breakpoints) lives outside and is injected through
//! [`BreakpointMatcher`].

/// Decides whether dispatching the instruction at a pc stops the clock.
pub trait BreakpointMatcher {
    /// Returns `true` if `pc` is a breakpoint of interest.
    fn is_breakpoint(&self, pc: u32) -> bool;
}

/// Matcher that never stops.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoBreakpoints;

impl BreakpointMatcher for NoBreakpoints {
    fn is_breakpoint(&self, _pc: u32) -> bool {
        false
    }
}

impl<F: Fn(u32) -> bool> BreakpointMatcher for F {
    fn is_breakpoint(&self, pc: u32) -> bool {
        self(pc)
    }
}
