//! Debug maps for labels, breakpoints and source lines.
//!
//! These maps are built by the loader from the annotation suffixes of a program and
//! never reach the pipeline: the engine only sees a [`BreakpointMatcher`] over raw pcs,
//! produced here from a breakpoint selector.

use std::collections::{BTreeMap, BTreeSet};

use crate::common::SimError;
use crate::core::pipeline::traits::BreakpointMatcher;

/// Selector that stops at every configured breakpoint.
pub const ANY_BREAKPOINT: &str = "*";

/// Bidirectional name/address maps for one program.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DebugInfo {
    labels: BTreeMap<String, u32>,
    label_at: BTreeMap<u32, String>,
    breakpoints: BTreeMap<String, u32>,
    breakpoint_at: BTreeMap<u32, String>,
    lines: BTreeMap<u32, u32>,
}

impl DebugInfo {
    /// Creates empty maps.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a label. Returns `false` if the name is already taken.
    pub fn add_label(&mut self, name: &str, pc: u32) -> bool {
        if self.labels.contains_key(name) {
            return false;
        }
        let _ = self.labels.insert(name.to_owned(), pc);
        let _ = self.label_at.insert(pc, name.to_owned());
        true
    }

    /// Records a named breakpoint. Returns `false` if the name is already taken.
    pub fn add_breakpoint(&mut self, name: &str, pc: u32) -> bool {
        if self.breakpoints.contains_key(name) {
            return false;
        }
        let _ = self.breakpoints.insert(name.to_owned(), pc);
        let _ = self.breakpoint_at.insert(pc, name.to_owned());
        true
    }

    /// Records the source line an instruction came from.
    pub fn set_line(&mut self, pc: u32, line: u32) {
        let _ = self.lines.insert(pc, line);
    }

    /// Address of a label.
    pub fn label_pc(&self, name: &str) -> Option<u32> {
        self.labels.get(name).copied()
    }

    /// Label attached to an address.
    pub fn label_at(&self, pc: u32) -> Option<&str> {
        self.label_at.get(&pc).map(String::as_str)
    }

    /// Address of a named breakpoint.
    pub fn breakpoint_pc(&self, name: &str) -> Option<u32> {
        self.breakpoints.get(name).copied()
    }

    /// Breakpoint name attached to an address.
    pub fn breakpoint_at(&self, pc: u32) -> Option<&str> {
        self.breakpoint_at.get(&pc).map(String::as_str)
    }

    /// Source line of the instruction at `pc`.
    pub fn line_of(&self, pc: u32) -> Option<u32> {
        self.lines.get(&pc).copied()
    }

    /// Whether no breakpoint is configured.
    pub fn has_breakpoints(&self) -> bool {
        !self.breakpoints.is_empty()
    }

    /// Resolves a breakpoint selector to the set of pcs that stop the clock.
    ///
    /// # Arguments
    ///
    /// * `selector` - `""` for none, [`ANY_BREAKPOINT`] for all, otherwise a breakpoint name.
    ///
    /// # Returns
    ///
    /// The matcher, or `SimError::UnknownBreakpoint` for a name the program does not define.
    pub fn matcher(&self, selector: &str) -> Result<PcSet, SimError> {
        match selector {
            "" => Ok(PcSet::default()),
            ANY_BREAKPOINT => Ok(PcSet(self.breakpoint_at.keys().copied().collect())),
            name => self
                .breakpoint_pc(name)
                .map(|pc| PcSet(BTreeSet::from([pc])))
                .ok_or_else(|| SimError::UnknownBreakpoint(name.to_owned())),
        }
    }
}

/// A set of breakpoint addresses.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PcSet(BTreeSet<u32>);

impl BreakpointMatcher for PcSet {
    fn is_breakpoint(&self, pc: u32) -> bool {
        self.0.contains(&pc)
    }
}
