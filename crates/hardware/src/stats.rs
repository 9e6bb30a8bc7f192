//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the simulator. It provides:
//! 1. **Cycle and IPC:** Total cycles, dispatched instructions, and derived metrics.
//! 2. **Instruction mix:** Per-kind counts, incremented by the unit that commits each kind.
//! 3. **Branch prediction:** Lookups and mispredictions.
//! 4. **Stalls:** Counts per hazard classification.
//! 5. **Data cache:** Hit/miss counts of the statistics-only cache.
//!
//! None of these values feed back into timing.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;

use serde::Serialize;

use crate::core::pipeline::hazards::Hazard;
use crate::isa::InstKind;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug, Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions admitted to an execution unit (or retired as trivial).
    pub instructions_dispatched: u64,
    /// Committed instructions per kind.
    pub executed: BTreeMap<InstKind, u64>,
    /// Conditional branches resolved.
    pub branch_lookups: u64,
    /// Control-flow instructions whose next pc was mispredicted.
    pub branch_mispredictions: u64,
    /// Blocked dispatch slots per hazard.
    pub stalls: BTreeMap<Hazard, u64>,
    /// Data cache hit count.
    pub dcache_hits: u64,
    /// Data cache miss count.
    pub dcache_misses: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_dispatched: 0,
            executed: BTreeMap::new(),
            branch_lookups: 0,
            branch_mispredictions: 0,
            stalls: BTreeMap::new(),
            dcache_hits: 0,
            dcache_misses: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"instruction_mix"`, `"stalls"`, `"branch"`, `"memory"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "instruction_mix", "stalls", "branch", "memory"];

const RULE: &str = "----------------------------------------------------------";
const BANNER: &str = "==========================================================";

impl SimStats {
    /// Counts one committed instruction of `kind`.
    pub fn record_executed(&mut self, kind: InstKind) {
        *self.executed.entry(kind).or_default() += 1;
    }

    /// Counts one dispatch slot blocked by `hazard`.
    pub fn record_stall(&mut self, hazard: Hazard) {
        *self.stalls.entry(hazard).or_default() += 1;
    }

    /// Counts a data cache lookup.
    pub const fn record_dcache(&mut self, hit: bool) {
        if hit {
            self.dcache_hits += 1;
        } else {
            self.dcache_misses += 1;
        }
    }

    /// Committed count for `kind`.
    pub fn executed(&self, kind: InstKind) -> u64 {
        self.executed.get(&kind).copied().unwrap_or(0)
    }

    /// Committed count over all kinds.
    pub fn total_executed(&self) -> u64 {
        self.executed.values().sum()
    }

    /// Blocked slots for `hazard`.
    pub fn stall_count(&self, hazard: Hazard) -> u64 {
        self.stalls.get(&hazard).copied().unwrap_or(0)
    }

    /// Serializes the counters as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Writes the JSON report to `path`.
    pub fn write_json(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let text = self.to_json().map_err(io::Error::other)?;
        fs::write(path, text)
    }

    /// Renders the requested sections as text.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an empty
    /// slice to render every section.
    pub fn render_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let total = self.total_executed();
        let instr = total.max(1) as f64;
        let mut out = String::new();

        let _ = writeln!(out, "\n{BANNER}");
        let _ = writeln!(out, "DUAL-ISSUE CORE SIMULATION STATISTICS");
        let _ = writeln!(out, "{BANNER}");
        if want("summary") {
            let _ = writeln!(out, "host_seconds             {seconds:.4} s");
            let _ = writeln!(out, "sim_cycles               {}", self.cycles);
            let _ = writeln!(out, "sim_insts                {total}");
            let _ = writeln!(out, "sim_dispatched           {}", self.instructions_dispatched);
            let _ = writeln!(out, "sim_ipc                  {:.4}", total as f64 / cyc);
            let _ = writeln!(out, "sim_cpi                  {:.4}", cyc / instr);
            let _ = writeln!(out, "{RULE}");
        }
        if want("instruction_mix") {
            let _ = writeln!(out, "INSTRUCTION MIX");
            for (kind, count) in &self.executed {
                let _ = writeln!(
                    out,
                    "  op.{:<19} {} ({:.2}%)",
                    kind.mnemonic(),
                    count,
                    *count as f64 / instr * 100.0
                );
            }
            let _ = writeln!(out, "{RULE}");
        }
        if want("stalls") {
            let _ = writeln!(out, "STALLS");
            for (hazard, count) in &self.stalls {
                let _ = writeln!(out, "  stall.{:<16} {}", format!("{hazard:?}"), count);
            }
            let _ = writeln!(out, "{RULE}");
        }
        if want("branch") {
            let correct = self.branch_lookups.saturating_sub(self.branch_mispredictions);
            let acc = if self.branch_lookups > 0 {
                100.0 * correct as f64 / self.branch_lookups as f64
            } else {
                0.0
            };
            let _ = writeln!(out, "BRANCH PREDICTION");
            let _ = writeln!(out, "  bp.lookups             {}", self.branch_lookups);
            let _ = writeln!(out, "  bp.mispredicts         {}", self.branch_mispredictions);
            let _ = writeln!(out, "  bp.accuracy            {acc:.2}%");
            let _ = writeln!(out, "{RULE}");
        }
        if want("memory") {
            let accesses = self.dcache_hits + self.dcache_misses;
            let miss_rate = if accesses > 0 {
                100.0 * self.dcache_misses as f64 / accesses as f64
            } else {
                0.0
            };
            let _ = writeln!(out, "DATA CACHE");
            let _ = writeln!(
                out,
                "  L1-D   accesses: {:<10} | hits: {:<10} | miss_rate: {:.2}%",
                accesses, self.dcache_hits, miss_rate
            );
        }
        let _ = writeln!(out, "{BANNER}");
        out
    }

    /// Prints only the requested statistics sections to stdout.
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.render_sections(sections));
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
