//! Statistics Accounting Tests.
//!
//! Runs small programs and checks that the counters match what they did.

use crate::common::TestContext;
use crate::common::builder::asm;
use dualsim_core::core::pipeline::Hazard;
use dualsim_core::isa::InstKind;
use dualsim_core::stats::STATS_SECTIONS;

#[test]
fn instruction_mix_counts_commits() {
    let mut tc = TestContext::new().load(&[
        asm::addi(1, 0, 3),
        asm::addi(2, 0, 4),
        asm::add(3, 1, 2),
        asm::nop(),
        asm::itof(1, 3),
    ]);
    tc.run_to_end();
    let stats = tc.stats();
    assert_eq!(stats.executed(InstKind::Addi), 2);
    assert_eq!(stats.executed(InstKind::Add), 1);
    assert_eq!(stats.executed(InstKind::Nop), 1);
    assert_eq!(stats.executed(InstKind::Itof), 1);
    assert_eq!(stats.total_executed(), 5);
    assert_eq!(stats.instructions_dispatched, 5);
    assert_eq!(stats.cycles, tc.cycles());
}

#[test]
fn dcache_sees_every_memory_access() {
    let mut tc = TestContext::new().load(&[
        asm::sw(0, 0, 0),
        asm::lw(1, 0, 4),
        asm::lw(2, 0, 4096),
    ]);
    tc.run_to_end();
    assert_eq!(tc.stats().dcache_misses, 2, "cold lines at 0 and 4096");
    assert_eq!(tc.stats().dcache_hits, 1);
}

#[test]
fn stalls_are_attributed_per_hazard() {
    let mut tc = TestContext::new().load(&[asm::fdiv(1, 2, 3), asm::fadd(4, 1, 1)]);
    tc.run_to_end();
    assert!(tc.stats().stall_count(Hazard::IntraRaw) >= 1);
    assert!(tc.stats().stall_count(Hazard::MultiCycleFpuRaw) >= 1);
    assert_eq!(tc.stats().stall_count(Hazard::LoadRaw), 0);
}

#[test]
fn json_report_is_written_to_disk() {
    let mut tc = TestContext::new().load(&[asm::addi(1, 0, 1)]);
    tc.run_to_end();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stats.json");
    tc.stats().write_json(&path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["cycles"], tc.cycles());
    assert_eq!(json["executed"]["addi"], 1);
}

#[test]
fn text_report_has_every_section() {
    let text = TestContext::new().stats().render_sections(&[]);
    for heading in ["STATISTICS", "INSTRUCTION MIX", "STALLS", "BRANCH PREDICTION", "DATA CACHE"] {
        assert!(text.contains(heading), "missing {heading}");
    }
    assert_eq!(STATS_SECTIONS.len(), 5);
}
