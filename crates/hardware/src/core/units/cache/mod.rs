//! Set-Associative Cache Simulator.
//!
//! This module implements a configurable set-associative data cache that only keeps
//! statistics. It tracks tags and LRU order for every committed load and store
//! address and reports hit or miss. Memory latency is a fixed pipeline depth, so
//! the result never influences timing.

/// Cache replacement policy implementations.
pub mod policies;

use self::policies::{LruPolicy, ReplacementPolicy};
use crate::config::CacheConfig;

/// Cache line entry containing tag and validity.
#[derive(Clone, Copy, Debug, Default)]
struct CacheLine {
    tag: u32,
    valid: bool,
}

/// Cache simulator implementing a set-associative tag array with LRU replacement.
#[derive(Clone, Debug)]
pub struct CacheSim {
    /// When false, accesses are not tracked.
    pub enabled: bool,
    lines: Vec<CacheLine>,
    num_sets: usize,
    ways: usize,
    line_bytes: usize,
    policy: LruPolicy,
}

impl CacheSim {
    /// Creates a new cache simulator with the specified geometry.
    ///
    /// Zero-sized fields fall back to a single line so a disabled cache can carry
    /// any configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let ways = config.ways.max(1);
        let line_bytes = config.line_bytes.max(4);
        let num_sets = (config.size_bytes / line_bytes / ways).max(1);

        Self {
            enabled: config.enabled,
            lines: vec![CacheLine::default(); num_sets * ways],
            num_sets,
            ways,
            line_bytes,
            policy: LruPolicy::new(num_sets, ways),
        }
    }

    fn locate(&self, addr: u32) -> (usize, u32) {
        let line = addr as usize / self.line_bytes;
        let set_index = line % self.num_sets;
        let tag = (line / self.num_sets) as u32;
        (set_index, tag)
    }

    /// Checks if the cache contains the specified address.
    pub fn contains(&self, addr: u32) -> bool {
        if !self.enabled {
            return false;
        }
        let (set_index, tag) = self.locate(addr);
        let base_idx = set_index * self.ways;
        self.lines[base_idx..base_idx + self.ways]
            .iter()
            .any(|l| l.valid && l.tag == tag)
    }

    /// Accesses the cache for the specified address.
    ///
    /// Updates the replacement policy on a hit and installs the line on a miss.
    ///
    /// # Returns
    ///
    /// `Some(hit)` when the cache is enabled, `None` otherwise.
    pub fn access(&mut self, addr: u32) -> Option<bool> {
        if !self.enabled {
            return None;
        }

        let (set_index, tag) = self.locate(addr);
        let base_idx = set_index * self.ways;

        let hit_way = (0..self.ways).find(|&i| {
            let line = self.lines[base_idx + i];
            line.valid && line.tag == tag
        });

        let way = match hit_way {
            Some(way) => way,
            None => {
                let victim = self.policy.victim(set_index);
                self.lines[base_idx + victim] = CacheLine { tag, valid: true };
                victim
            }
        };
        self.policy.touch(set_index, way);

        Some(hit_way.is_some())
    }

    /// Invalidates every line.
    pub fn flush(&mut self) {
        self.lines.fill(CacheLine::default());
        self.policy.reset();
    }
}
