//! Least-recently-used victim selection.
//!
//! Every way carries the tick of its last access; the oldest stamp in a set is the
//! victim. Ties (untouched ways) resolve to the lowest way.

use super::ReplacementPolicy;

/// Per-way access stamps for every set.
#[derive(Clone, Debug)]
pub struct LruPolicy {
    stamps: Vec<u64>,
    ways: usize,
    tick: u64,
}

impl LruPolicy {
    /// Creates stamps for `sets` sets of `ways` ways, all untouched.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            stamps: vec![0; sets * ways],
            ways,
            tick: 0,
        }
    }

    fn set_stamps(&self, set: usize) -> &[u64] {
        let base = set * self.ways;
        &self.stamps[base..base + self.ways]
    }
}

impl ReplacementPolicy for LruPolicy {
    fn touch(&mut self, set: usize, way: usize) {
        self.tick += 1;
        self.stamps[set * self.ways + way] = self.tick;
    }

    fn victim(&self, set: usize) -> usize {
        self.set_stamps(set)
            .iter()
            .enumerate()
            .min_by_key(|&(_, stamp)| *stamp)
            .map_or(0, |(way, _)| way)
    }

    fn reset(&mut self) {
        self.stamps.fill(0);
        self.tick = 0;
    }
}
