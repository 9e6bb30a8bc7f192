//! GShare Branch Predictor.
//!
//! GShare correlates global branch history with the program counter using an XOR
//! hash. This allows the predictor to distinguish the same branch instruction
//! in different execution contexts.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `predict()`: O(1)
//!   - `update()`: O(1)
//! - **Space Complexity:** O(2^N) where N is the configured history length
//! - **Best Case:** Correlated branches where outcome depends on recent history
//! - **Worst Case:** Uncorrelated branches or history length too short/long for pattern

use super::{BranchPredictor, Prediction};

/// Saturation limit of a 2-bit counter.
const COUNTER_MAX: u8 = 3;

/// Counter value from which a branch is predicted taken.
const TAKEN_THRESHOLD: u8 = 2;

/// GShare Predictor structure.
#[derive(Clone, Debug)]
pub struct GSharePredictor {
    /// Global History Register storing recent branch outcomes.
    ghr: usize,
    /// Pattern History Table containing 2-bit saturating counters.
    pht: Vec<u8>,
    /// `pht.len() - 1`.
    mask: usize,
    /// Power-on counter value.
    initial_counter: u8,
}

impl GSharePredictor {
    /// Creates a new GShare Predictor.
    ///
    /// # Arguments
    ///
    /// * `history_bits` - History length; the table has `2^history_bits` counters.
    /// * `initial_counter` - Power-on value of every counter (1 = weakly not-taken).
    pub fn new(history_bits: u32, initial_counter: u8) -> Self {
        let size = 1usize << history_bits;
        Self {
            ghr: 0,
            pht: vec![initial_counter.min(COUNTER_MAX); size],
            mask: size - 1,
            initial_counter: initial_counter.min(COUNTER_MAX),
        }
    }

    /// Calculates the index into the Pattern History Table.
    ///
    /// Computes the XOR of the word address and the Global History Register.
    const fn index(&self, pc: u32) -> usize {
        ((pc as usize >> 2) ^ self.ghr) & self.mask
    }

    /// Current global history.
    pub const fn history(&self) -> usize {
        self.ghr
    }

    /// Counter at a table index.
    pub fn counter(&self, index: usize) -> u8 {
        self.pht[index & self.mask]
    }
}

impl BranchPredictor for GSharePredictor {
    /// Returns taken if the 2-bit counter at the hashed index is 2 or 3.
    fn predict(&self, pc: u32) -> Prediction {
        let index = self.index(pc);
        let counter = self.pht[index];
        Prediction {
            index,
            counter,
            taken: counter >= TAKEN_THRESHOLD,
        }
    }

    /// Updates the 2-bit saturating counter the prediction consulted and shifts the
    /// outcome into the Global History Register.
    fn update(&mut self, prediction: &Prediction, taken: bool) {
        let idx = prediction.index & self.mask;
        let counter = self.pht[idx];

        if taken && counter < COUNTER_MAX {
            self.pht[idx] += 1;
        } else if !taken && counter > 0 {
            self.pht[idx] -= 1;
        }

        self.ghr = ((self.ghr << 1) | usize::from(taken)) & self.mask;
    }

    fn reset(&mut self) {
        self.ghr = 0;
        self.pht.fill(self.initial_counter);
    }
}
