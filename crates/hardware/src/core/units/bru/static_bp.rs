//! Static Branch Predictor.
//!
//! Implements a simple "Always Not Taken" prediction policy for conditional branches.
//! It keeps no state, so training is a no-op.

use super::{BranchPredictor, Prediction};

/// Static Branch Predictor structure.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticPredictor;

impl BranchPredictor for StaticPredictor {
    /// Always predicts conditional branches as not taken.
    fn predict(&self, _pc: u32) -> Prediction {
        Prediction::default()
    }

    fn update(&mut self, _prediction: &Prediction, _taken: bool) {}

    fn reset(&mut self) {}
}
