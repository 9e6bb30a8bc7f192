//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait that every direction predictor
//! implements, and the [`Prediction`] snapshot that travels with a fetched branch so
//! the predictor can be trained against the exact entry it consulted.

use serde::Serialize;

/// Predictor state captured when a conditional branch is fetched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Prediction {
    /// Table index that was consulted.
    pub index: usize,
    /// Counter value read at fetch.
    pub counter: u8,
    /// Predicted direction.
    pub taken: bool,
}

/// Trait for branch direction predictors.
pub trait BranchPredictor {
    /// Predicts the direction of the conditional branch at `pc`.
    ///
    /// # Arguments
    ///
    /// * `pc` - Byte address of the branch instruction
    ///
    /// # Returns
    ///
    /// The snapshot of the consulted entry and the predicted direction.
    fn predict(&self, pc: u32) -> Prediction;

    /// Trains the predictor with a resolved outcome.
    ///
    /// # Arguments
    ///
    /// * `prediction` - Snapshot taken when the branch was fetched
    /// * `taken` - Whether the branch was actually taken
    fn update(&mut self, prediction: &Prediction, taken: bool);

    /// Restores the power-on state.
    fn reset(&mut self);
}
