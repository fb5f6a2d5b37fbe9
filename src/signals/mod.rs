//! Signal evaluation.

pub mod evaluator;
pub mod thresholds;

pub use evaluator::{evaluate_signal, evaluate_signal_with};
pub use thresholds::SignalThresholds;
