//! Trait seams shared across crates.

pub mod token_estimator;

pub use token_estimator::{HeuristicEstimator, TokenEstimator};
