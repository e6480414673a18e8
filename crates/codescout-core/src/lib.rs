//! # codescout-core
//!
//! Shared foundation for the codescout context engine: configuration,
//! error types, performance collections, compiled defaults, and the
//! `TokenEstimator` trait seam between graph construction and tokenization.

pub mod config;
pub mod constants;
pub mod errors;
pub mod traits;
pub mod types;
