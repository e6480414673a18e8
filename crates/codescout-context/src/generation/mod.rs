//! Context generation — request validation, graph build, allocation, rendering.

pub mod builder;

pub use builder::{ContextEngine, ContextOutput, ContextRequest};
