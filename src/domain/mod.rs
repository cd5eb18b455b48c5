//! Domain types for promptpg
//!
//! - InvocationResult: one model call's output, usage and cost
//! - ComparisonBatch: ordered results of a multi-prompt comparison

pub mod invocation;

pub use invocation::{ComparisonBatch, InvocationResult};
