//! Runner module - the prompt execution and comparison pipeline.
//!
//! This module provides:
//! - Playground for single runs and multi-prompt comparisons
//! - Resolution of the shared comparison input

mod input;
mod playground;

pub use input::InputSource;
pub use playground::{Playground, PlaygroundConfig, RunOutcome};
