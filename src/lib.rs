//! promptpg - a prompt playground
//!
//! Loads prompt templates from YAML files, substitutes input, calls a chat
//! completion API, and records token usage, estimated cost and output for
//! single runs and side-by-side comparisons.

pub mod config;
pub mod cost;
pub mod domain;
pub mod error;
pub mod history;
pub mod llm;
pub mod prompt;
pub mod runner;
pub mod tokens;

pub use error::{PlaygroundError, Result};
