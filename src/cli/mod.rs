//! CLI module for promptpg - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for running, scaffolding,
//! listing and comparing prompts.

pub mod commands;

pub use commands::Cli;
