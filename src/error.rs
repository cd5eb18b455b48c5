//! Error types for promptpg
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

use crate::llm::LlmError;

/// All error types that can occur while running prompts
#[derive(Debug, Error)]
pub enum PlaygroundError {
    /// Prompt definition or input file not found in storage
    #[error("Not found: {0}")]
    NotFound(String),

    /// Stored content could not be parsed into the expected shape
    #[error("Format error: {0}")]
    Format(String),

    /// No tokenizer mapping exists for the model identifier
    #[error("Unsupported model: {0}")]
    UnsupportedModel(String),

    /// Remote completion call failed
    #[error("Completion error: {0}")]
    Completion(#[from] LlmError),

    /// Missing or conflicting command input
    #[error("Usage error: {0}")]
    Usage(String),

    /// Strict rendering found no placeholder in the template
    #[error("Template for '{0}' has no {{input}} placeholder")]
    MissingPlaceholder(String),

    /// Refusing to overwrite an existing file
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// CSV summary write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for promptpg operations
pub type Result<T> = std::result::Result<T, PlaygroundError>;
