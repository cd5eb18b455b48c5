//! Prompt System - definition loading and template rendering
//!
//! Prompt definitions are YAML files in the prompts directory. Rendering is a
//! literal `{input}` substitution.

mod definition;
mod loader;
mod render;

pub use definition::{
    DEFAULT_MODEL, DEFAULT_TEMPERATURE, FewShotExample, INPUT_PLACEHOLDER, PromptDefinition, has_placeholder,
};
pub use loader::{PromptLoader, parse_definition};
pub use render::{PromptRenderer, RenderMode, render};
