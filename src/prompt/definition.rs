//! Prompt definition - the typed shape of a prompt YAML file

use serde::{Deserialize, Serialize};

/// Model used when a definition does not name one
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Sampling temperature used when a definition does not set one
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Placeholder replaced by caller input
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// A stored prompt template plus model configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Template text containing the `{input}` placeholder
    pub prompt: String,

    /// Parsed and kept, not yet used when building requests
    #[serde(default)]
    pub few_shot_examples: Vec<FewShotExample>,
}

/// One entry of `few_shot_examples`
///
/// Entries that are not an input/output pair are kept as raw YAML so that
/// free-form examples still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FewShotExample {
    Pair { input: String, output: String },
    Other(serde_yaml::Value),
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

impl PromptDefinition {
    /// Starter definition written by `promptpg new`
    pub fn scaffold(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            provider: Some("openai".to_string()),
            model: default_model(),
            temperature: DEFAULT_TEMPERATURE,
            prompt: format!("Enter your prompt here with {}", INPUT_PLACEHOLDER),
            few_shot_examples: Vec::new(),
        }
    }
}

/// Whether `template` contains the input placeholder
pub fn has_placeholder(template: &str) -> bool {
    template.contains(INPUT_PLACEHOLDER)
}
