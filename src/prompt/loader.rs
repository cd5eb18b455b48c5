//! Prompt Loader - Load prompt definitions from the prompts directory
//!
//! Definitions are re-read from disk on every load; nothing is cached.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{PlaygroundError, Result};

use super::definition::PromptDefinition;

/// Extensions recognized as prompt files, in lookup order
const PROMPT_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Loads prompt definitions from a directory
#[derive(Debug, Clone)]
pub struct PromptLoader {
    prompts_dir: PathBuf,
}

impl PromptLoader {
    pub fn new(prompts_dir: impl AsRef<Path>) -> Self {
        Self {
            prompts_dir: prompts_dir.as_ref().to_path_buf(),
        }
    }

    /// Load and parse a definition by storage name
    ///
    /// # Arguments
    /// * `name` - file name inside the prompts directory; the extension may be
    ///   omitted, in which case `.yaml` then `.yml` are tried
    pub fn load(&self, name: &str) -> Result<PromptDefinition> {
        let path = self
            .resolve(name)
            .ok_or_else(|| PlaygroundError::NotFound(format!("prompt '{}' in {}", name, self.prompts_dir.display())))?;

        debug!("Loading prompt '{}' from {}", name, path.display());
        let content = fs::read_to_string(&path)?;
        parse_definition(name, &content)
    }

    /// Find the file backing `name`, if any
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        let direct = self.prompts_dir.join(name);
        if direct.is_file() {
            return Some(direct);
        }

        if Path::new(name).extension().is_some() {
            return None;
        }

        PROMPT_EXTENSIONS
            .iter()
            .map(|ext| self.prompts_dir.join(format!("{}.{}", name, ext)))
            .find(|p| p.is_file())
    }

    /// List prompt files in the directory, sorted by name
    pub fn list_available(&self) -> Result<Vec<String>> {
        if !self.prompts_dir.exists() {
            return Ok(Vec::new());
        }

        let mut prompts = Vec::new();
        for entry in fs::read_dir(&self.prompts_dir)?.flatten() {
            let path = entry.path();
            if path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| PROMPT_EXTENSIONS.contains(&ext))
                && let Some(file_name) = path.file_name().and_then(|n| n.to_str())
            {
                prompts.push(file_name.to_string());
            }
        }

        prompts.sort();
        Ok(prompts)
    }

    /// Write a starter definition to `<name>.yaml`
    pub fn scaffold(&self, name: &str) -> Result<PathBuf> {
        let path = self.prompts_dir.join(format!("{}.yaml", name));
        if path.exists() {
            return Err(PlaygroundError::AlreadyExists(path.display().to_string()));
        }

        fs::create_dir_all(&self.prompts_dir)?;
        let yaml = serde_yaml::to_string(&PromptDefinition::scaffold(name))?;
        fs::write(&path, yaml)?;

        info!("Scaffolded prompt at {}", path.display());
        Ok(path)
    }

    pub fn prompts_dir(&self) -> &Path {
        &self.prompts_dir
    }
}

/// Parse YAML content into a definition, reporting shape problems as format errors
pub fn parse_definition(name: &str, content: &str) -> Result<PromptDefinition> {
    serde_yaml::from_str(content).map_err(|e| PlaygroundError::Format(format!("prompt '{}': {}", name, e)))
}
