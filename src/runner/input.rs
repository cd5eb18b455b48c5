//! Resolving the shared input of a comparison

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{PlaygroundError, Result};

#[derive(Debug, Deserialize)]
struct InputFile {
    input: String,
}

/// Where the comparison input comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Text given on the command line
    Inline(String),
    /// YAML file with an `input` field
    File(PathBuf),
}

impl InputSource {
    /// Pick the source from exactly one of `input` and `input_file`
    ///
    /// An empty inline input counts as absent.
    pub fn from_flags(input: Option<&str>, input_file: Option<&Path>) -> Result<Self> {
        let input = input.filter(|s| !s.is_empty());
        match (input, input_file) {
            (Some(text), None) => Ok(Self::Inline(text.to_string())),
            (None, Some(path)) => Ok(Self::File(path.to_path_buf())),
            (Some(_), Some(_)) => Err(PlaygroundError::Usage(
                "provide either --input or --input-file, not both".to_string(),
            )),
            (None, None) => Err(PlaygroundError::Usage(
                "you must provide either --input or --input-file".to_string(),
            )),
        }
    }

    /// The input text, reading the file if there is one
    pub fn read(&self) -> Result<String> {
        match self {
            Self::Inline(text) => Ok(text.clone()),
            Self::File(path) => read_input_file(path),
        }
    }
}

/// Read the `input` field of a YAML input file
fn read_input_file(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(PlaygroundError::NotFound(format!("input file {}", path.display())));
    }
    let content = fs::read_to_string(path)?;
    let parsed: InputFile = serde_yaml::from_str(&content)
        .map_err(|e| PlaygroundError::Format(format!("input file {}: {}", path.display(), e)))?;
    Ok(parsed.input)
}
