//! Token counting with model-specific tiktoken encodings

use std::fmt;

use tiktoken_rs::CoreBPE;

use crate::error::{PlaygroundError, Result};

/// Counts tokens for one model family
pub struct TokenCounter {
    model: String,
    bpe: CoreBPE,
}

impl TokenCounter {
    /// Resolve the encoding for `model`
    pub fn for_model(model: &str) -> Result<Self> {
        let bpe = tiktoken_rs::get_bpe_from_model(model)
            .map_err(|_| PlaygroundError::UnsupportedModel(model.to_string()))?;
        Ok(Self {
            model: model.to_string(),
            bpe,
        })
    }

    /// Number of tokens `text` occupies
    pub fn count(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl fmt::Debug for TokenCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCounter").field("model", &self.model).finish()
    }
}

/// One-shot count of `text` under `model`'s tokenizer
pub fn count_tokens(model: &str, text: &str) -> Result<usize> {
    Ok(TokenCounter::for_model(model)?.count(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_known_model() {
        let counter = TokenCounter::for_model("gpt-3.5-turbo").unwrap();
        assert_eq!(counter.model(), "gpt-3.5-turbo");
        assert!(counter.count("Translate: hello") > 0);
    }

    #[test]
    fn test_count_empty_text() {
        assert_eq!(count_tokens("gpt-4", "").unwrap(), 0);
    }

    #[test]
    fn test_count_non_decreasing_when_doubled() {
        let counter = TokenCounter::for_model("gpt-3.5-turbo").unwrap();
        let phrase = "the quick brown fox jumps over the lazy dog. ";
        let once = counter.count(phrase);
        let twice = counter.count(&phrase.repeat(2));
        let four = counter.count(&phrase.repeat(4));
        assert!(twice >= once);
        assert!(four >= twice);
    }

    #[test]
    fn test_unsupported_model() {
        let result = TokenCounter::for_model("definitely-not-a-model");
        assert!(matches!(result, Err(PlaygroundError::UnsupportedModel(m)) if m == "definitely-not-a-model"));
    }
}
