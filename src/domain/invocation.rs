//! Records produced by running prompts

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Outcome of one model call for one prompt definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationResult {
    /// Storage name the definition was loaded from
    pub prompt_id: String,
    pub model: String,
    pub rendered_prompt: String,
    pub output: String,
    /// Counted locally before the call
    pub prompt_tokens: u64,
    /// As reported by the remote service
    pub completion_tokens: u64,
    /// As reported by the remote service
    pub total_tokens: u64,
    pub cost_usd: f64,
}

/// Ordered results of running one input through several prompts
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonBatch {
    pub input: String,
    pub results: Vec<InvocationResult>,
    pub transcript_path: PathBuf,
    pub summary_path: PathBuf,
}

impl ComparisonBatch {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn total_cost_usd(&self) -> f64 {
        self.results.iter().map(|r| r.cost_usd).sum()
    }

    pub fn total_tokens(&self) -> u64 {
        self.results.iter().map(|r| r.total_tokens).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: &str, total: u64, cost: f64) -> InvocationResult {
        InvocationResult {
            prompt_id: id.to_string(),
            model: "gpt-3.5-turbo".to_string(),
            rendered_prompt: "p".to_string(),
            output: "o".to_string(),
            prompt_tokens: 1,
            completion_tokens: total - 1,
            total_tokens: total,
            cost_usd: cost,
        }
    }

    #[test]
    fn test_batch_totals() {
        let batch = ComparisonBatch {
            input: "hello".to_string(),
            results: vec![result("a.yaml", 10, 0.5), result("b.yaml", 30, 0.25)],
            transcript_path: PathBuf::from("compare.txt"),
            summary_path: PathBuf::from("compare.csv"),
        };

        assert_eq!(batch.len(), 2);
        assert!(!batch.is_empty());
        assert_eq!(batch.total_tokens(), 40);
        assert_eq!(batch.total_cost_usd(), 0.75);
    }
}
