//! Flat-rate cost estimation
//!
//! One rate applies to every model; this is an approximation for comparing
//! prompts, not a billing calculation.

/// USD per token (gpt-3.5-turbo tier)
pub const DEFAULT_RATE_PER_TOKEN: f64 = 0.000002;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostEstimator {
    rate_per_token: f64,
}

impl Default for CostEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_RATE_PER_TOKEN)
    }
}

impl CostEstimator {
    pub fn new(rate_per_token: f64) -> Self {
        Self { rate_per_token }
    }

    pub fn rate_per_token(&self) -> f64 {
        self.rate_per_token
    }

    /// Estimated cost in USD for `total_tokens`
    pub fn estimate(&self, total_tokens: u64) -> f64 {
        total_tokens as f64 * self.rate_per_token
    }
}

/// Format a cost the way transcripts and the console show it
pub fn format_cost(cost: f64) -> String {
    format!("{:.6}", cost)
}
