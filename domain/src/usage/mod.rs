//! Token usage and cost value objects
//!
//! Usage numbers are telemetry only: they are logged per provider call and
//! never stored with remedies.

use serde::{Deserialize, Serialize};

const TOKENS_PER_MILLION: f64 = 1_000_000.0;

/// Token counters reported by a provider for one call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

impl TokenUsage {
    /// Build from prompt/completion counts; `total` falls back to their sum when absent
    pub fn new(prompt_tokens: u64, completion_tokens: u64, total_tokens: Option<u64>) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: total_tokens
                .unwrap_or_else(|| prompt_tokens.saturating_add(completion_tokens)),
        }
    }
}

/// Per-million-token prices in USD
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    pub input_per_million: f64,
    pub output_per_million: f64,
}

impl Pricing {
    pub fn new(input_per_million: f64, output_per_million: f64) -> Self {
        Self {
            input_per_million,
            output_per_million,
        }
    }

    pub fn cost(&self, usage: &TokenUsage) -> CostBreakdown {
        let input = usage.prompt_tokens as f64 * self.input_per_million / TOKENS_PER_MILLION;
        let output = usage.completion_tokens as f64 * self.output_per_million / TOKENS_PER_MILLION;
        CostBreakdown {
            input_cost: input,
            output_cost: output,
            total_cost: input + output,
        }
    }
}

/// Monetary cost of one call, in USD
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub input_cost: f64,
    pub output_cost: f64,
    pub total_cost: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_defaults_to_sum() {
        let usage = TokenUsage::new(120, 80, None);
        assert_eq!(usage.total_tokens, 200);

        let reported = TokenUsage::new(120, 80, Some(210));
        assert_eq!(reported.total_tokens, 210);
    }

    #[test]
    fn test_total_saturates_on_huge_counts() {
        let usage = TokenUsage::new(u64::MAX, 5, None);
        assert_eq!(usage.total_tokens, u64::MAX);
    }

    #[test]
    fn test_cost() {
        let pricing = Pricing::new(0.15, 0.60);
        let cost = pricing.cost(&TokenUsage::new(1_000_000, 500_000, None));

        assert!((cost.input_cost - 0.15).abs() < 1e-9);
        assert!((cost.output_cost - 0.30).abs() < 1e-9);
        assert!((cost.total_cost - 0.45).abs() < 1e-9);
    }

    #[test]
    fn test_zero_usage_is_free() {
        let cost = Pricing::new(0.59, 0.79).cost(&TokenUsage::default());
        assert_eq!(cost, CostBreakdown::default());
    }
}
