//! Generation parameters for provider calls.
//!
//! [`GenerationParams`] holds the sampling knobs of one request kind.
//! [`GenerationConfig`] pairs the remedy call with the distinct low-temperature,
//! short-output configuration of the shopping-list fallback.

use serde::{Deserialize, Serialize};

/// Sampling knobs for one request kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Sampling temperature in `[0, 1]`
    pub temperature: f32,
    /// Upper bound on generated tokens
    pub max_output_tokens: u32,
}

impl GenerationParams {
    pub fn new(temperature: f32, max_output_tokens: u32) -> Self {
        Self {
            temperature,
            max_output_tokens,
        }
    }

    pub fn remedy_default() -> Self {
        Self::new(0.3, 256)
    }

    pub fn shopping_list_default() -> Self {
        Self::new(0.5, 100)
    }
}

/// Parameters for every request kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub remedy: GenerationParams,
    pub shopping_list: GenerationParams,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            remedy: GenerationParams::remedy_default(),
            shopping_list: GenerationParams::shopping_list_default(),
        }
    }
}

impl GenerationConfig {
    // ==================== Builder Methods ====================

    pub fn with_remedy(mut self, params: GenerationParams) -> Self {
        self.remedy = params;
        self
    }

    pub fn with_shopping_list(mut self, params: GenerationParams) -> Self {
        self.shopping_list = params;
        self
    }
}
