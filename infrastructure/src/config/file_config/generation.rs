//! Generation configuration from TOML (`[generation]` section)

use remedy_application::{GenerationConfig, GenerationParams};
use remedy_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Sampling knobs for one request kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FileGenerationParams {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl FileGenerationParams {
    fn issues(&self, section: &str) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if !(0.0..=1.0).contains(&self.temperature) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::TemperatureOutOfRange,
                format!(
                    "generation.{}.temperature must be within [0, 1], got {}",
                    section, self.temperature
                ),
            ));
        }
        if self.max_output_tokens == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroMaxTokens,
                format!("generation.{}.max_output_tokens must be positive", section),
            ));
        }
        issues
    }
}

impl From<FileGenerationParams> for GenerationParams {
    fn from(params: FileGenerationParams) -> Self {
        GenerationParams::new(params.temperature, params.max_output_tokens)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    /// Remedy call (default: temperature 0.3, 256 tokens)
    pub remedy: FileGenerationParams,
    /// Shopping-list fallback (default: temperature 0.5, 100 tokens)
    pub shopping_list: FileGenerationParams,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        let defaults = GenerationConfig::default();
        Self {
            remedy: FileGenerationParams {
                temperature: defaults.remedy.temperature,
                max_output_tokens: defaults.remedy.max_output_tokens,
            },
            shopping_list: FileGenerationParams {
                temperature: defaults.shopping_list.temperature,
                max_output_tokens: defaults.shopping_list.max_output_tokens,
            },
        }
    }
}

impl FileGenerationConfig {
    pub fn to_generation_config(&self) -> GenerationConfig {
        GenerationConfig::default()
            .with_remedy(self.remedy.into())
            .with_shopping_list(self.shopping_list.into())
    }

    pub fn issues(&self) -> Vec<ConfigIssue> {
        let mut issues = self.remedy.issues("remedy");
        issues.extend(self.shopping_list.issues("shopping_list"));
        issues
    }
}
