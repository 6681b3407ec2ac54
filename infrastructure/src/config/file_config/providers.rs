//! Provider configuration from TOML (`[providers]` section)
//!
//! Every field is optional; unset fields fall back to per-provider defaults
//! when the section is resolved into [`ProviderSettings`].

use crate::providers::ProviderSettings;
use remedy_domain::{ConfigIssue, ConfigIssueCode, Pricing, ProviderKind};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Provider calls without an explicit timeout give up after this long
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Built-in endpoint, model and pricing for one provider
struct ProviderDefaults {
    api_key_env: &'static str,
    base_url: &'static str,
    model: &'static str,
    input_price_per_million: f64,
    output_price_per_million: f64,
}

fn defaults_for(kind: ProviderKind) -> ProviderDefaults {
    match kind {
        ProviderKind::OpenAi => ProviderDefaults {
            api_key_env: "OPENAI_API_KEY",
            base_url: "https://api.openai.com/v1",
            model: "gpt-4o-mini",
            input_price_per_million: 0.15,
            output_price_per_million: 0.60,
        },
        ProviderKind::Gemini => ProviderDefaults {
            api_key_env: "GEMINI_API_KEY",
            base_url: "https://generativelanguage.googleapis.com/v1beta",
            model: "gemini-1.5-flash",
            input_price_per_million: 0.075,
            output_price_per_million: 0.30,
        },
        ProviderKind::Groq => ProviderDefaults {
            api_key_env: "GROQ_API_KEY",
            base_url: "https://api.groq.com/openai/v1",
            model: "llama-3.3-70b-versatile",
            input_price_per_million: 0.59,
            output_price_per_million: 0.79,
        },
    }
}

/// Settings of a single provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Environment variable holding the API key (default: `<PROVIDER>_API_KEY`).
    pub api_key_env: Option<String>,
    /// Direct API key (not recommended; prefer the env var).
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    /// USD per million prompt tokens
    pub input_price_per_million: Option<f64>,
    /// USD per million completion tokens
    pub output_price_per_million: Option<f64>,
    /// Per-call timeout (default: 60)
    pub timeout_secs: Option<u64>,
}

impl FileProviderConfig {
    /// Name of the environment variable consulted for the key
    pub fn api_key_env(&self, kind: ProviderKind) -> String {
        self.api_key_env
            .clone()
            .unwrap_or_else(|| defaults_for(kind).api_key_env.to_string())
    }

    /// Resolve against the process environment.
    pub fn resolve(&self, kind: ProviderKind) -> Option<ProviderSettings> {
        self.resolve_with(kind, |name| std::env::var(name).ok())
    }

    /// Resolve using `lookup` for environment variables.
    ///
    /// Returns `None` when no non-empty API key can be found.
    pub fn resolve_with(
        &self,
        kind: ProviderKind,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Option<ProviderSettings> {
        let defaults = defaults_for(kind);
        let api_key = self
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| lookup(&self.api_key_env(kind)).filter(|key| !key.trim().is_empty()))?;

        Some(ProviderSettings {
            kind,
            api_key,
            base_url: self
                .base_url
                .clone()
                .unwrap_or_else(|| defaults.base_url.to_string()),
            model: self
                .model
                .clone()
                .unwrap_or_else(|| defaults.model.to_string()),
            pricing: Pricing::new(
                self.input_price_per_million
                    .unwrap_or(defaults.input_price_per_million),
                self.output_price_per_million
                    .unwrap_or(defaults.output_price_per_million),
            ),
            timeout: Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    pub openai: FileProviderConfig,
    pub gemini: FileProviderConfig,
    pub groq: FileProviderConfig,
}

impl FileProvidersConfig {
    pub fn get(&self, kind: ProviderKind) -> &FileProviderConfig {
        match kind {
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::Gemini => &self.gemini,
            ProviderKind::Groq => &self.groq,
        }
    }

    /// Settings for every provider that has a key, in [`ProviderKind::ALL`] order
    pub fn resolve_all_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Vec<ProviderSettings> {
        ProviderKind::ALL
            .iter()
            .filter_map(|&kind| self.get(kind).resolve_with(kind, &lookup))
            .collect()
    }

    pub fn resolve_all(&self) -> Vec<ProviderSettings> {
        self.resolve_all_with(|name| std::env::var(name).ok())
    }

    pub fn issues_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let mut configured = 0;

        for &kind in ProviderKind::ALL.iter() {
            let provider = self.get(kind);
            if provider.timeout_secs == Some(0) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::ZeroTimeout,
                    format!("providers.{}.timeout_secs cannot be 0", kind),
                ));
            }
            if provider.resolve_with(kind, &lookup).is_some() {
                configured += 1;
            } else {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::MissingApiKey,
                    format!(
                        "providers.{}: no API key (set {} or providers.{}.api_key); provider disabled",
                        kind,
                        provider.api_key_env(kind),
                        kind
                    ),
                ));
            }
        }

        if configured == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::NoProviderConfigured,
                "no provider has an API key; every remedy request will be rejected",
            ));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults() {
        let provider = FileProviderConfig::default();
        let settings = provider
            .resolve_with(ProviderKind::Groq, |name| {
                (name == "GROQ_API_KEY").then(|| "gsk-test".to_string())
            })
            .unwrap();

        assert_eq!(settings.api_key, "gsk-test");
        assert_eq!(settings.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(settings.model, "llama-3.3-70b-versatile");
        assert_eq!(settings.pricing, Pricing::new(0.59, 0.79));
        assert_eq!(settings.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_direct_key_wins_over_env() {
        let provider = FileProviderConfig {
            api_key: Some("direct".to_string()),
            model: Some("gpt-4o".to_string()),
            ..Default::default()
        };
        let settings = provider
            .resolve_with(ProviderKind::OpenAi, |_| Some("from-env".to_string()))
            .unwrap();

        assert_eq!(settings.api_key, "direct");
        assert_eq!(settings.model, "gpt-4o");
    }

    #[test]
    fn test_custom_env_name() {
        let provider = FileProviderConfig {
            api_key_env: Some("MY_GEMINI".to_string()),
            ..Default::default()
        };
        assert!(provider.resolve_with(ProviderKind::Gemini, no_env).is_none());
        assert!(
            provider
                .resolve_with(ProviderKind::Gemini, |name| (name == "MY_GEMINI")
                    .then(|| "k".to_string()))
                .is_some()
        );
    }

    #[test]
    fn test_blank_key_is_missing() {
        let provider = FileProviderConfig {
            api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(provider.resolve_with(ProviderKind::OpenAi, no_env).is_none());
    }

    #[test]
    fn test_resolve_all_skips_unconfigured() {
        let providers = FileProvidersConfig {
            gemini: FileProviderConfig {
                api_key: Some("g".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let settings = providers.resolve_all_with(no_env);
        assert_eq!(settings.len(), 1);
        assert_eq!(settings[0].kind, ProviderKind::Gemini);
    }

    #[test]
    fn test_missing_keys_are_warnings() {
        let issues = FileProvidersConfig::default().issues_with(no_env);
        assert_eq!(issues.len(), 4);
        assert!(!remedy_domain::config::has_errors(&issues));
        assert_eq!(issues[3].code, ConfigIssueCode::NoProviderConfigured);
    }

    #[test]
    fn test_zero_timeout_is_error() {
        let providers = FileProvidersConfig {
            openai: FileProviderConfig {
                api_key: Some("k".to_string()),
                timeout_secs: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };
        let issues = providers.issues_with(no_env);
        assert!(issues.iter().any(|i| i.code == ConfigIssueCode::ZeroTimeout));
        assert!(remedy_domain::config::has_errors(&issues));
    }
}
