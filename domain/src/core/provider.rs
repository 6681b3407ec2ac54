//! Provider value object identifying an LLM backend

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// LLM backends a remedy can be generated with (Value Object)
///
/// Each variant is served by one provider adapter in the infrastructure
/// layer. The orchestration logic never depends on which one it talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Gemini,
    Groq,
}

impl ProviderKind {
    /// All known providers, in registration order
    pub const ALL: [ProviderKind; 3] = [ProviderKind::OpenAi, ProviderKind::Gemini, ProviderKind::Groq];

    /// Get the path/config identifier for this provider
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Groq => "groq",
        }
    }

    /// Human readable name used in failure messages
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OpenAI",
            ProviderKind::Gemini => "Gemini",
            ProviderKind::Groq => "Groq",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "openai" | "open_ai" => Ok(ProviderKind::OpenAi),
            "gemini" | "gemini_client" => Ok(ProviderKind::Gemini),
            "groq" | "groq_client" => Ok(ProviderKind::Groq),
            _ => Err(DomainError::UnknownProvider(s.to_string())),
        }
    }
}
