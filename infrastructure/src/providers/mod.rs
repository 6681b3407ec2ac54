//! LLM provider adapters implementing the [`LlmGateway`] port.
//!
//! - [`chat_completions`]: OpenAI-compatible endpoint, serves OpenAI and Groq
//! - [`gemini`]: Google `generateContent` endpoint
//! - [`registry`]: lookup of the configured gateway for a [`ProviderKind`]
//!
//! Adapters receive an explicit [`ProviderSettings`] at construction and
//! never read credentials from the environment themselves.

pub mod chat_completions;
pub mod gemini;
pub mod registry;

use remedy_application::ports::llm_gateway::GatewayError;
use remedy_domain::{Pricing, ProviderKind};
use std::time::Duration;

pub use chat_completions::ChatCompletionsGateway;
pub use gemini::GeminiGateway;
pub use registry::ProviderRegistry;

/// Longest slice of an error body kept in [`GatewayError::HttpStatus`]
const ERROR_BODY_LIMIT: usize = 512;

/// Resolved settings for one provider
#[derive(Clone, PartialEq)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub pricing: Pricing,
    pub timeout: Duration,
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("kind", &self.kind)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("pricing", &self.pricing)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ProviderSettings {
    /// Endpoint root without a trailing slash
    pub(crate) fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// HTTP client with the per-call timeout applied
pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, GatewayError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| GatewayError::Other(format!("Could not build HTTP client: {}", e)))
}

pub(crate) fn map_transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else if error.is_connect() {
        GatewayError::ConnectionError(error.to_string())
    } else if error.is_decode() {
        GatewayError::InvalidResponse(error.to_string())
    } else {
        GatewayError::Other(error.to_string())
    }
}

/// Turn a non-2xx response into [`GatewayError::HttpStatus`]
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let body = remedy_domain::remedy::interpreter::excerpt(&body, ERROR_BODY_LIMIT).to_string();
    Err(GatewayError::HttpStatus {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
pub(crate) fn test_settings(kind: ProviderKind, base_url: String) -> ProviderSettings {
    ProviderSettings {
        kind,
        api_key: "test-key".to_string(),
        base_url,
        model: match kind {
            ProviderKind::OpenAi => "gpt-4o-mini",
            ProviderKind::Gemini => "gemini-1.5-flash",
            ProviderKind::Groq => "llama-3.3-70b-versatile",
        }
        .to_string(),
        pricing: Pricing::new(0.15, 0.60),
        timeout: Duration::from_secs(5),
    }
}
