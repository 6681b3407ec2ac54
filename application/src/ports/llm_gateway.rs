//! LLM Gateway port
//!
//! Defines the interface for communicating with LLM providers.

use async_trait::async_trait;
use remedy_domain::{Pricing, ProviderKind, TokenUsage};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Provider returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Provider returned no text")]
    EmptyResponse,

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// A single text-generation call: two prompt segments plus sampling knobs
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl GenerationRequest {
    pub fn new(
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
        temperature: f32,
        max_output_tokens: u32,
    ) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            temperature,
            max_output_tokens,
        }
    }
}

/// Raw provider answer
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub text: String,
    /// Model that served the call, as reported by the adapter
    pub model: String,
    /// Token counters, when the provider reports them
    pub usage: Option<TokenUsage>,
}

/// Gateway for LLM communication
///
/// This port defines how the application layer communicates with LLM providers.
/// Implementations (adapters) live in the infrastructure layer. One attempt is
/// made per call; adapters never retry.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Which backend this gateway talks to
    fn kind(&self) -> ProviderKind;

    /// Prices used to turn reported usage into cost telemetry
    fn pricing(&self) -> Pricing;

    /// Send one request and return the generated text
    async fn generate(&self, request: &GenerationRequest) -> Result<Generation, GatewayError>;
}

/// Lookup of the configured gateway for each provider
///
/// Providers without credentials are simply absent.
pub trait GatewayRegistry: Send + Sync {
    fn gateway(&self, kind: ProviderKind) -> Option<Arc<dyn LlmGateway>>;

    /// Providers that can serve requests
    fn configured(&self) -> Vec<ProviderKind>;
}
