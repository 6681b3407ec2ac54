//! OpenAI-compatible chat completions adapter.
//!
//! `POST {base_url}/chat/completions` with bearer auth. Serves both OpenAI
//! and Groq, which differ only in endpoint, model and pricing.

use super::{ProviderSettings, ensure_success, http_client, map_transport_error};
use async_trait::async_trait;
use remedy_application::ports::llm_gateway::{
    GatewayError, Generation, GenerationRequest, LlmGateway,
};
use remedy_domain::{Pricing, ProviderKind, TokenUsage};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    model: Option<String>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
    total_tokens: Option<u64>,
}

pub struct ChatCompletionsGateway {
    client: reqwest::Client,
    settings: ProviderSettings,
}

impl ChatCompletionsGateway {
    pub fn new(settings: ProviderSettings) -> Result<Self, GatewayError> {
        Ok(Self {
            client: http_client(settings.timeout)?,
            settings,
        })
    }
}

#[async_trait]
impl LlmGateway for ChatCompletionsGateway {
    fn kind(&self) -> ProviderKind {
        self.settings.kind
    }

    fn pricing(&self) -> Pricing {
        self.settings.pricing
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<Generation, GatewayError> {
        let url = format!("{}/chat/completions", self.settings.base());
        let body = ChatRequest {
            model: &self.settings.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_prompt,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_output_tokens,
        };

        debug!(provider = %self.settings.kind, model = %self.settings.model, "Sending chat completion");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let parsed: ChatResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(map_transport_error)?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(GatewayError::EmptyResponse)?;

        Ok(Generation {
            text,
            model: parsed.model.unwrap_or_else(|| self.settings.model.clone()),
            usage: parsed.usage.map(|u| {
                TokenUsage::new(u.prompt_tokens, u.completion_tokens, u.total_tokens)
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::test_settings;
    use httpmock::prelude::*;
    use serde_json::json;

    fn request() -> GenerationRequest {
        GenerationRequest::new("system text", "user text", 0.3, 256)
    }

    #[tokio::test]
    async fn test_generate_parses_text_and_usage() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .header("authorization", "Bearer test-key")
                    .json_body_partial(
                        r#"{"model": "gpt-4o-mini", "max_tokens": 256,
                            "messages": [{"role": "system", "content": "system text"},
                                         {"role": "user", "content": "user text"}]}"#,
                    );
                then.status(200).json_body(json!({
                    "model": "gpt-4o-mini-2024-07-18",
                    "choices": [{"message": {"role": "assistant", "content": "{\"remedy_name\": \"Tea\"}"}}],
                    "usage": {"prompt_tokens": 120, "completion_tokens": 30, "total_tokens": 150}
                }));
            })
            .await;

        let gateway =
            ChatCompletionsGateway::new(test_settings(ProviderKind::OpenAi, server.base_url()))
                .unwrap();
        let generation = gateway.generate(&request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(generation.text, "{\"remedy_name\": \"Tea\"}");
        assert_eq!(generation.model, "gpt-4o-mini-2024-07-18");
        assert_eq!(generation.usage, Some(TokenUsage::new(120, 30, Some(150))));
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(429).body("rate limited");
            })
            .await;

        let gateway =
            ChatCompletionsGateway::new(test_settings(ProviderKind::Groq, server.base_url()))
                .unwrap();
        let err = gateway.generate(&request()).await.unwrap_err();

        assert!(matches!(
            err,
            GatewayError::HttpStatus { status: 429, ref body } if body == "rate limited"
        ));
    }

    #[tokio::test]
    async fn test_empty_choices_is_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200).json_body(json!({"choices": []}));
            })
            .await;

        let gateway =
            ChatCompletionsGateway::new(test_settings(ProviderKind::OpenAi, server.base_url()))
                .unwrap();
        let err = gateway.generate(&request()).await.unwrap_err();

        assert!(matches!(err, GatewayError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_missing_usage_is_tolerated() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200)
                    .json_body(json!({"choices": [{"message": {"content": "Honey, Lemon"}}]}));
            })
            .await;

        let gateway =
            ChatCompletionsGateway::new(test_settings(ProviderKind::Groq, server.base_url()))
                .unwrap();
        let generation = gateway.generate(&request()).await.unwrap();

        assert_eq!(generation.text, "Honey, Lemon");
        assert_eq!(generation.model, "llama-3.3-70b-versatile");
        assert!(generation.usage.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_error() {
        let gateway = ChatCompletionsGateway::new(test_settings(
            ProviderKind::OpenAi,
            "http://127.0.0.1:1".to_string(),
        ))
        .unwrap();
        assert!(gateway.generate(&request()).await.is_err());
    }
}
