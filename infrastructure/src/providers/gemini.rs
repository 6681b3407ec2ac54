//! Gemini `generateContent` adapter.
//!
//! `POST {base_url}/models/{model}:generateContent?key=<api key>`. Gemini has
//! no system role on this endpoint, so both prompts travel as one user part.

use super::{ProviderSettings, ensure_success, http_client, map_transport_error};
use async_trait::async_trait;
use remedy_application::ports::llm_gateway::{
    GatewayError, Generation, GenerationRequest, LlmGateway,
};
use remedy_domain::{Pricing, ProviderKind, RemedyPromptTemplate, TokenUsage};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationSettings,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationSettings {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
    total_token_count: Option<u64>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

pub struct GeminiGateway {
    client: reqwest::Client,
    settings: ProviderSettings,
}

impl GeminiGateway {
    pub fn new(settings: ProviderSettings) -> Result<Self, GatewayError> {
        Ok(Self {
            client: http_client(settings.timeout)?,
            settings,
        })
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn pricing(&self) -> Pricing {
        self.settings.pricing
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<Generation, GatewayError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.settings.base(),
            self.settings.model
        );
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart {
                    text: RemedyPromptTemplate::inline(&request.system_prompt, &request.user_prompt),
                }],
            }],
            generation_config: GenerationSettings {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
            },
        };

        debug!(model = %self.settings.model, "Sending Gemini generateContent");
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.settings.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let parsed: GenerateContentResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(map_transport_error)?;

        let text = parsed.text().ok_or(GatewayError::EmptyResponse)?;

        Ok(Generation {
            text,
            model: parsed
                .model_version
                .unwrap_or_else(|| self.settings.model.clone()),
            usage: parsed.usage_metadata.map(|u| {
                TokenUsage::new(
                    u.prompt_token_count,
                    u.candidates_token_count,
                    u.total_token_count,
                )
            }),
        })
    }
}
