//! Suggest Groceries use case (shopping-list fallback).
//!
//! Asks the same provider that failed to produce a remedy for the minimum
//! grocery items to buy. Uses its own low-temperature, short-output
//! [`GenerationParams`], distinct from the remedy call.

use crate::config::GenerationParams;
use crate::ports::llm_gateway::{GenerationRequest, LlmGateway};
use crate::ports::usage_recorder::{NoUsageRecorder, UsagePurpose, UsageRecorder};
use crate::use_cases::shared::call_provider;
use remedy_domain::{RemedyPromptTemplate, RemedyResult, ShoppingList};
use std::sync::Arc;
use tracing::{info, warn};

/// Use case producing a [`RemedyResult::ShoppingList`] or a provider failure.
#[derive(Clone)]
pub struct SuggestGroceriesUseCase {
    params: GenerationParams,
    usage_recorder: Arc<dyn UsageRecorder>,
}

impl SuggestGroceriesUseCase {
    pub fn new(params: GenerationParams) -> Self {
        Self {
            params,
            usage_recorder: Arc::new(NoUsageRecorder),
        }
    }

    pub fn with_usage_recorder(mut self, recorder: Arc<dyn UsageRecorder>) -> Self {
        self.usage_recorder = recorder;
        self
    }

    /// Ask `gateway` for a comma separated grocery list for `symptom`.
    ///
    /// Never fails: transport errors become [`RemedyResult::Failure`].
    pub async fn execute(&self, gateway: &dyn LlmGateway, symptom: &str) -> RemedyResult {
        let request = GenerationRequest::new(
            RemedyPromptTemplate::shopping_system(),
            RemedyPromptTemplate::shopping_user(symptom),
            self.params.temperature,
            self.params.max_output_tokens,
        );

        match call_provider(
            gateway,
            &request,
            UsagePurpose::ShoppingList,
            self.usage_recorder.as_ref(),
        )
        .await
        {
            Ok(generation) => {
                let list = ShoppingList::new(generation.text);
                info!(
                    provider = %gateway.kind(),
                    symptom,
                    items = list.items().len(),
                    "Suggested groceries"
                );
                RemedyResult::ShoppingList(list)
            }
            Err(e) => {
                warn!(provider = %gateway.kind(), error = %e, "Shopping-list call failed");
                RemedyResult::provider_failure(gateway.kind().display_name())
            }
        }
    }
}
