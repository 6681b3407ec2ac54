//! Generate Remedy use case (the Orchestrator).
//!
//! One pass per request, no retries:
//!
//! ```text
//! FILTER_ALLERGIES ─┬─ empty ──────────────────────────────► SHOPPING_FALLBACK
//!                   └─ non-empty ─► CACHE_LOOKUP ─┬─ hit ──► RETURN_CACHED
//!                                                 └─ miss ─► GENERATE
//! GENERATE ─┬─ transport failure ─► RETURN_FAILURE
//!           └─ text ─► INTERPRET ─┬─ NoRemedy ─► SHOPPING_FALLBACK
//!                                 ├─ Remedy ───► PERSIST ─► RETURN_REMEDY
//!                                 └─ Malformed ► RETURN_FAILURE
//! ```
//!
//! The provider is chosen by the caller; the use case only sees
//! `&dyn LlmGateway`.

use crate::config::GenerationConfig;
use crate::ports::household_repository::HouseholdRepository;
use crate::ports::llm_gateway::{GenerationRequest, LlmGateway};
use crate::ports::remedy_repository::{RemedyRepository, RepositoryError};
use crate::ports::usage_recorder::{NoUsageRecorder, UsagePurpose, UsageRecorder};
use crate::use_cases::shared::call_provider;
use crate::use_cases::suggest_groceries::SuggestGroceriesUseCase;
use remedy_domain::remedy::interpreter::excerpt;
use remedy_domain::{
    AccountId, AllergyList, IngredientKey, Interpretation, KidId, RemedyPromptTemplate,
    RemedyRecord, RemedyResult, ShoppingListRecord, filter_allergies, interpret,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Longest raw provider payload copied into a warning
const RAW_LOG_LIMIT: usize = 4096;

/// Errors that end a request before any provider is consulted.
///
/// Provider and parse problems are not errors here; they are folded into
/// [`RemedyResult::Failure`].
#[derive(Error, Debug)]
pub enum GenerateRemedyError {
    #[error("Kid {0} is not accessible")]
    KidNotAccessible(KidId),

    #[error("Kid {0} has no symptom")]
    NoSymptom(KidId),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Input for the [`GenerateRemedyUseCase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateRemedyInput {
    pub account_id: AccountId,
    pub kid_id: KidId,
}

/// A transient remedy request with its ingredients already allergy-filtered.
#[derive(Debug, Clone, PartialEq)]
pub struct RemedyRequest {
    pub kid_id: KidId,
    pub account_id: AccountId,
    pub symptom: String,
    pub ingredients: Vec<String>,
}

/// What a request produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RemedyOutcome {
    pub kid_id: KidId,
    pub symptom: String,
    /// Allergy-filtered ingredients the remedy was requested with
    pub ingredients: Vec<String>,
    pub result: RemedyResult,
    /// Whether the remedy came from history instead of a provider call
    pub cached: bool,
}

/// Use case for producing a remedy for one kid.
pub struct GenerateRemedyUseCase {
    remedies: Arc<dyn RemedyRepository>,
    household: Arc<dyn HouseholdRepository>,
    groceries: SuggestGroceriesUseCase,
    usage_recorder: Arc<dyn UsageRecorder>,
    config: GenerationConfig,
}

impl Clone for GenerateRemedyUseCase {
    fn clone(&self) -> Self {
        Self {
            remedies: self.remedies.clone(),
            household: self.household.clone(),
            groceries: self.groceries.clone(),
            usage_recorder: self.usage_recorder.clone(),
            config: self.config,
        }
    }
}

impl GenerateRemedyUseCase {
    pub fn new(
        remedies: Arc<dyn RemedyRepository>,
        household: Arc<dyn HouseholdRepository>,
        config: GenerationConfig,
    ) -> Self {
        Self {
            remedies,
            household,
            groceries: SuggestGroceriesUseCase::new(config.shopping_list),
            usage_recorder: Arc::new(NoUsageRecorder),
            config,
        }
    }

    /// Create with a usage recorder, shared with the shopping-list fallback.
    pub fn with_usage_recorder(mut self, recorder: Arc<dyn UsageRecorder>) -> Self {
        self.groceries = self.groceries.with_usage_recorder(recorder.clone());
        self.usage_recorder = recorder;
        self
    }

    /// Load the kid's symptom and the account's available ingredients, then orchestrate.
    pub async fn execute(
        &self,
        gateway: &dyn LlmGateway,
        input: GenerateRemedyInput,
    ) -> Result<RemedyOutcome, GenerateRemedyError> {
        let kid = self
            .household
            .find_kid(input.kid_id)
            .await?
            .filter(|kid| kid.belongs_to(input.account_id))
            .ok_or(GenerateRemedyError::KidNotAccessible(input.kid_id))?;

        let symptom = kid
            .symptom
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(GenerateRemedyError::NoSymptom(kid.id))?
            .to_string();

        let available: Vec<String> = self
            .household
            .ingredients_for_account(input.account_id)
            .await?
            .into_iter()
            .filter(|i| i.is_available)
            .map(|i| i.name)
            .collect();

        let allergies = AllergyList::parse(kid.allergies.as_deref());
        let ingredients = filter_allergies(&available, &allergies);
        debug!(
            kid_id = kid.id,
            available = available.len(),
            filtered = ingredients.len(),
            "Applied allergy filter"
        );

        let request = RemedyRequest {
            kid_id: kid.id,
            account_id: input.account_id,
            symptom,
            ingredients,
        };
        Ok(self.orchestrate(gateway, request).await?)
    }

    /// Run the state machine for an already filtered request.
    pub async fn orchestrate(
        &self,
        gateway: &dyn LlmGateway,
        request: RemedyRequest,
    ) -> Result<RemedyOutcome, RepositoryError> {
        info!(
            provider = %gateway.kind(),
            kid_id = request.kid_id,
            symptom = %request.symptom,
            "Generating remedy"
        );

        if request.ingredients.is_empty() {
            debug!("No usable ingredients, going straight to shopping list");
            return self.fall_back(gateway, request).await;
        }

        let key = IngredientKey::new(&request.ingredients);
        if let Some(record) = self.remedies.find_remedy(&request.symptom, &key).await?
            && let Some(remedy) = record.instruction()
        {
            info!(remedy = remedy.remedy_name(), "Serving cached remedy");
            self.remedies
                .save_remedy(RemedyRecord::new(
                    request.kid_id,
                    request.account_id,
                    request.symptom.clone(),
                    &remedy,
                    &request.ingredients,
                ))
                .await?;
            return Ok(outcome(request, RemedyResult::Remedy(remedy), true));
        }

        let prompt = GenerationRequest::new(
            RemedyPromptTemplate::remedy_system(),
            RemedyPromptTemplate::remedy_user(&request.symptom, &request.ingredients),
            self.config.remedy.temperature,
            self.config.remedy.max_output_tokens,
        );
        let generation = match call_provider(
            gateway,
            &prompt,
            UsagePurpose::Remedy,
            self.usage_recorder.as_ref(),
        )
        .await
        {
            Ok(generation) => generation,
            Err(e) => {
                warn!(provider = %gateway.kind(), error = %e, "Remedy call failed");
                let failure = RemedyResult::provider_failure(gateway.kind().display_name());
                return Ok(outcome(request, failure, false));
            }
        };

        match interpret(&generation.text) {
            Interpretation::NoRemedy => {
                info!("Provider reported no remedy possible");
                self.fall_back(gateway, request).await
            }
            Interpretation::Remedy(remedy) => {
                self.remedies
                    .save_remedy(RemedyRecord::new(
                        request.kid_id,
                        request.account_id,
                        request.symptom.clone(),
                        &remedy,
                        &request.ingredients,
                    ))
                    .await?;
                info!(remedy = remedy.remedy_name(), "Stored new remedy");
                Ok(outcome(request, RemedyResult::Remedy(remedy), false))
            }
            Interpretation::Malformed { reason } => {
                warn!(
                    provider = %gateway.kind(),
                    reason = %reason,
                    raw = excerpt(&generation.text, RAW_LOG_LIMIT),
                    "Could not interpret provider output"
                );
                Ok(outcome(request, RemedyResult::parse_failure(reason), false))
            }
        }
    }

    async fn fall_back(
        &self,
        gateway: &dyn LlmGateway,
        request: RemedyRequest,
    ) -> Result<RemedyOutcome, RepositoryError> {
        let result = self.groceries.execute(gateway, &request.symptom).await;
        if let RemedyResult::ShoppingList(list) = &result {
            self.remedies
                .save_shopping_list(ShoppingListRecord::new(
                    request.kid_id,
                    request.account_id,
                    request.symptom.clone(),
                    list,
                ))
                .await?;
        }
        Ok(outcome(request, result, false))
    }
}

fn outcome(request: RemedyRequest, result: RemedyResult, cached: bool) -> RemedyOutcome {
    RemedyOutcome {
        kid_id: request.kid_id,
        symptom: request.symptom,
        ingredients: request.ingredients,
        result,
        cached,
    }
}
