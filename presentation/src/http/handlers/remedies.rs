use crate::http::{error::ApiError, extract::CurrentAccount, state::AppState};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use remedy_application::{GenerateRemedyInput, RemedyOutcome};
use remedy_domain::{
    DomainError, FailureKind, KidId, ProviderKind, RemedyInstruction, RemedyResult,
};
use serde::Serialize;
use tracing::{info, warn};

/// Body of a served remedy request
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RemedyResponse {
    Remedy {
        kid_id: KidId,
        symptom: String,
        ingredients: Vec<String>,
        /// `null` when the provider's answer could not be interpreted
        remedy_instructions: Option<RemedyInstruction>,
    },
    ShoppingList {
        kid_id: KidId,
        symptom: String,
        #[serde(rename = "Ingredients_to_Buy")]
        ingredients_to_buy: String,
    },
}

impl TryFrom<RemedyOutcome> for RemedyResponse {
    type Error = ApiError;

    fn try_from(outcome: RemedyOutcome) -> Result<Self, Self::Error> {
        let RemedyOutcome {
            kid_id,
            symptom,
            ingredients,
            result,
            ..
        } = outcome;

        match result {
            RemedyResult::Remedy(instruction) => Ok(Self::Remedy {
                kid_id,
                symptom,
                ingredients,
                remedy_instructions: Some(instruction),
            }),
            RemedyResult::ShoppingList(list) => Ok(Self::ShoppingList {
                kid_id,
                symptom,
                ingredients_to_buy: list.as_str().to_string(),
            }),
            RemedyResult::Failure {
                kind: FailureKind::Parse,
                ..
            } => Ok(Self::Remedy {
                kid_id,
                symptom,
                ingredients,
                remedy_instructions: None,
            }),
            RemedyResult::Failure {
                kind: FailureKind::Provider,
                reason,
            } => Err(ApiError::new(
                StatusCode::BAD_GATEWAY,
                "PROVIDER_FAILURE",
                reason,
            )),
        }
    }
}

/// GET /remedies/{provider}/{kid_id}
pub async fn generate_remedy(
    State(state): State<AppState>,
    CurrentAccount(account_id): CurrentAccount,
    Path((provider, kid_id)): Path<(String, KidId)>,
) -> Result<Json<RemedyResponse>, ApiError> {
    let kind: ProviderKind = provider
        .parse()
        .map_err(|e: DomainError| ApiError::bad_request("UNKNOWN_PROVIDER", e.to_string()))?;

    let gateway = state.providers.gateway(kind).ok_or_else(|| {
        warn!(provider = %kind, "Remedy requested from unconfigured provider");
        ApiError::not_found(
            "PROVIDER_NOT_CONFIGURED",
            format!("{} is not configured", kind.display_name()),
        )
    })?;

    let outcome = state
        .remedies
        .execute(
            gateway.as_ref(),
            GenerateRemedyInput {
                account_id,
                kid_id,
            },
        )
        .await?;

    info!(
        provider = %kind,
        kid_id,
        cached = outcome.cached,
        "Served remedy request"
    );
    Ok(Json(RemedyResponse::try_from(outcome)?))
}
