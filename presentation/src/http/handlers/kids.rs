use crate::http::{error::ApiError, extract::CurrentAccount, state::AppState};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use remedy_domain::{KidId, KidProfile, KidProfileUpdate, NewKidProfile, RemedyRecord};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SymptomRequest {
    pub symptom: String,
}

/// POST /kids
pub async fn create_kid(
    State(state): State<AppState>,
    CurrentAccount(account_id): CurrentAccount,
    Json(request): Json<NewKidProfile>,
) -> Result<(StatusCode, Json<KidProfile>), ApiError> {
    let kid = state.household.create_kid(account_id, request).await?;
    Ok((StatusCode::CREATED, Json(kid)))
}

/// GET /kids
pub async fn list_kids(
    State(state): State<AppState>,
    CurrentAccount(account_id): CurrentAccount,
) -> Result<Json<Vec<KidProfile>>, ApiError> {
    let kids = state.household.list_kids(account_id).await?;
    if kids.is_empty() {
        return Err(ApiError::not_found(
            "NO_KIDS",
            "No kid profiles found for this account",
        ));
    }
    Ok(Json(kids))
}

/// PUT /kids/{kid_id}
pub async fn update_kid(
    State(state): State<AppState>,
    CurrentAccount(account_id): CurrentAccount,
    Path(kid_id): Path<KidId>,
    Json(update): Json<KidProfileUpdate>,
) -> Result<Json<KidProfile>, ApiError> {
    let kid = state
        .household
        .update_kid(account_id, kid_id, update)
        .await?;
    Ok(Json(kid))
}

/// PUT /kids/{kid_id}/symptom
pub async fn update_symptom(
    State(state): State<AppState>,
    CurrentAccount(account_id): CurrentAccount,
    Path(kid_id): Path<KidId>,
    Json(request): Json<SymptomRequest>,
) -> Result<Json<KidProfile>, ApiError> {
    let kid = state
        .household
        .update_symptom(account_id, kid_id, &request.symptom)
        .await?;
    Ok(Json(kid))
}

/// GET /kids/{kid_id}/remedies
pub async fn remedy_history(
    State(state): State<AppState>,
    CurrentAccount(account_id): CurrentAccount,
    Path(kid_id): Path<KidId>,
) -> Result<Json<Vec<RemedyRecord>>, ApiError> {
    let history = state.household.remedy_history(account_id, kid_id).await?;
    Ok(Json(history))
}
