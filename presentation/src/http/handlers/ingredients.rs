use crate::http::{error::ApiError, extract::CurrentAccount, state::AppState};
use axum::{Json, extract::State, http::StatusCode};
use remedy_domain::Ingredient;
use serde::Deserialize;

fn default_available() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct IngredientRequest {
    pub name: String,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

/// POST /ingredients
pub async fn add_ingredient(
    State(state): State<AppState>,
    CurrentAccount(account_id): CurrentAccount,
    Json(request): Json<IngredientRequest>,
) -> Result<(StatusCode, Json<Ingredient>), ApiError> {
    let ingredient = state
        .household
        .add_ingredient(account_id, &request.name, request.is_available)
        .await?;
    Ok((StatusCode::CREATED, Json(ingredient)))
}

/// GET /ingredients
pub async fn list_ingredients(
    State(state): State<AppState>,
    CurrentAccount(account_id): CurrentAccount,
) -> Result<Json<Vec<Ingredient>>, ApiError> {
    let ingredients = state.household.list_ingredients(account_id).await?;
    if ingredients.is_empty() {
        return Err(ApiError::not_found(
            "NO_INGREDIENTS",
            "No ingredients found for this account",
        ));
    }
    Ok(Json(ingredients))
}

/// PUT /ingredients
pub async fn update_ingredient(
    State(state): State<AppState>,
    CurrentAccount(account_id): CurrentAccount,
    Json(request): Json<IngredientRequest>,
) -> Result<Json<Ingredient>, ApiError> {
    let ingredient = state
        .household
        .update_ingredient(account_id, &request.name, request.is_available)
        .await?;
    Ok(Json(ingredient))
}
