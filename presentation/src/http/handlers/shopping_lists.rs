use crate::http::{error::ApiError, extract::CurrentAccount, state::AppState};
use axum::{Json, extract::State};
use remedy_domain::ShoppingListRecord;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ShoppingListsResponse {
    pub shopping_lists: Vec<ShoppingListRecord>,
    /// One `Kid ID: .., Symptom: .., Ingredients: ..` line per list
    pub summary: Vec<String>,
}

/// GET /shopping-lists
pub async fn list_shopping_lists(
    State(state): State<AppState>,
    CurrentAccount(account_id): CurrentAccount,
) -> Result<Json<ShoppingListsResponse>, ApiError> {
    let shopping_lists = state.household.shopping_lists(account_id).await?;
    let summary = shopping_lists
        .iter()
        .map(ShoppingListRecord::summary_line)
        .collect();
    Ok(Json(ShoppingListsResponse {
        shopping_lists,
        summary,
    }))
}
