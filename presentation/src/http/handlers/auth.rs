use crate::http::{error::ApiError, extract::BearerToken, state::AppState};
use axum::{Json, extract::State, http::StatusCode};
use remedy_domain::AccountId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub id: AccountId,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let account = state
        .accounts
        .signup(&request.username, &request.password)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            id: account.id,
            username: account.username,
        }),
    ))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let token = state
        .accounts
        .login(&request.username, &request.password)
        .await?;
    Ok(Json(LoginResponse { token }))
}

/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.accounts.logout(&token) {
        return Err(ApiError::unauthorized());
    }
    Ok(Json(MessageResponse {
        message: "Logged out".to_string(),
    }))
}
