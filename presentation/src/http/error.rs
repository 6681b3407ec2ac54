//! Error body shared by every endpoint: `{error, message, timestamp}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use remedy_application::{GenerateRemedyError, HouseholdError};
use remedy_domain::DomainError;
use serde::Serialize;
use tracing::error;

/// Error response format shared by handlers
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: i64,
}

/// A handler failure with its status and machine readable code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn unauthorized() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "A valid bearer token is required",
        )
    }

    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, message)
    }

    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }

    fn internal(detail: impl std::fmt::Display) -> Self {
        error!(error = %detail, "Request failed");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "Internal server error",
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.code.to_string(),
            message: self.message,
            timestamp: chrono::Utc::now().timestamp(),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<HouseholdError> for ApiError {
    fn from(error: HouseholdError) -> Self {
        match error {
            HouseholdError::UsernameTaken => Self::new(
                StatusCode::CONFLICT,
                "USERNAME_TAKEN",
                "Username already taken",
            ),
            HouseholdError::InvalidCredentials => Self::new(
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid username or password",
            ),
            HouseholdError::Unauthorized => Self::unauthorized(),
            HouseholdError::KidNotAccessible(kid_id) => Self::new(
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                format!("Kid {} does not belong to this account", kid_id),
            ),
            HouseholdError::IngredientNotFound(name) => Self::not_found(
                "INGREDIENT_NOT_FOUND",
                format!("Ingredient '{}' not found", name),
            ),
            HouseholdError::Invalid(DomainError::EmptyUpdate) => {
                Self::bad_request("EMPTY_UPDATE", "No fields provided for update")
            }
            HouseholdError::Invalid(e) => Self::bad_request("VALIDATION_ERROR", e.to_string()),
            HouseholdError::Repository(e) => Self::internal(e),
        }
    }
}

impl From<GenerateRemedyError> for ApiError {
    fn from(error: GenerateRemedyError) -> Self {
        match error {
            GenerateRemedyError::KidNotAccessible(kid_id) => Self::new(
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                format!("Kid {} does not belong to this account", kid_id),
            ),
            GenerateRemedyError::NoSymptom(kid_id) => Self::not_found(
                "NO_SYMPTOM",
                format!("No symptom recorded for kid {}", kid_id),
            ),
            GenerateRemedyError::Repository(e) => Self::internal(e),
        }
    }
}
