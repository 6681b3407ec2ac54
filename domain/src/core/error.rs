//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Invalid kid profile: {0}")]
    InvalidKidProfile(String),

    #[error("Invalid ingredient: {0}")]
    InvalidIngredient(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Nothing to update")]
    EmptyUpdate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_provider_display() {
        let error = DomainError::UnknownProvider("claude".to_string());
        assert_eq!(error.to_string(), "Unknown provider: claude");
    }

    #[test]
    fn test_empty_update_display() {
        assert_eq!(DomainError::EmptyUpdate.to_string(), "Nothing to update");
    }
}
