//! Application layer for kitchen-remedy
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{GenerationConfig, GenerationParams};
pub use ports::{
    credentials::{CredentialHasher, SessionStore},
    household_repository::HouseholdRepository,
    llm_gateway::{GatewayError, GatewayRegistry, Generation, GenerationRequest, LlmGateway},
    remedy_repository::{RemedyRepository, RepositoryError},
    usage_recorder::{
        CompositeUsageRecorder, NoUsageRecorder, UsageEvent, UsagePurpose, UsageRecorder,
    },
};
pub use use_cases::generate_remedy::{
    GenerateRemedyError, GenerateRemedyInput, GenerateRemedyUseCase, RemedyOutcome,
    RemedyRequest,
};
pub use use_cases::manage_accounts::ManageAccountsUseCase;
pub use use_cases::manage_household::{HouseholdError, ManageHouseholdUseCase};
pub use use_cases::suggest_groceries::SuggestGroceriesUseCase;
