//! Domain layer for kitchen-remedy
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Remedies
//!
//! A remedy is a named, step-by-step home treatment for a child's symptom,
//! built only from the ingredients the household has available:
//!
//! - **Allergy filter**: ingredients matching a child's allergy list are removed first
//! - **Response interpretation**: raw provider text is classified as a remedy,
//!   a "no remedy possible" signal, or malformed output
//! - **Remedy cache**: previously served remedies are reused when the symptom
//!   and the ingredient set match
//!
//! ## Shopping-list fallback
//!
//! When no remedy can be built, the provider is asked for a minimal grocery list instead.

pub mod config;
pub mod core;
pub mod household;
pub mod prompt;
pub mod remedy;
pub mod usage;

// Re-export commonly used types
pub use config::validation::{ConfigIssue, ConfigIssueCode, Severity};
pub use core::{error::DomainError, provider::ProviderKind};
pub use household::{
    allergies::{AllergyList, filter_allergies},
    entities::{
        Account, AccountId, Ingredient, KidId, KidProfile, KidProfileUpdate, NewKidProfile,
    },
};
pub use prompt::{NO_REMEDY_SENTINEL, RemedyPromptTemplate};
pub use remedy::{
    cache::{IngredientKey, RemedyRecord, ShoppingListRecord},
    entities::{FailureKind, RemedyInstruction, RemedyResult, ShoppingList},
    interpreter::{Interpretation, interpret},
};
pub use usage::{CostBreakdown, Pricing, TokenUsage};
