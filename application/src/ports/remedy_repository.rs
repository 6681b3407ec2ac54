//! Remedy history port
//!
//! Storage for served remedies (which double as the remedy cache) and for
//! shopping-list suggestions.

use async_trait::async_trait;
use remedy_domain::{AccountId, IngredientKey, KidId, RemedyRecord, ShoppingListRecord};
use thiserror::Error;

/// Errors raised by storage adapters
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[async_trait]
pub trait RemedyRepository: Send + Sync {
    /// First record, in insertion order, for `symptom` with an equal ingredient key
    async fn find_remedy(
        &self,
        symptom: &str,
        key: &IngredientKey,
    ) -> Result<Option<RemedyRecord>, RepositoryError>;

    /// Append a record; duplicates are accepted
    async fn save_remedy(&self, record: RemedyRecord) -> Result<(), RepositoryError>;

    async fn remedies_for_kid(&self, kid_id: KidId) -> Result<Vec<RemedyRecord>, RepositoryError>;

    async fn save_shopping_list(&self, record: ShoppingListRecord) -> Result<(), RepositoryError>;

    async fn shopping_lists_for_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<ShoppingListRecord>, RepositoryError>;
}
