//! Household storage port: accounts, kid profiles and pantry ingredients

use super::remedy_repository::RepositoryError;
use async_trait::async_trait;
use remedy_domain::{Account, AccountId, Ingredient, KidId, KidProfile, NewKidProfile};

#[async_trait]
pub trait HouseholdRepository: Send + Sync {
    /// Create an account; fails with [`RepositoryError::Conflict`] when the username exists
    async fn create_account(
        &self,
        username: &str,
        password_salt: &str,
        password_digest: &str,
    ) -> Result<Account, RepositoryError>;

    async fn find_account(&self, username: &str) -> Result<Option<Account>, RepositoryError>;

    /// Store a new profile under a freshly assigned id
    async fn insert_kid(
        &self,
        account_id: AccountId,
        kid: NewKidProfile,
    ) -> Result<KidProfile, RepositoryError>;

    async fn find_kid(&self, kid_id: KidId) -> Result<Option<KidProfile>, RepositoryError>;

    async fn kids_for_account(&self, account_id: AccountId)
    -> Result<Vec<KidProfile>, RepositoryError>;

    /// Replace a stored profile
    async fn save_kid(&self, kid: KidProfile) -> Result<(), RepositoryError>;

    /// Insert an ingredient or overwrite the availability of an existing one
    async fn upsert_ingredient(
        &self,
        account_id: AccountId,
        ingredient: Ingredient,
    ) -> Result<(), RepositoryError>;

    /// Ingredients in insertion order
    async fn ingredients_for_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Ingredient>, RepositoryError>;

    /// Returns `false` when the ingredient is unknown
    async fn set_ingredient_availability(
        &self,
        account_id: AccountId,
        name: &str,
        is_available: bool,
    ) -> Result<bool, RepositoryError>;
}
