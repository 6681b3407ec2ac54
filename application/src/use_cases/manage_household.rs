//! Household use cases: kid profiles, pantry ingredients and history views.
//!
//! Every operation is scoped to the calling account. A kid owned by another
//! account is reported exactly like an unknown one.

use crate::ports::household_repository::HouseholdRepository;
use crate::ports::remedy_repository::{RemedyRepository, RepositoryError};
use remedy_domain::{
    AccountId, DomainError, Ingredient, KidId, KidProfile, KidProfileUpdate, NewKidProfile,
    RemedyRecord, ShoppingListRecord,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors from account and household operations.
#[derive(Error, Debug)]
pub enum HouseholdError {
    #[error("Username already taken")]
    UsernameTaken,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Not authenticated")]
    Unauthorized,

    #[error("Kid {0} is not accessible")]
    KidNotAccessible(KidId),

    #[error("Ingredient not found: {0}")]
    IngredientNotFound(String),

    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

pub struct ManageHouseholdUseCase {
    household: Arc<dyn HouseholdRepository>,
    remedies: Arc<dyn RemedyRepository>,
}

impl Clone for ManageHouseholdUseCase {
    fn clone(&self) -> Self {
        Self {
            household: self.household.clone(),
            remedies: self.remedies.clone(),
        }
    }
}

impl ManageHouseholdUseCase {
    pub fn new(
        household: Arc<dyn HouseholdRepository>,
        remedies: Arc<dyn RemedyRepository>,
    ) -> Self {
        Self {
            household,
            remedies,
        }
    }

    // ==================== Kids ====================

    pub async fn create_kid(
        &self,
        account_id: AccountId,
        kid: NewKidProfile,
    ) -> Result<KidProfile, HouseholdError> {
        kid.validate()?;
        let profile = self.household.insert_kid(account_id, kid).await?;
        info!(account_id, kid_id = profile.id, "Created kid profile");
        Ok(profile)
    }

    pub async fn list_kids(&self, account_id: AccountId) -> Result<Vec<KidProfile>, HouseholdError> {
        Ok(self.household.kids_for_account(account_id).await?)
    }

    /// Apply a partial update; an update with no fields is rejected.
    pub async fn update_kid(
        &self,
        account_id: AccountId,
        kid_id: KidId,
        update: KidProfileUpdate,
    ) -> Result<KidProfile, HouseholdError> {
        let mut kid = self.owned_kid(account_id, kid_id).await?;
        kid.apply(update)?;
        self.household.save_kid(kid.clone()).await?;
        Ok(kid)
    }

    pub async fn update_symptom(
        &self,
        account_id: AccountId,
        kid_id: KidId,
        symptom: &str,
    ) -> Result<KidProfile, HouseholdError> {
        if symptom.trim().is_empty() {
            return Err(DomainError::InvalidKidProfile("symptom must not be empty".to_string()).into());
        }
        let mut kid = self.owned_kid(account_id, kid_id).await?;
        kid.symptom = Some(symptom.trim().to_string());
        self.household.save_kid(kid.clone()).await?;
        info!(kid_id, symptom = symptom.trim(), "Updated symptom");
        Ok(kid)
    }

    /// The profile `kid_id`, if it belongs to `account_id`.
    pub async fn owned_kid(
        &self,
        account_id: AccountId,
        kid_id: KidId,
    ) -> Result<KidProfile, HouseholdError> {
        self.household
            .find_kid(kid_id)
            .await?
            .filter(|kid| kid.belongs_to(account_id))
            .ok_or(HouseholdError::KidNotAccessible(kid_id))
    }

    // ==================== Ingredients ====================

    /// Add an ingredient; re-adding an existing name overwrites its availability.
    pub async fn add_ingredient(
        &self,
        account_id: AccountId,
        name: &str,
        is_available: bool,
    ) -> Result<Ingredient, HouseholdError> {
        let ingredient = Ingredient::new(name.trim(), is_available)?;
        self.household
            .upsert_ingredient(account_id, ingredient.clone())
            .await?;
        Ok(ingredient)
    }

    pub async fn list_ingredients(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Ingredient>, HouseholdError> {
        Ok(self.household.ingredients_for_account(account_id).await?)
    }

    pub async fn update_ingredient(
        &self,
        account_id: AccountId,
        name: &str,
        is_available: bool,
    ) -> Result<Ingredient, HouseholdError> {
        let name = name.trim();
        if !self
            .household
            .set_ingredient_availability(account_id, name, is_available)
            .await?
        {
            return Err(HouseholdError::IngredientNotFound(name.to_string()));
        }
        Ok(Ingredient {
            name: name.to_string(),
            is_available,
        })
    }

    // ==================== History ====================

    pub async fn remedy_history(
        &self,
        account_id: AccountId,
        kid_id: KidId,
    ) -> Result<Vec<RemedyRecord>, HouseholdError> {
        let kid = self.owned_kid(account_id, kid_id).await?;
        Ok(self.remedies.remedies_for_kid(kid.id).await?)
    }

    pub async fn shopping_lists(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<ShoppingListRecord>, HouseholdError> {
        Ok(self.remedies.shopping_lists_for_account(account_id).await?)
    }
}
