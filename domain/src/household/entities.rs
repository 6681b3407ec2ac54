//! Household entities: accounts, kid profiles and pantry ingredients

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Identifier of a parent account
pub type AccountId = u64;

/// Identifier of a kid profile
pub type KidId = u64;

/// A parent account (Entity)
///
/// Only the salted digest of the password is ever held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub password_salt: String,
    pub password_digest: String,
}

/// Health profile of a child (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KidProfile {
    pub id: KidId,
    pub account_id: AccountId,
    pub name: String,
    pub age: u32,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    /// Free-text, comma separated allergy list
    pub allergies: Option<String>,
    /// The symptom currently tracked for this child
    pub symptom: Option<String>,
}

impl KidProfile {
    /// Validate the user supplied fields of a new profile
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidKidProfile(
                "name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn belongs_to(&self, account_id: AccountId) -> bool {
        self.account_id == account_id
    }

    /// Apply a partial update, leaving absent fields untouched.
    pub fn apply(&mut self, update: KidProfileUpdate) -> Result<(), DomainError> {
        if update.is_empty() {
            return Err(DomainError::EmptyUpdate);
        }
        if let Some(name) = update.name {
            if name.trim().is_empty() {
                return Err(DomainError::InvalidKidProfile(
                    "name must not be empty".to_string(),
                ));
            }
            self.name = name;
        }
        if let Some(age) = update.age {
            self.age = age;
        }
        if update.height.is_some() {
            self.height = update.height;
        }
        if update.weight.is_some() {
            self.weight = update.weight;
        }
        if update.allergies.is_some() {
            self.allergies = update.allergies;
        }
        Ok(())
    }
}

/// User supplied fields of a profile that has no id yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewKidProfile {
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub allergies: Option<String>,
    #[serde(default)]
    pub symptom: Option<String>,
}

impl NewKidProfile {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidKidProfile(
                "name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Attach storage identity, validating the user supplied fields.
    pub fn into_profile(self, id: KidId, account_id: AccountId) -> Result<KidProfile, DomainError> {
        let profile = KidProfile {
            id,
            account_id,
            name: self.name,
            age: self.age,
            height: self.height,
            weight: self.weight,
            allergies: self.allergies,
            symptom: self.symptom,
        };
        profile.validate()?;
        Ok(profile)
    }
}

/// Partial update of a [`KidProfile`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KidProfileUpdate {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub allergies: Option<String>,
}

impl KidProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.height.is_none()
            && self.weight.is_none()
            && self.allergies.is_none()
    }
}

/// A pantry item and whether it is currently at hand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub is_available: bool,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, is_available: bool) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::InvalidIngredient(
                "ingredient name must not be empty".to_string(),
            ));
        }
        Ok(Self { name, is_available })
    }
}
