//! Remedy cache keys and history records
//!
//! A served remedy is stored as a [`RemedyRecord`] and later reused when a
//! request for the same symptom arrives with the same ingredient multiset.
//! Records are never updated or invalidated once written.

use super::entities::{RemedyInstruction, ShoppingList};
use crate::household::entities::{AccountId, KidId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order-independent ingredient key
///
/// Two lists are equal as keys iff their sorted sequences are identical.
/// Comparison is case-sensitive and duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IngredientKey(Vec<String>);

impl IngredientKey {
    pub fn new(ingredients: &[String]) -> Self {
        let mut sorted = ingredients.to_vec();
        sorted.sort();
        Self(sorted)
    }
}

/// A remedy served to a kid, persisted for history and reuse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemedyRecord {
    pub kid_id: KidId,
    pub account_id: AccountId,
    pub symptom: String,
    pub remedy_name: String,
    pub steps: Option<Vec<String>>,
    pub ingredients: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl RemedyRecord {
    pub fn new(
        kid_id: KidId,
        account_id: AccountId,
        symptom: impl Into<String>,
        remedy: &RemedyInstruction,
        ingredients: &[String],
    ) -> Self {
        Self {
            kid_id,
            account_id,
            symptom: symptom.into(),
            remedy_name: remedy.remedy_name().to_string(),
            steps: remedy.steps().map(<[String]>::to_vec),
            ingredients: ingredients.to_vec(),
            created_at: Utc::now(),
        }
    }

    /// Whether this record answers a request for `symptom` with `key`
    pub fn matches(&self, symptom: &str, key: &IngredientKey) -> bool {
        self.symptom == symptom && IngredientKey::new(&self.ingredients) == *key
    }

    /// Rebuild the remedy this record stores.
    ///
    /// Returns `None` only for a record written with a blank name.
    pub fn instruction(&self) -> Option<RemedyInstruction> {
        RemedyInstruction::try_new(self.remedy_name.clone(), self.steps.clone())
    }
}

/// A grocery list suggested for a kid's symptom
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListRecord {
    pub kid_id: KidId,
    pub account_id: AccountId,
    pub symptom: String,
    pub items: String,
    pub created_at: DateTime<Utc>,
}

impl ShoppingListRecord {
    pub fn new(
        kid_id: KidId,
        account_id: AccountId,
        symptom: impl Into<String>,
        list: &ShoppingList,
    ) -> Self {
        Self {
            kid_id,
            account_id,
            symptom: symptom.into(),
            items: list.as_str().to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn summary_line(&self) -> String {
        format!(
            "Kid ID: {}, Symptom: {}, Ingredients: {}",
            self.kid_id, self.symptom, self.items
        )
    }
}
