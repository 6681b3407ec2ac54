//! In-memory store with optional JSON snapshot persistence.
//!
//! All state lives behind one `tokio::sync::RwLock`. When a snapshot path is
//! configured, every mutation is applied to a copy of the state, written to
//! the snapshot (sibling temp file, then rename) and only then swapped in, so
//! memory never holds a change the file is missing.

use async_trait::async_trait;
use remedy_application::ports::household_repository::HouseholdRepository;
use remedy_application::ports::remedy_repository::{RemedyRepository, RepositoryError};
use remedy_domain::{
    Account, AccountId, Ingredient, IngredientKey, KidId, KidProfile, NewKidProfile,
    RemedyRecord, ShoppingListRecord,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct StoreState {
    next_account_id: AccountId,
    next_kid_id: KidId,
    accounts: Vec<Account>,
    kids: Vec<KidProfile>,
    /// Pantry per account, in insertion order
    ingredients: BTreeMap<AccountId, Vec<Ingredient>>,
    remedies: Vec<RemedyRecord>,
    shopping_lists: Vec<ShoppingListRecord>,
}

pub struct MemoryStore {
    state: RwLock<StoreState>,
    snapshot_path: Option<PathBuf>,
}

impl MemoryStore {
    /// A store that never touches the disk
    pub fn in_memory() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            snapshot_path: None,
        }
    }

    /// Open a store backed by `path`, loading it when the file exists.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let path = path.as_ref().to_path_buf();
        let state = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let state: StoreState = serde_json::from_slice(&bytes)
                    .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
                info!(
                    path = %path.display(),
                    remedies = state.remedies.len(),
                    "Loaded store snapshot"
                );
                state
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreState::default(),
            Err(e) => return Err(RepositoryError::Storage(e.to_string())),
        };

        Ok(Self {
            state: RwLock::new(state),
            snapshot_path: Some(path),
        })
    }

    async fn persist(&self, state: &StoreState) -> Result<(), RepositoryError> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };

        let bytes = serde_json::to_vec_pretty(state)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        }
        let tmp = path.with_extension("json.tmp");
        let written = match tokio::fs::write(&tmp, bytes).await {
            Ok(()) => tokio::fs::rename(&tmp, path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&tmp).await;
            warn!(path = %path.display(), error = %e, "Could not write store snapshot");
            return Err(RepositoryError::Storage(e.to_string()));
        }
        debug!(path = %path.display(), "Wrote store snapshot");
        Ok(())
    }

    /// Apply `change` and persist the result; on any error the state is left untouched.
    async fn commit<T, F>(&self, change: F) -> Result<T, RepositoryError>
    where
        T: Send,
        F: FnOnce(&mut StoreState) -> Result<T, RepositoryError> + Send,
    {
        let mut state = self.state.write().await;
        if self.snapshot_path.is_none() {
            return change(&mut state);
        }

        let mut candidate = state.clone();
        let value = change(&mut candidate)?;
        self.persist(&candidate).await?;
        *state = candidate;
        Ok(value)
    }
}

#[async_trait]
impl RemedyRepository for MemoryStore {
    async fn find_remedy(
        &self,
        symptom: &str,
        key: &IngredientKey,
    ) -> Result<Option<RemedyRecord>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .remedies
            .iter()
            .find(|record| record.matches(symptom, key))
            .cloned())
    }

    async fn save_remedy(&self, record: RemedyRecord) -> Result<(), RepositoryError> {
        self.commit(|state| {
            state.remedies.push(record);
            Ok(())
        })
        .await
    }

    async fn remedies_for_kid(&self, kid_id: KidId) -> Result<Vec<RemedyRecord>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .remedies
            .iter()
            .filter(|record| record.kid_id == kid_id)
            .cloned()
            .collect())
    }

    async fn save_shopping_list(&self, record: ShoppingListRecord) -> Result<(), RepositoryError> {
        self.commit(|state| {
            state.shopping_lists.push(record);
            Ok(())
        })
        .await
    }

    async fn shopping_lists_for_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<ShoppingListRecord>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .shopping_lists
            .iter()
            .filter(|record| record.account_id == account_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl HouseholdRepository for MemoryStore {
    async fn create_account(
        &self,
        username: &str,
        password_salt: &str,
        password_digest: &str,
    ) -> Result<Account, RepositoryError> {
        self.commit(|state| {
            if state.accounts.iter().any(|a| a.username == username) {
                return Err(RepositoryError::Conflict(format!(
                    "username '{}' already exists",
                    username
                )));
            }

            state.next_account_id += 1;
            let account = Account {
                id: state.next_account_id,
                username: username.to_string(),
                password_salt: password_salt.to_string(),
                password_digest: password_digest.to_string(),
            };
            state.accounts.push(account.clone());
            Ok(account)
        })
        .await
    }

    async fn find_account(&self, username: &str) -> Result<Option<Account>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .accounts
            .iter()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn insert_kid(
        &self,
        account_id: AccountId,
        kid: NewKidProfile,
    ) -> Result<KidProfile, RepositoryError> {
        self.commit(|state| {
            let profile = kid
                .into_profile(state.next_kid_id + 1, account_id)
                .map_err(|e| RepositoryError::Storage(e.to_string()))?;
            state.next_kid_id = profile.id;
            state.kids.push(profile.clone());
            Ok(profile)
        })
        .await
    }

    async fn find_kid(&self, kid_id: KidId) -> Result<Option<KidProfile>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.kids.iter().find(|k| k.id == kid_id).cloned())
    }

    async fn kids_for_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<KidProfile>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .kids
            .iter()
            .filter(|k| k.belongs_to(account_id))
            .cloned()
            .collect())
    }

    async fn save_kid(&self, kid: KidProfile) -> Result<(), RepositoryError> {
        self.commit(|state| {
            let Some(existing) = state.kids.iter_mut().find(|k| k.id == kid.id) else {
                return Err(RepositoryError::Storage(format!("kid {} does not exist", kid.id)));
            };
            *existing = kid;
            Ok(())
        })
        .await
    }

    async fn upsert_ingredient(
        &self,
        account_id: AccountId,
        ingredient: Ingredient,
    ) -> Result<(), RepositoryError> {
        self.commit(|state| {
            let pantry = state.ingredients.entry(account_id).or_default();
            match pantry.iter_mut().find(|i| i.name == ingredient.name) {
                Some(existing) => existing.is_available = ingredient.is_available,
                None => pantry.push(ingredient),
            }
            Ok(())
        })
        .await
    }

    async fn ingredients_for_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Ingredient>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .ingredients
            .get(&account_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn set_ingredient_availability(
        &self,
        account_id: AccountId,
        name: &str,
        is_available: bool,
    ) -> Result<bool, RepositoryError> {
        {
            let state = self.state.read().await;
            let known = state
                .ingredients
                .get(&account_id)
                .is_some_and(|pantry| pantry.iter().any(|i| i.name == name));
            if !known {
                return Ok(false);
            }
        }

        self.commit(|state| {
            let existing = state
                .ingredients
                .get_mut(&account_id)
                .and_then(|pantry| pantry.iter_mut().find(|i| i.name == name));
            Ok(match existing {
                Some(existing) => {
                    existing.is_available = is_available;
                    true
                }
                None => false,
            })
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remedy_domain::{RemedyInstruction, ShoppingList};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn new_kid(name: &str) -> NewKidProfile {
        NewKidProfile {
            name: name.to_string(),
            age: 3,
            height: None,
            weight: None,
            allergies: None,
            symptom: Some("Cough".to_string()),
        }
    }

    #[tokio::test]
    async fn test_cache_lookup_is_order_independent() {
        let store = MemoryStore::in_memory();
        let remedy = RemedyInstruction::try_new("Honey Lemon Tea", None).unwrap();
        store
            .save_remedy(RemedyRecord::new(1, 1, "Cough", &remedy, &strings(&["honey", "lemon"])))
            .await
            .unwrap();

        let forward = store
            .find_remedy("Cough", &IngredientKey::new(&strings(&["honey", "lemon"])))
            .await
            .unwrap();
        let reversed = store
            .find_remedy("Cough", &IngredientKey::new(&strings(&["lemon", "honey"])))
            .await
            .unwrap();

        assert!(forward.is_some());
        assert_eq!(forward, reversed);
        assert!(store
            .find_remedy("Cough", &IngredientKey::new(&strings(&["honey"])))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_first_matching_record_wins() {
        let store = MemoryStore::in_memory();
        let first = RemedyInstruction::try_new("First", None).unwrap();
        let second = RemedyInstruction::try_new("Second", None).unwrap();
        let ingredients = strings(&["ginger"]);
        store
            .save_remedy(RemedyRecord::new(1, 1, "Cough", &first, &ingredients))
            .await
            .unwrap();
        store
            .save_remedy(RemedyRecord::new(2, 1, "Cough", &second, &ingredients))
            .await
            .unwrap();

        let found = store
            .find_remedy("Cough", &IngredientKey::new(&ingredients))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.remedy_name, "First");
        assert_eq!(store.remedies_for_kid(2).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let store = MemoryStore::in_memory();
        let account = store.create_account("parent", "s", "d").await.unwrap();
        assert_eq!(account.id, 1);

        let err = store.create_account("parent", "s", "d").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_kid_ids_are_sequential() {
        let store = MemoryStore::in_memory();
        let a = store.insert_kid(1, new_kid("Mia")).await.unwrap();
        let b = store.insert_kid(2, new_kid("Leo")).await.unwrap();

        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(store.kids_for_account(1).await.unwrap(), vec![a]);
    }

    #[tokio::test]
    async fn test_ingredients_keep_insertion_order() {
        let store = MemoryStore::in_memory();
        for name in ["lemon", "honey", "ginger"] {
            store
                .upsert_ingredient(1, Ingredient::new(name, true).unwrap())
                .await
                .unwrap();
        }
        store
            .upsert_ingredient(1, Ingredient::new("lemon", false).unwrap())
            .await
            .unwrap();

        let names: Vec<_> = store
            .ingredients_for_account(1)
            .await
            .unwrap()
            .into_iter()
            .map(|i| (i.name, i.is_available))
            .collect();
        assert_eq!(
            names,
            vec![
                ("lemon".to_string(), false),
                ("honey".to_string(), true),
                ("ginger".to_string(), true),
            ]
        );
        assert!(!store.set_ingredient_availability(1, "salt", true).await.unwrap());
        assert!(!store.set_ingredient_availability(2, "lemon", true).await.unwrap());
    }

    #[tokio::test]
    async fn test_snapshot_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        {
            let store = MemoryStore::open(&path).await.unwrap();
            store.create_account("parent", "s", "d").await.unwrap();
            let kid = store.insert_kid(1, new_kid("Mia")).await.unwrap();
            store
                .save_shopping_list(ShoppingListRecord::new(
                    kid.id,
                    1,
                    "Cough",
                    &ShoppingList::new("Honey, Lemon"),
                ))
                .await
                .unwrap();
        }

        let reopened = MemoryStore::open(&path).await.unwrap();
        assert!(reopened.find_account("parent").await.unwrap().is_some());
        assert_eq!(reopened.shopping_lists_for_account(1).await.unwrap().len(), 1);
        // Id counters are restored too
        let next = reopened.insert_kid(1, new_kid("Leo")).await.unwrap();
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json").unwrap();

        let result = MemoryStore::open(&path).await;
        assert!(matches!(result, Err(RepositoryError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_failed_snapshot_write_leaves_state_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let store = MemoryStore::open(&path).await.unwrap();
        store.create_account("parent", "s", "d").await.unwrap();

        // Renaming onto a directory fails after the temp file is written
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        let remedy = RemedyInstruction::try_new("Tea", None).unwrap();
        let ingredients = strings(&["honey"]);
        let result = store
            .save_remedy(RemedyRecord::new(1, 1, "Cough", &remedy, &ingredients))
            .await;
        assert!(matches!(result, Err(RepositoryError::Storage(_))));
        assert!(
            store
                .find_remedy("Cough", &IngredientKey::new(&ingredients))
                .await
                .unwrap()
                .is_none()
        );
        assert!(!path.with_extension("json.tmp").exists());

        assert!(store.insert_kid(1, new_kid("Mia")).await.is_err());
        assert!(store.kids_for_account(1).await.unwrap().is_empty());
        assert!(store.create_account("other", "s", "d").await.is_err());
        assert!(store.find_account("other").await.unwrap().is_none());

        // Once the file is writable again the id counters continue where they were
        std::fs::remove_dir(&path).unwrap();
        let kid = store.insert_kid(1, new_kid("Mia")).await.unwrap();
        assert_eq!(kid.id, 1);
    }
}
