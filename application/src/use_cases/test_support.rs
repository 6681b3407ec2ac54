//! Hand-written port doubles shared by use case tests.

use crate::ports::credentials::{CredentialHasher, SessionStore};
use crate::ports::household_repository::HouseholdRepository;
use crate::ports::llm_gateway::{Generation, GatewayError, GenerationRequest, LlmGateway};
use crate::ports::remedy_repository::{RemedyRepository, RepositoryError};
use crate::ports::usage_recorder::{UsageEvent, UsageRecorder};
use async_trait::async_trait;
use remedy_domain::{
    Account, AccountId, Ingredient, IngredientKey, KidId, KidProfile, NewKidProfile, Pricing,
    ProviderKind, RemedyRecord, ShoppingListRecord, TokenUsage,
};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

// ==================== Gateway ====================

/// Gateway returning queued answers in order; `Err` entries simulate transport failures.
pub struct ScriptedGateway {
    kind: ProviderKind,
    responses: Mutex<VecDeque<Result<String, ()>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGateway {
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn answer(self, text: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push_back(Ok(text.into()));
        self
    }

    pub fn fail(self) -> Self {
        self.responses.lock().unwrap().push_back(Err(()));
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn pricing(&self) -> Pricing {
        Pricing::new(1.0, 2.0)
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<Generation, GatewayError> {
        self.requests.lock().unwrap().push(request.clone());
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(Generation {
                text,
                model: "scripted-model".to_string(),
                usage: Some(TokenUsage::new(100, 50, None)),
            }),
            Some(Err(())) => Err(GatewayError::ConnectionError("refused".to_string())),
            None => Err(GatewayError::Other("no scripted response".to_string())),
        }
    }
}

// ==================== Usage ====================

#[derive(Default)]
pub struct RecordingUsage {
    pub events: Mutex<Vec<UsageEvent>>,
}

impl UsageRecorder for RecordingUsage {
    fn record(&self, event: &UsageEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

// ==================== Repositories ====================

#[derive(Default)]
pub struct MemoryRemedies {
    pub remedies: Mutex<Vec<RemedyRecord>>,
    pub shopping_lists: Mutex<Vec<ShoppingListRecord>>,
}

#[async_trait]
impl RemedyRepository for MemoryRemedies {
    async fn find_remedy(
        &self,
        symptom: &str,
        key: &IngredientKey,
    ) -> Result<Option<RemedyRecord>, RepositoryError> {
        Ok(self
            .remedies
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.matches(symptom, key))
            .cloned())
    }

    async fn save_remedy(&self, record: RemedyRecord) -> Result<(), RepositoryError> {
        self.remedies.lock().unwrap().push(record);
        Ok(())
    }

    async fn remedies_for_kid(&self, kid_id: KidId) -> Result<Vec<RemedyRecord>, RepositoryError> {
        Ok(self
            .remedies
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.kid_id == kid_id)
            .cloned()
            .collect())
    }

    async fn save_shopping_list(&self, record: ShoppingListRecord) -> Result<(), RepositoryError> {
        self.shopping_lists.lock().unwrap().push(record);
        Ok(())
    }

    async fn shopping_lists_for_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<ShoppingListRecord>, RepositoryError> {
        Ok(self
            .shopping_lists
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.account_id == account_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryHousehold {
    pub accounts: Mutex<Vec<Account>>,
    pub kids: Mutex<Vec<KidProfile>>,
    pub ingredients: Mutex<HashMap<AccountId, Vec<Ingredient>>>,
}

impl MemoryHousehold {
    pub fn with_kid(self, kid: KidProfile) -> Self {
        self.kids.lock().unwrap().push(kid);
        self
    }

    pub fn with_ingredient(self, account_id: AccountId, name: &str, is_available: bool) -> Self {
        self.ingredients
            .lock()
            .unwrap()
            .entry(account_id)
            .or_default()
            .push(Ingredient::new(name, is_available).unwrap());
        self
    }
}

#[async_trait]
impl HouseholdRepository for MemoryHousehold {
    async fn create_account(
        &self,
        username: &str,
        password_salt: &str,
        password_digest: &str,
    ) -> Result<Account, RepositoryError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.iter().any(|a| a.username == username) {
            return Err(RepositoryError::Conflict(username.to_string()));
        }
        let account = Account {
            id: accounts.len() as AccountId + 1,
            username: username.to_string(),
            password_salt: password_salt.to_string(),
            password_digest: password_digest.to_string(),
        };
        accounts.push(account.clone());
        Ok(account)
    }

    async fn find_account(&self, username: &str) -> Result<Option<Account>, RepositoryError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn insert_kid(
        &self,
        account_id: AccountId,
        kid: NewKidProfile,
    ) -> Result<KidProfile, RepositoryError> {
        let mut kids = self.kids.lock().unwrap();
        let id = kids.iter().map(|k| k.id).max().unwrap_or(0) + 1;
        let profile = kid
            .into_profile(id, account_id)
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        kids.push(profile.clone());
        Ok(profile)
    }

    async fn find_kid(&self, kid_id: KidId) -> Result<Option<KidProfile>, RepositoryError> {
        Ok(self
            .kids
            .lock()
            .unwrap()
            .iter()
            .find(|k| k.id == kid_id)
            .cloned())
    }

    async fn kids_for_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<KidProfile>, RepositoryError> {
        Ok(self
            .kids
            .lock()
            .unwrap()
            .iter()
            .filter(|k| k.belongs_to(account_id))
            .cloned()
            .collect())
    }

    async fn save_kid(&self, kid: KidProfile) -> Result<(), RepositoryError> {
        let mut kids = self.kids.lock().unwrap();
        match kids.iter_mut().find(|k| k.id == kid.id) {
            Some(existing) => *existing = kid,
            None => kids.push(kid),
        }
        Ok(())
    }

    async fn upsert_ingredient(
        &self,
        account_id: AccountId,
        ingredient: Ingredient,
    ) -> Result<(), RepositoryError> {
        let mut all = self.ingredients.lock().unwrap();
        let pantry = all.entry(account_id).or_default();
        match pantry.iter_mut().find(|i| i.name == ingredient.name) {
            Some(existing) => existing.is_available = ingredient.is_available,
            None => pantry.push(ingredient),
        }
        Ok(())
    }

    async fn ingredients_for_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Ingredient>, RepositoryError> {
        Ok(self
            .ingredients
            .lock()
            .unwrap()
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
        let mut all = self.ingredients.lock().unwrap();
        let Some(existing) = all
            .get_mut(&account_id)
            .and_then(|pantry| pantry.iter_mut().find(|i| i.name == name))
        else {
            return Ok(false);
        };
        existing.is_available = is_available;
        Ok(true)
    }
}

// ==================== Credentials ====================

/// Reversible "hash" so tests can assert on stored digests
pub struct PlainHasher;

impl CredentialHasher for PlainHasher {
    fn new_salt(&self) -> String {
        "salt".to_string()
    }

    fn digest(&self, password: &str, salt: &str) -> String {
        format!("{}:{}", salt, password)
    }
}

#[derive(Default)]
pub struct MemorySessions {
    sessions: Mutex<HashMap<String, AccountId>>,
}

impl SessionStore for MemorySessions {
    fn open(&self, account_id: AccountId) -> String {
        let mut sessions = self.sessions.lock().unwrap();
        let token = format!("token-{}", sessions.len() + 1);
        sessions.insert(token.clone(), account_id);
        token
    }

    fn resolve(&self, token: &str) -> Option<AccountId> {
        self.sessions.lock().unwrap().get(token).copied()
    }

    fn close(&self, token: &str) -> bool {
        self.sessions.lock().unwrap().remove(token).is_some()
    }
}

pub fn kid(id: KidId, account_id: AccountId, symptom: Option<&str>, allergies: Option<&str>) -> KidProfile {
    KidProfile {
        id,
        account_id,
        name: format!("kid-{}", id),
        age: 5,
        height: None,
        weight: None,
        allergies: allergies.map(str::to_string),
        symptom: symptom.map(str::to_string),
    }
}
