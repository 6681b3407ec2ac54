//! Account use cases: signup, login, logout and token authentication.

use crate::ports::credentials::{CredentialHasher, SessionStore};
use crate::ports::household_repository::HouseholdRepository;
use crate::ports::remedy_repository::RepositoryError;
use crate::use_cases::manage_household::HouseholdError;
use remedy_domain::{Account, AccountId, DomainError};
use std::sync::Arc;
use tracing::{debug, info};

pub struct ManageAccountsUseCase {
    household: Arc<dyn HouseholdRepository>,
    hasher: Arc<dyn CredentialHasher>,
    sessions: Arc<dyn SessionStore>,
}

impl Clone for ManageAccountsUseCase {
    fn clone(&self) -> Self {
        Self {
            household: self.household.clone(),
            hasher: self.hasher.clone(),
            sessions: self.sessions.clone(),
        }
    }
}

impl ManageAccountsUseCase {
    pub fn new(
        household: Arc<dyn HouseholdRepository>,
        hasher: Arc<dyn CredentialHasher>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            household,
            hasher,
            sessions,
        }
    }

    /// Register a new account. Username and password must both be non-empty.
    pub async fn signup(&self, username: &str, password: &str) -> Result<Account, HouseholdError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(DomainError::InvalidCredentials(
                "username and password are required".to_string(),
            )
            .into());
        }

        let salt = self.hasher.new_salt();
        let digest = self.hasher.digest(password, &salt);
        let account = self
            .household
            .create_account(username, &salt, &digest)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => HouseholdError::UsernameTaken,
                other => other.into(),
            })?;

        info!(account_id = account.id, "Registered account");
        Ok(account)
    }

    /// Verify credentials and open a session, returning its token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, HouseholdError> {
        let account = self
            .household
            .find_account(username)
            .await?
            .ok_or(HouseholdError::InvalidCredentials)?;

        if !self
            .hasher
            .verify(password, &account.password_salt, &account.password_digest)
        {
            debug!(username, "Rejected login");
            return Err(HouseholdError::InvalidCredentials);
        }

        info!(account_id = account.id, "Opened session");
        Ok(self.sessions.open(account.id))
    }

    pub fn logout(&self, token: &str) -> bool {
        self.sessions.close(token)
    }

    /// Resolve a bearer token to its account.
    pub fn authenticate(&self, token: &str) -> Result<AccountId, HouseholdError> {
        self.sessions
            .resolve(token)
            .ok_or(HouseholdError::Unauthorized)
    }
}
