//! Credential ports: password hashing and session tokens

use remedy_domain::AccountId;

/// Salted password digests
pub trait CredentialHasher: Send + Sync {
    /// A fresh random salt
    fn new_salt(&self) -> String;

    fn digest(&self, password: &str, salt: &str) -> String;

    fn verify(&self, password: &str, salt: &str, expected_digest: &str) -> bool {
        self.digest(password, salt) == expected_digest
    }
}

/// Opaque session tokens mapped to accounts
pub trait SessionStore: Send + Sync {
    /// Open a session and return its token
    fn open(&self, account_id: AccountId) -> String;

    fn resolve(&self, token: &str) -> Option<AccountId>;

    /// Returns `false` when the token was not active
    fn close(&self, token: &str) -> bool;
}
