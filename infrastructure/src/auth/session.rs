//! Session tokens held in a concurrent map. Sessions do not survive restarts.

use dashmap::DashMap;
use remedy_application::ports::credentials::SessionStore;
use remedy_domain::AccountId;

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<String, AccountId>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl SessionStore for InMemorySessionStore {
    fn open(&self, account_id: AccountId) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        self.sessions.insert(token.clone(), account_id);
        token
    }

    fn resolve(&self, token: &str) -> Option<AccountId> {
        self.sessions.get(token).map(|entry| *entry.value())
    }

    fn close(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }
}
