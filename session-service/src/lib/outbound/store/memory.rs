use async_trait::async_trait;
use dashmap::DashMap;

use crate::credential::errors::StoreError;
use crate::credential::models::Credential;
use crate::credential::ports::UserStore;

/// In-memory user store adapter.
///
/// The production user store lives outside this service; this adapter
/// implements the same port for wiring and tests. Records are keyed by
/// username.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    records: DashMap<String, Credential>,
}

impl InMemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Insert or replace a credential record.
    pub fn insert(&self, credential: Credential) {
        self.records
            .insert(credential.username.clone(), credential);
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Credential>, StoreError> {
        Ok(self.records.get(username).map(|r| r.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, StoreError> {
        Ok(self
            .records
            .iter()
            .find(|r| r.value().email == email)
            .map(|r| r.value().clone()))
    }

    async fn save(&self, credential: Credential) -> Result<(), StoreError> {
        self.records
            .insert(credential.username.clone(), credential);
        Ok(())
    }
}
