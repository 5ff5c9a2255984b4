//! Credential store capability

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::Result;
use crate::types::CredentialRecord;

/// Lookup of credential records by username
///
/// Implement this trait to back the verifier with a different store.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find the record for an exact, case-sensitive username
    async fn find_by_username(&self, username: &str) -> Result<Option<CredentialRecord>>;

    /// Get a description of this store (for logging)
    fn description(&self) -> &str {
        "credential store"
    }
}

/// Fixed set of records provisioned at startup
///
/// Records are never added, changed or removed after construction, so no
/// locking is needed.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    records: HashMap<String, CredentialRecord>,
}

impl InMemoryCredentialStore {
    /// Create a store from the given records. A later duplicate username
    /// replaces an earlier one.
    pub fn new(records: impl IntoIterator<Item = CredentialRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|record| (record.username.clone(), record))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<CredentialRecord>> {
        Ok(self.records.get(username).cloned())
    }

    fn description(&self) -> &str {
        "in-memory credential store"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_is_exact() {
        let store = InMemoryCredentialStore::new([CredentialRecord::new(1, "admin", "hash")]);

        assert_eq!(store.len(), 1);
        assert!(store.find_by_username("admin").await.unwrap().is_some());
        assert!(store.find_by_username("Admin").await.unwrap().is_none());
        assert!(store.find_by_username("admin ").await.unwrap().is_none());
    }
}
