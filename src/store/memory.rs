//! In-memory store, used by tests and by `:memory:` runs.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::store::traits::PersistenceStore;

/// `HashMap`-backed store. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl PersistenceStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.entries.write().await.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);

        store.set("onboardingScreen", "signup").await.unwrap();
        assert_eq!(
            store.get("onboardingScreen").await.unwrap().as_deref(),
            Some("signup")
        );

        // Overwrite
        store.set("onboardingScreen", "onboarding").await.unwrap();
        assert_eq!(
            store.get("onboardingScreen").await.unwrap().as_deref(),
            Some("onboarding")
        );
        assert_eq!(store.len().await, 1);

        assert!(store.remove("onboardingScreen").await.unwrap());
        assert!(store.get("onboardingScreen").await.unwrap().is_none());
        assert!(!store.remove("onboardingScreen").await.unwrap());
    }
}
