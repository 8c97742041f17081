//! `PersistenceStore` trait — string key-value storage that outlives the process.
//!
//! Components receive the store as `Arc<dyn PersistenceStore>` so tests can
//! swap in the in-memory backend.

use async_trait::async_trait;

use crate::error::StoreError;

/// Keys under which portal state is persisted.
pub mod keys {
    /// Current top-level screen (`login|signup|onboarding|success`).
    pub const SCREEN: &str = "onboardingScreen";
    /// JSON-serialized `FormRecord`.
    pub const FORM_DATA: &str = "onboardingFormData";
    /// Current onboarding step, `1..=5`.
    pub const STEP: &str = "onboardingStep";

    /// Every key the portal writes; all are cleared on final submission.
    pub const ALL: [&str; 3] = [SCREEN, STEP, FORM_DATA];
}

/// Backend-agnostic key-value store.
#[async_trait]
pub trait PersistenceStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Insert or replace the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Returns whether anything was removed.
    async fn remove(&self, key: &str) -> Result<bool, StoreError>;
}
