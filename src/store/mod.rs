//! Persistence layer — key-value storage mirroring the portal state.

pub mod libsql_backend;
pub mod memory;
pub mod migrations;
pub mod traits;

use std::sync::Arc;

pub use libsql_backend::LibSqlStore;
pub use memory::MemoryStore;
pub use traits::{PersistenceStore, keys};

use crate::config::PortalConfig;
use crate::error::StoreError;

/// Open the store selected by the configuration.
pub async fn open(config: &PortalConfig) -> Result<Arc<dyn PersistenceStore>, StoreError> {
    if config.is_memory_store() {
        tracing::info!("Using in-memory store; state will not survive a restart");
        return Ok(Arc::new(MemoryStore::new()));
    }
    let store = LibSqlStore::new_local(&config.db_path).await?;
    Ok(Arc::new(store))
}
