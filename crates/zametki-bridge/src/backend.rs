//! Bridge-backed key-value store

use async_trait::async_trait;
use std::sync::Arc;

use zametki_storage::{KeyValueBackend, StorageError};

use crate::bridge::HostBridge;

/// Adapts a [`HostBridge`] to the storage backend interface.
pub struct BridgeBackend {
    bridge: Arc<dyn HostBridge>,
}

impl BridgeBackend {
    pub fn new(bridge: Arc<dyn HostBridge>) -> Self {
        Self { bridge }
    }
}

#[async_trait]
impl KeyValueBackend for BridgeBackend {
    fn name(&self) -> &'static str {
        "bridge"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .bridge
            .storage_get(&[key])
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        // The host reports missing keys as empty strings
        Ok(entries
            .into_iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value)
            .filter(|value| !value.is_empty()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let accepted = self
            .bridge
            .storage_set(key, value)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        if accepted {
            Ok(())
        } else {
            tracing::warn!(key, "Host refused the write");
            Err(StorageError::Backend("host refused the write".to_string()))
        }
    }
}
