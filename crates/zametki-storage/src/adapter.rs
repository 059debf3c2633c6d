//! Storage adapter
//!
//! Persists one serialized value under a fixed key. Reads fail soft (absent
//! or malformed data degrades to the default value); writes fall back to a
//! secondary local backend when the primary one is down.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::backend::KeyValueBackend;
use crate::error::StorageError;
use crate::Result;

/// Which backend ended up holding the write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Primary,
    Fallback,
}

pub struct StorageAdapter {
    primary: Arc<dyn KeyValueBackend>,
    fallback: Option<Arc<dyn KeyValueBackend>>,
    key: String,
}

impl StorageAdapter {
    pub fn new(primary: Arc<dyn KeyValueBackend>, key: impl Into<String>) -> Self {
        Self {
            primary,
            fallback: None,
            key: key.into(),
        }
    }

    /// Add a secondary backend that receives the payload when the primary
    /// write fails.
    pub fn with_fallback(mut self, fallback: Arc<dyn KeyValueBackend>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read and deserialize the stored value.
    ///
    /// Absent keys, malformed payloads, and backend failures all degrade to
    /// `T::default()`; the caller never sees a read error.
    pub async fn load<T>(&self) -> T
    where
        T: DeserializeOwned + Default,
    {
        let raw = match self.primary.get(&self.key).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(
                    backend = self.primary.name(),
                    key = %self.key,
                    "Read failed, starting empty: {}", e
                );
                return T::default();
            }
        };

        match raw {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(key = %self.key, "Stored payload malformed, starting empty: {}", e);
                T::default()
            }),
            None => T::default(),
        }
    }

    /// Serialize and write the whole value, replacing any prior payload.
    pub async fn save<T>(&self, value: &T) -> Result<SaveOutcome>
    where
        T: Serialize,
    {
        let payload = serde_json::to_string(value)?;

        match self.primary.set(&self.key, &payload).await {
            Ok(()) => Ok(SaveOutcome::Primary),
            Err(primary_err) => {
                tracing::warn!(
                    backend = self.primary.name(),
                    key = %self.key,
                    "Primary write failed: {}", primary_err
                );

                let Some(fallback) = &self.fallback else {
                    return Err(StorageError::WriteFailed);
                };

                match fallback.set(&self.key, &payload).await {
                    Ok(()) => {
                        tracing::info!(
                            backend = fallback.name(),
                            key = %self.key,
                            "Payload written to fallback store"
                        );
                        Ok(SaveOutcome::Fallback)
                    }
                    Err(fallback_err) => {
                        tracing::error!(
                            backend = fallback.name(),
                            key = %self.key,
                            "Fallback write failed: {}", fallback_err
                        );
                        Err(StorageError::WriteFailed)
                    }
                }
            }
        }
    }
}
