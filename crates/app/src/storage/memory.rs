//! In-memory store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{KeyValueStore, StorageError, validate_key};

/// Store kept in process memory; contents are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `value` under `key`.
    #[must_use]
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            values: RwLock::new(HashMap::from([(key.into(), value.into())])),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;

        Ok(self.values.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: String) -> Result<(), StorageError> {
        validate_key(key)?;

        self.values.write().await.insert(key.to_string(), value);

        Ok(())
    }
}
