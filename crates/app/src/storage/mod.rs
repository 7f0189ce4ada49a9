//! Key-value storage port
//!
//! Each key holds one whole JSON document that is read and replaced as a unit.
//! There is no locking between processes: the last writer wins.

use async_trait::async_trait;
use mockall::automock;

mod errors;
mod file;
mod memory;

pub use errors::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Persistent string values addressed by fixed keys.
#[automock]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, or `None` if nothing was written yet.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the value stored under `key`.
    async fn put(&self, key: &str, value: String) -> Result<(), StorageError>;
}

/// Keys are limited to ASCII letters, digits, `-` and `_`, so they are safe file names.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_keys() {
        assert!(validate_key("pizzaOrders").is_ok());
        assert!(validate_key("customer_profiles-v2").is_ok());
    }

    #[test]
    fn rejects_path_like_keys() {
        assert!(matches!(
            validate_key("../orders"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(validate_key("").is_err());
    }
}
