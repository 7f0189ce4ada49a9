//! Storage errors.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    #[error("failed to read {key}")]
    Read {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {key}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("stored value for {key} is not valid")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode value for {key}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
