//! Profiles service errors.

use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum ProfilesServiceError {
    #[error("storage error")]
    Storage(#[from] StorageError),
}
