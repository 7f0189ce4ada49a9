//! File-backed store.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::{KeyValueStore, StorageError, validate_key};

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a temporary file first and are renamed into place, so a
/// reader never sees a half-written document.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens a store in `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if the directory cannot be created.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();

        fs::create_dir_all(&dir)
            .await
            .map_err(|source| StorageError::Write {
                key: dir.display().to_string(),
                source,
            })?;

        Ok(Self { dir })
    }

    /// Directory holding the documents.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;

        let path = self.path_for(key);

        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no stored document");

                Ok(None)
            }
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    async fn put(&self, key: &str, value: String) -> Result<(), StorageError> {
        validate_key(key)?;

        let path = self.path_for(key);
        let staging = self.dir.join(format!(".{key}.json.tmp"));

        let write_error = |source| StorageError::Write {
            key: key.to_string(),
            source,
        };

        fs::write(&staging, value).await.map_err(write_error)?;
        fs::rename(&staging, &path).await.map_err(write_error)?;

        debug!(path = %path.display(), "stored document");

        Ok(())
    }
}
