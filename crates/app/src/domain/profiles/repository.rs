//! Profiles Repository

use std::{collections::BTreeMap, sync::Arc};

use crate::{
    domain::profiles::models::CustomerProfile,
    storage::{KeyValueStore, StorageError},
};

/// Storage key of the profile map.
pub(crate) const PROFILES_KEY: &str = "customerProfiles";

pub(crate) type Profiles = BTreeMap<String, CustomerProfile>;

/// Reads and writes all profiles as one JSON object keyed by phone.
#[derive(Clone)]
pub(crate) struct StoredProfilesRepository {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for StoredProfilesRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredProfilesRepository").finish_non_exhaustive()
    }
}

impl StoredProfilesRepository {
    #[must_use]
    pub(crate) fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub(crate) async fn load(&self) -> Result<Profiles, StorageError> {
        let stored = self.store.get(PROFILES_KEY).await?;

        let Some(raw) = stored.filter(|raw| !raw.trim().is_empty()) else {
            return Ok(Profiles::new());
        };

        serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
            key: PROFILES_KEY.to_string(),
            source,
        })
    }

    pub(crate) async fn save(&self, profiles: &Profiles) -> Result<(), StorageError> {
        let raw = serde_json::to_string(profiles).map_err(|source| StorageError::Encode {
            key: PROFILES_KEY.to_string(),
            source,
        })?;

        self.store.put(PROFILES_KEY, raw).await
    }
}
