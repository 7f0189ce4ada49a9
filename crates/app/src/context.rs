//! App Context

use std::{path::Path, sync::Arc, time::Duration};

use jiff::tz::TimeZone;
use pizzeria::checkout::CheckoutPolicy;
use thiserror::Error;
use tracing::warn;

use crate::{
    auth::AdminCredentials,
    domain::{
        checkout::{AddressLookup, CheckoutService, LookupError, StoredCheckoutService, ViaCepClient},
        orders::{OrdersService, StoredOrdersService},
        profiles::{ProfilesService, StoredProfilesService},
    },
    storage::{FileStore, KeyValueStore, MemoryStore, StorageError},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to open data directory")]
    Storage(#[source] StorageError),

    #[error("failed to build address lookup client")]
    Lookup(#[source] LookupError),
}

/// Everything configurable about a running store.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub policy: CheckoutPolicy,
    pub time_zone: TimeZone,
    pub lookup_base_url: String,
    pub lookup_timeout: Duration,
    pub credentials: AdminCredentials,
}

/// Zone the house store keeps its calendar in.
pub const STORE_TIME_ZONE: &str = "America/Belem";

/// Resolves `name`, falling back to UTC with a warning when the zone is unknown.
fn zone_or_utc(name: &str) -> TimeZone {
    TimeZone::get(name).unwrap_or_else(|error| {
        warn!(zone = name, %error, "unknown time zone, using UTC");

        TimeZone::UTC
    })
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            policy: CheckoutPolicy::default(),
            time_zone: zone_or_utc(STORE_TIME_ZONE),
            lookup_base_url: crate::domain::checkout::lookup::VIACEP_BASE_URL.to_string(),
            lookup_timeout: Duration::from_secs(5),
            credentials: AdminCredentials::default(),
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub orders: Arc<dyn OrdersService>,
    pub profiles: Arc<dyn ProfilesService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub credentials: AdminCredentials,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context persisting to `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error when the data directory cannot be created or the
    /// lookup client cannot be built.
    pub async fn from_data_dir(
        dir: impl AsRef<Path>,
        settings: AppSettings,
    ) -> Result<Self, AppInitError> {
        let store = FileStore::open(dir.as_ref())
            .await
            .map_err(AppInitError::Storage)?;

        Self::with_store(Arc::new(store), settings)
    }

    /// Build application context over a store that lives only as long as the process.
    ///
    /// # Errors
    ///
    /// Returns an error when the lookup client cannot be built.
    pub fn in_memory(settings: AppSettings) -> Result<Self, AppInitError> {
        Self::with_store(Arc::new(MemoryStore::new()), settings)
    }

    /// Build application context over any key-value store.
    ///
    /// # Errors
    ///
    /// Returns an error when the lookup client cannot be built.
    pub fn with_store(
        store: Arc<dyn KeyValueStore>,
        settings: AppSettings,
    ) -> Result<Self, AppInitError> {
        let lookup = ViaCepClient::new(&settings.lookup_base_url, settings.lookup_timeout)
            .map_err(AppInitError::Lookup)?;

        Ok(Self::with_lookup(store, Arc::new(lookup), settings))
    }

    /// Build application context over any key-value store and postal code lookup.
    #[must_use]
    pub fn with_lookup(
        store: Arc<dyn KeyValueStore>,
        lookup: Arc<dyn AddressLookup>,
        settings: AppSettings,
    ) -> Self {
        let orders: Arc<dyn OrdersService> =
            Arc::new(StoredOrdersService::new(store.clone(), settings.time_zone));
        let profiles: Arc<dyn ProfilesService> = Arc::new(StoredProfilesService::new(store));

        let checkout = Arc::new(StoredCheckoutService::new(
            settings.policy,
            orders.clone(),
            profiles.clone(),
            lookup,
        ));

        Self {
            orders,
            profiles,
            checkout,
            credentials: settings.credentials,
        }
    }
}
