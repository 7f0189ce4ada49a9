//! Profiles service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use pizzeria::customers::Customer;
use tokio::sync::Mutex;
use tracing::debug;

use crate::{
    domain::profiles::{
        errors::ProfilesServiceError, models::CustomerProfile,
        repository::StoredProfilesRepository,
    },
    storage::KeyValueStore,
};

#[derive(Debug)]
pub struct StoredProfilesService {
    repository: StoredProfilesRepository,
    writes: Mutex<()>,
}

impl StoredProfilesService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            repository: StoredProfilesRepository::new(store),
            writes: Mutex::new(()),
        }
    }
}

#[async_trait]
impl ProfilesService for StoredProfilesService {
    #[tracing::instrument(
        name = "profiles.service.remember",
        skip(self, customer),
        fields(phone = %customer.phone),
        err
    )]
    async fn remember(
        &self,
        customer: &Customer,
        at: Timestamp,
    ) -> Result<CustomerProfile, ProfilesServiceError> {
        let _guard = self.writes.lock().await;

        let profile = CustomerProfile::from_customer(customer, at);

        let mut profiles = self.repository.load().await?;

        profiles.insert(profile.phone.clone(), profile.clone());

        self.repository.save(&profiles).await?;

        debug!(phone = %profile.phone, "remembered customer profile");

        Ok(profile)
    }

    async fn find(&self, phone: &str) -> Result<Option<CustomerProfile>, ProfilesServiceError> {
        let mut profiles = self.repository.load().await?;

        Ok(profiles.remove(phone.trim()))
    }
}

#[automock]
#[async_trait]
pub trait ProfilesService: Send + Sync {
    /// Stores the customer's details under their phone, replacing any previous profile.
    async fn remember(
        &self,
        customer: &Customer,
        at: Timestamp,
    ) -> Result<CustomerProfile, ProfilesServiceError>;

    /// Profile last stored for `phone`.
    async fn find(&self, phone: &str) -> Result<Option<CustomerProfile>, ProfilesServiceError>;
}
