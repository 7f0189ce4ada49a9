//! Orders Repository

use std::sync::Arc;

use pizzeria::orders::Order;

use crate::storage::{KeyValueStore, StorageError};

/// Storage key of the order list.
pub(crate) const ORDERS_KEY: &str = "pizzaOrders";

/// Reads and writes the whole order list as one JSON array.
#[derive(Clone)]
pub(crate) struct StoredOrdersRepository {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for StoredOrdersRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredOrdersRepository").finish_non_exhaustive()
    }
}

impl StoredOrdersRepository {
    #[must_use]
    pub(crate) fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub(crate) async fn load(&self) -> Result<Vec<Order>, StorageError> {
        let stored = self.store.get(ORDERS_KEY).await?;

        let Some(raw) = stored.filter(|raw| !raw.trim().is_empty()) else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
            key: ORDERS_KEY.to_string(),
            source,
        })
    }

    pub(crate) async fn save(&self, orders: &[Order]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(orders).map_err(|source| StorageError::Encode {
            key: ORDERS_KEY.to_string(),
            source,
        })?;

        self.store.put(ORDERS_KEY, raw).await
    }
}
