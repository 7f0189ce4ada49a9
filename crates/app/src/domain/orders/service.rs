//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::{civil::Date, tz::TimeZone};
use mockall::automock;
use pizzeria::{
    ledger::{self, CustomerStat},
    orders::{Order, OrderId, OrderStatus, TransitionPolicy},
    query::{self, DashboardStats, OrderFilter},
};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::{
    domain::orders::{errors::OrdersServiceError, repository::StoredOrdersRepository},
    storage::KeyValueStore,
};

#[derive(Debug)]
pub struct StoredOrdersService {
    repository: StoredOrdersRepository,
    time_zone: TimeZone,
    writes: Mutex<()>,
}

impl StoredOrdersService {
    /// Service over `store`, evaluating calendar days in `time_zone`.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, time_zone: TimeZone) -> Self {
        Self {
            repository: StoredOrdersRepository::new(store),
            time_zone,
            writes: Mutex::new(()),
        }
    }
}

#[async_trait]
impl OrdersService for StoredOrdersService {
    #[tracing::instrument(
        name = "orders.service.append",
        skip(self, order),
        fields(order_id = %order.id(), phone = %order.customer().phone),
        err
    )]
    async fn append(&self, order: Order) -> Result<Order, OrdersServiceError> {
        let _guard = self.writes.lock().await;

        let mut orders = self.repository.load().await?;

        orders.push(order.clone());

        self.repository.save(&orders).await?;

        info!(order_id = %order.id(), status = %order.status(), "stored order");

        Ok(order)
    }

    #[tracing::instrument(
        name = "orders.service.set_status",
        skip(self, id),
        fields(order_id = %id, status = %status),
        err
    )]
    async fn set_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        policy: TransitionPolicy,
    ) -> Result<Order, OrdersServiceError> {
        let _guard = self.writes.lock().await;

        let mut orders = self.repository.load().await?;

        let order = orders
            .iter_mut()
            .find(|order| order.id() == id)
            .ok_or_else(|| OrdersServiceError::NotFound(id.clone()))?;

        let previous = order.apply_status(status, policy)?;

        if previous == status {
            debug!(order_id = %id, %status, "status unchanged");

            return Ok(order.clone());
        }

        let updated = order.clone();

        self.repository.save(&orders).await?;

        info!(order_id = %id, from = %previous, to = %status, "updated order status");

        Ok(updated)
    }

    async fn list(&self) -> Result<Vec<Order>, OrdersServiceError> {
        let orders = self.repository.load().await?;

        debug!(count = orders.len(), "loaded orders");

        Ok(orders)
    }

    async fn query(&self, filter: OrderFilter) -> Result<Vec<Order>, OrdersServiceError> {
        let orders = self.repository.load().await?;

        Ok(query::query(&orders, &filter, &self.time_zone)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn daily_view(&self, date: Date) -> Result<Vec<Order>, OrdersServiceError> {
        let orders = self.repository.load().await?;

        Ok(query::daily_view(&orders, date, &self.time_zone)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn previous_day_paid_view(&self, today: Date) -> Result<Vec<Order>, OrdersServiceError> {
        let orders = self.repository.load().await?;

        Ok(query::previous_day_paid_view(&orders, today, &self.time_zone)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn customer_ledger(
        &self,
        search: Option<String>,
    ) -> Result<Vec<CustomerStat>, OrdersServiceError> {
        let orders = self.repository.load().await?;

        let mut stats = ledger::rebuild(&orders)?;

        if let Some(term) = search {
            stats.retain(|stat| stat.matches(&term));
        }

        Ok(stats)
    }

    async fn dashboard_stats(&self, date: Date) -> Result<DashboardStats, OrdersServiceError> {
        let orders = self.repository.load().await?;

        let today = query::daily_view(&orders, date, &self.time_zone);

        Ok(DashboardStats::compute(today)?)
    }

    fn time_zone(&self) -> TimeZone {
        self.time_zone.clone()
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Appends a new order. Placing the same order twice stores two records.
    async fn append(&self, order: Order) -> Result<Order, OrdersServiceError>;

    /// Changes the status of an order, leaving every other field untouched.
    async fn set_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        policy: TransitionPolicy,
    ) -> Result<Order, OrdersServiceError>;

    /// All orders, in insertion order.
    async fn list(&self) -> Result<Vec<Order>, OrdersServiceError>;

    /// Orders matching `filter`, in insertion order.
    async fn query(&self, filter: OrderFilter) -> Result<Vec<Order>, OrdersServiceError>;

    /// Orders created on `date`.
    async fn daily_view(&self, date: Date) -> Result<Vec<Order>, OrdersServiceError>;

    /// Paid orders from the day before `today`.
    async fn previous_day_paid_view(&self, today: Date) -> Result<Vec<Order>, OrdersServiceError>;

    /// Per-customer statistics, optionally narrowed by a name or phone search.
    async fn customer_ledger(
        &self,
        search: Option<String>,
    ) -> Result<Vec<CustomerStat>, OrdersServiceError>;

    /// Headline numbers for the orders created on `date`.
    async fn dashboard_stats(&self, date: Date) -> Result<DashboardStats, OrdersServiceError>;

    /// Time zone used for calendar days.
    fn time_zone(&self) -> TimeZone;
}
