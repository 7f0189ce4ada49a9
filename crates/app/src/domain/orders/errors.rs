//! Orders service errors.

use pizzeria::{
    orders::{OrderId, StatusLocked},
    pricing::TotalPriceError,
};
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order {0} not found")]
    NotFound(OrderId),

    #[error(transparent)]
    StatusLocked(#[from] StatusLocked),

    #[error("storage error")]
    Storage(#[from] StorageError),

    #[error("invalid order amounts")]
    Amounts(#[from] TotalPriceError),
}
