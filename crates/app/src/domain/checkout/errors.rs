//! Checkout service errors.

use pizzeria::{address::InvalidPostalCode, checkout::CheckoutError};
use thiserror::Error;

use crate::domain::{checkout::lookup::LookupError, orders::OrdersServiceError};

#[derive(Debug, Error)]
pub enum CheckoutServiceError {
    #[error("another request is already in progress")]
    Busy,

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("failed to store order")]
    Orders(#[from] OrdersServiceError),

    #[error(transparent)]
    InvalidPostalCode(#[from] InvalidPostalCode),

    #[error("postal code {0} not found")]
    AddressNotFound(String),

    #[error("we do not deliver to {city}")]
    OutOfServiceArea { city: String },

    #[error("address lookup failed")]
    Lookup(#[from] LookupError),
}
