//! CLI errors.

use std::io;

use pizzeria::{catalog::CatalogError, pricing::TotalPriceError};
use pizzeria_app::{
    auth::AuthError,
    context::AppInitError,
    domain::{checkout::CheckoutServiceError, orders::OrdersServiceError},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("failed to initialise logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("failed to load menu: {0}")]
    Catalog(#[from] CatalogError),

    #[error("failed to start: {0}")]
    Init(#[from] AppInitError),

    #[error("admin login required: {0}")]
    Auth(#[from] AuthError),

    #[error("{0}")]
    Checkout(#[from] CheckoutServiceError),

    #[error("{0}")]
    Orders(#[from] OrdersServiceError),

    #[error("amounts could not be computed: {0}")]
    Amounts(#[from] TotalPriceError),

    #[error("unknown product: {0}")]
    UnknownProduct(String),

    #[error("failed to write output")]
    Output(#[from] io::Error),

    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}
