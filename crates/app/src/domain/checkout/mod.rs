//! Checkout

pub mod errors;
pub mod lookup;
pub mod service;

pub use errors::CheckoutServiceError;
pub use lookup::{AddressLookup, LookupError, MockAddressLookup, ViaCepClient};
pub use service::*;
