//! Customer profiles
//!
//! Last-known contact and delivery details per phone number, used to pre-fill
//! the checkout form for returning customers.

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::ProfilesServiceError;
pub use service::*;
