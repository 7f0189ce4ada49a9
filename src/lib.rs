//! Pizzeria
//!
//! Ordering core for a single pizzeria: catalog, cart consolidation, checkout
//! validation, order composition, order history queries and the customer ledger.

pub mod address;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod customers;
pub mod ledger;
pub mod money;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod query;
pub mod summary;
