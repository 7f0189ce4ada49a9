//! Pizzeria Domain Concerns

pub mod checkout;
pub mod orders;
pub mod profiles;
