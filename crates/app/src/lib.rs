//! Pizzeria application services: persistence, checkout and the admin surface.

pub mod auth;
pub mod context;
pub mod domain;
pub mod storage;

#[cfg(test)]
mod test;
