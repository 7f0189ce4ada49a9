//! Admin authentication

mod credentials;
mod errors;

pub use credentials::*;
pub use errors::*;
