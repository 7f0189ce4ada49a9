//! Lookup Config

use std::time::Duration;

use clap::Args;
use pizzeria_app::domain::checkout::lookup::VIACEP_BASE_URL;

/// Postal code lookup settings.
#[derive(Debug, Args)]
pub(crate) struct LookupConfig {
    /// ViaCEP base URL
    #[arg(long = "lookup-url", env = "VIACEP_URL", default_value = VIACEP_BASE_URL)]
    pub url: String,

    /// Lookup request timeout in seconds
    #[arg(long = "lookup-timeout-seconds", env = "VIACEP_TIMEOUT_SECONDS", default_value_t = 5u64)]
    pub timeout_seconds: u64,
}

impl LookupConfig {
    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
