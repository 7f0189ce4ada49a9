//! CLI configuration

use clap::Parser;
use pizzeria_app::{auth::AdminCredentials, context::AppSettings};

use crate::{
    commands::Command,
    config::{
        admin::{AdminConfig, AdminLogin},
        lookup::LookupConfig,
        observability::LoggingConfig,
        storage::StorageConfig,
        store::StoreConfig,
    },
};

pub(crate) mod admin;
pub(crate) mod lookup;
pub(crate) mod observability;
pub(crate) mod storage;
pub(crate) mod store;

/// Pizzeria ordering and admin CLI
#[derive(Debug, Parser)]
#[command(name = "pizzeria", about = "Pizzeria ordering and admin CLI", long_about = None)]
pub(crate) struct CliConfig {
    /// Store, delivery and menu settings.
    #[command(flatten)]
    pub store: StoreConfig,

    /// Where orders and profiles are kept.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Postal code lookup settings.
    #[command(flatten)]
    pub lookup: LookupConfig,

    /// Configured admin login.
    #[command(flatten)]
    pub admin: AdminConfig,

    /// Login presented by the caller for admin commands.
    #[command(flatten)]
    pub login: AdminLogin,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Application settings derived from the store, lookup and admin groups.
    pub(crate) fn settings(&self) -> AppSettings {
        AppSettings {
            policy: self.store.policy(),
            time_zone: self.store.time_zone.clone(),
            lookup_base_url: self.lookup.url.clone(),
            lookup_timeout: self.lookup.timeout(),
            credentials: AdminCredentials::new(
                &self.admin.admin_username,
                self.admin.admin_password.as_str(),
            ),
        }
    }
}
