//! Pizzeria CLI

use std::{io, process};

use pizzeria_app::context::AppContext;
use tracing::error;

use crate::{config::CliConfig, errors::CliError};

mod commands;
mod config;
mod errors;
mod logging;

/// Pizzeria CLI entry point
#[tokio::main]
pub async fn main() {
    let config = CliConfig::load().unwrap_or_else(|e| e.exit());

    if let Err(error) = logging::init(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for setup errors"
        )]
        {
            eprintln!("{}", CliError::from(error));
        }

        process::exit(1);
    }

    if let Err(error) = run(config).await {
        error!(%error, "command failed");

        #[expect(
            clippy::print_stderr,
            reason = "the failure is reported to the operator regardless of log level"
        )]
        {
            eprintln!("{error}");
        }

        process::exit(1);
    }
}

async fn run(config: CliConfig) -> Result<(), CliError> {
    let catalog = config.store.catalog()?;
    let ctx = AppContext::from_data_dir(&config.storage.data_dir, config.settings()).await?;

    if config.command.requires_admin() {
        ctx.credentials.verify(
            config.login.user.as_deref().unwrap_or_default(),
            config.login.password.as_deref().unwrap_or_default(),
        )?;
    }

    let mut out = io::stdout().lock();

    commands::run(config.command, &ctx, &catalog, &mut out).await
}
