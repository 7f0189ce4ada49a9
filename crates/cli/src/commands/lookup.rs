//! Postal code lookup

use std::io::Write;

use clap::Args;
use pizzeria_app::context::AppContext;

use crate::errors::CliError;

#[derive(Debug, Args)]
pub(super) struct LookupArgs {
    /// Postal code (CEP), with or without the dash
    cep: String,
}

pub(super) async fn run(
    args: &LookupArgs,
    ctx: &AppContext,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let address = ctx.checkout.lookup_address(&args.cep).await?;

    writeln!(out, "street: {}", address.street)?;
    writeln!(out, "neighborhood: {}", address.neighborhood)?;
    writeln!(out, "city: {}", address.city)?;
    writeln!(out, "state: {}", address.state)?;

    Ok(())
}
