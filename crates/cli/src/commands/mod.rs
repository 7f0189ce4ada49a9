//! Subcommands

use std::io::Write;

use clap::Subcommand;
use pizzeria::catalog::Catalog;
use pizzeria_app::context::AppContext;

use crate::errors::CliError;

mod customers;
mod lookup;
mod menu;
mod order;
mod orders;
mod stats;
mod table;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Show the menu with prices per size
    Menu,

    /// Place an order and print the WhatsApp message and link
    Order(order::OrderArgs),

    /// Resolve a postal code inside the delivery area
    Lookup(lookup::LookupArgs),

    /// Browse and update orders (admin)
    Orders(orders::OrdersCommand),

    /// Customer ledger built from the order history (admin)
    Customers(customers::CustomersArgs),

    /// Dashboard numbers for a day (admin)
    Stats(stats::StatsArgs),
}

impl Command {
    /// Whether the command reads or changes the order history.
    pub(crate) fn requires_admin(&self) -> bool {
        matches!(self, Self::Orders(_) | Self::Customers(_) | Self::Stats(_))
    }
}

pub(crate) async fn run(
    command: Command,
    ctx: &AppContext,
    catalog: &Catalog,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        Command::Menu => menu::run(catalog, out),
        Command::Order(args) => order::run(&args, ctx, catalog, out).await,
        Command::Lookup(args) => lookup::run(&args, ctx, out).await,
        Command::Orders(command) => orders::run(command, ctx, out).await,
        Command::Customers(args) => customers::run(args, ctx, out).await,
        Command::Stats(args) => stats::run(&args, ctx, out).await,
    }
}
