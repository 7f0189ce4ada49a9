//! Order listing and status changes

use std::io::Write;

use clap::{Args, Subcommand};
use jiff::{Timestamp, civil::Date, tz::TimeZone};
use pizzeria::{
    money::format_reais,
    orders::{Order, OrderId, OrderStatus, TransitionPolicy},
    query::{DateRange, OrderFilter},
    summary,
};
use pizzeria_app::{context::AppContext, domain::orders::OrdersServiceError};
use tabled::builder::Builder;

use crate::{commands::table, errors::CliError};

#[derive(Debug, Args)]
pub(super) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// Search the order history
    List(ListArgs),

    /// Orders placed on a day, today by default
    Today(DayArgs),

    /// Paid orders from the day before, yesterday by default
    Yesterday(DayArgs),

    /// Print the WhatsApp message of a stored order
    Show(ShowArgs),

    /// Change the status of an order
    Status(StatusArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Part of the customer name, phone or order id
    #[arg(long)]
    search: Option<String>,

    /// Only orders with this status
    #[arg(long, value_parser = parse_status)]
    status: Option<OrderStatus>,

    /// First day included (YYYY-MM-DD)
    #[arg(long)]
    from: Option<Date>,

    /// Last day included (YYYY-MM-DD)
    #[arg(long)]
    to: Option<Date>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct DayArgs {
    /// Day to show (YYYY-MM-DD); today in the store's time zone when omitted
    #[arg(long)]
    date: Option<Date>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Order id
    id: String,
}

#[derive(Debug, Args)]
struct StatusArgs {
    /// Order id
    id: String,

    /// New status (pending, paid, preparing, ready, delivered)
    #[arg(value_parser = parse_status)]
    status: OrderStatus,

    /// Allow changing an order that is already paid
    #[arg(long)]
    force: bool,
}

pub(super) async fn run(
    command: OrdersCommand,
    ctx: &AppContext,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let tz = ctx.orders.time_zone();

    match command.command {
        OrdersSubcommand::List(args) => {
            let filter = OrderFilter {
                search: args.search,
                status: args.status,
                created: (args.from.is_some() || args.to.is_some()).then_some(DateRange {
                    from: args.from,
                    to: args.to,
                }),
            };

            let orders = ctx.orders.query(filter).await?;

            write_orders(out, &orders, &tz, args.json)
        }
        OrdersSubcommand::Today(args) => {
            let date = args.date.unwrap_or_else(|| today(&tz));
            let orders = ctx.orders.daily_view(date).await?;

            write_orders(out, &orders, &tz, args.json)
        }
        OrdersSubcommand::Yesterday(args) => {
            let date = args.date.unwrap_or_else(|| today(&tz));
            let orders = ctx.orders.previous_day_paid_view(date).await?;

            write_orders(out, &orders, &tz, args.json)
        }
        OrdersSubcommand::Show(args) => {
            let id = OrderId::from(args.id);
            let orders = ctx.orders.list().await?;

            let order = orders
                .iter()
                .find(|order| *order.id() == id)
                .ok_or(OrdersServiceError::NotFound(id))?;

            let message = summary::render(order, &ctx.checkout.policy().store_name)?;

            writeln!(out, "{message}")?;

            Ok(())
        }
        OrdersSubcommand::Status(args) => {
            let policy = if args.force {
                TransitionPolicy::Override
            } else {
                TransitionPolicy::Standard
            };

            let order = ctx
                .orders
                .set_status(&OrderId::from(args.id), args.status, policy)
                .await?;

            writeln!(out, "{}: {}", order.id(), order.status().label())?;

            Ok(())
        }
    }
}

pub(super) fn today(tz: &TimeZone) -> Date {
    Timestamp::now().to_zoned(tz.clone()).date()
}

fn parse_status(value: &str) -> Result<OrderStatus, String> {
    OrderStatus::parse(value).ok_or_else(|| {
        format!("unknown status {value:?}, expected pending, paid, preparing, ready or delivered")
    })
}

fn write_orders(
    out: &mut impl Write,
    orders: &[Order],
    tz: &TimeZone,
    json: bool,
) -> Result<(), CliError> {
    if json {
        serde_json::to_writer_pretty(&mut *out, orders)?;
        writeln!(out)?;

        return Ok(());
    }

    if orders.is_empty() {
        writeln!(out, "no orders found")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record([
        "Id", "Criado em", "Cliente", "Telefone", "Tipo", "Pagamento", "Total", "Status",
    ]);

    for order in orders {
        let customer = order.customer();

        builder.push_record([
            order.id().to_string(),
            order
                .created_at()
                .to_zoned(tz.clone())
                .strftime("%d/%m/%Y %H:%M")
                .to_string(),
            customer.name.clone(),
            customer.phone.clone(),
            customer.delivery_type.label().to_string(),
            order.payment_method().label().to_string(),
            format_reais(&order.total()),
            order.status().label().to_string(),
        ]);
    }

    writeln!(out, "{}", table::build(builder, 6..7))?;

    Ok(())
}
