//! Customer ledger

use std::io::Write;

use clap::Args;
use pizzeria::money::format_reais;
use pizzeria_app::context::AppContext;
use tabled::builder::Builder;

use crate::{commands::table, errors::CliError};

#[derive(Debug, Args)]
pub(super) struct CustomersArgs {
    /// Part of the customer name or phone
    #[arg(long)]
    search: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

pub(super) async fn run(
    args: CustomersArgs,
    ctx: &AppContext,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let stats = ctx.orders.customer_ledger(args.search).await?;

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &stats)?;
        writeln!(out)?;

        return Ok(());
    }

    if stats.is_empty() {
        writeln!(out, "no customers found")?;

        return Ok(());
    }

    let tz = ctx.orders.time_zone();
    let mut builder = Builder::default();

    builder.push_record(["Cliente", "Telefone", "Pedidos", "Total gasto", "Último pedido"]);

    for stat in &stats {
        builder.push_record([
            stat.name.clone(),
            stat.phone.clone(),
            stat.total_orders.to_string(),
            format_reais(&stat.total_spent),
            stat.last_order_at
                .to_zoned(tz.clone())
                .strftime("%d/%m/%Y %H:%M")
                .to_string(),
        ]);
    }

    writeln!(out, "{}", table::build(builder, 2..4))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use pizzeria::{
        cart::Cart,
        catalog::{Catalog, SizeLabel},
        customers::Customer,
    };
    use pizzeria_app::context::AppSettings;
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn ledger_groups_orders_by_phone() -> TestResult {
        let ctx = AppContext::in_memory(AppSettings::default())?;
        let catalog = Catalog::house_menu()?;
        let tucuma = catalog.get("1").ok_or("missing product")?;

        for name in ["Ana", "Ana Paula"] {
            let mut cart = Cart::new();
            cart.add_selection(tucuma, SizeLabel::M);

            ctx.checkout
                .place_order(&Customer::pickup(name, "(96) 98888-7777"), &mut cart)
                .await?;
        }

        let mut out = Vec::new();

        run(
            CustomersArgs {
                search: Some("98888".to_string()),
                json: true,
            },
            &ctx,
            &mut out,
        )
        .await?;

        let json: serde_json::Value = serde_json::from_slice(&out)?;
        let stats = json.as_array().ok_or("expected an array")?;
        let stat = stats.first().ok_or("expected one customer")?;

        assert_eq!(stats.len(), 1);
        assert_eq!(stat["totalOrders"], 2);
        assert_eq!(stat["totalSpent"], serde_json::json!(76.0));

        Ok(())
    }
}
