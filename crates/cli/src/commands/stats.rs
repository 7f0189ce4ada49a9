//! Daily dashboard

use std::io::Write;

use clap::Args;
use jiff::civil::Date;
use pizzeria::money::format_reais;
use pizzeria_app::context::AppContext;

use crate::{commands::orders::today, errors::CliError};

#[derive(Debug, Args)]
pub(super) struct StatsArgs {
    /// Day to summarise (YYYY-MM-DD); today in the store's time zone when omitted
    #[arg(long)]
    date: Option<Date>,
}

pub(super) async fn run(
    args: &StatsArgs,
    ctx: &AppContext,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let date = args.date.unwrap_or_else(|| today(&ctx.orders.time_zone()));
    let stats = ctx.orders.dashboard_stats(date).await?;

    writeln!(out, "date: {date}")?;
    writeln!(out, "orders: {}", stats.total_orders)?;
    writeln!(out, "pending: {}", stats.pending)?;
    writeln!(out, "delivered: {}%", stats.delivered_percent())?;
    writeln!(out, "revenue: R$ {}", format_reais(&stats.revenue))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use pizzeria_app::context::AppSettings;
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn empty_day_reports_zeroes() -> TestResult {
        let ctx = AppContext::in_memory(AppSettings::default())?;
        let mut out = Vec::new();

        run(
            &StatsArgs {
                date: Some(date(2026, 10, 17)),
            },
            &ctx,
            &mut out,
        )
        .await?;

        let text = String::from_utf8(out)?;

        assert!(text.starts_with("date: 2026-10-17\norders: 0\npending: 0\n"));
        assert!(text.ends_with("revenue: R$ 0,00\n"));

        Ok(())
    }
}
