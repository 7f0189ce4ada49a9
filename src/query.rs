//! Order queries and dashboard projections
//!
//! Read-only views over a slice of orders. Calendar days are evaluated in the
//! store's time zone, so an order placed at 22:00 local time belongs to that
//! local day even though it is already the next day in UTC.

use decimal_percentage::Percentage;
use jiff::{Timestamp, civil::Date, tz::TimeZone};
use rust_decimal::{Decimal, prelude::FromPrimitive};

use crate::{
    money::{self, Reais},
    orders::{Order, OrderStatus},
    pricing::TotalPriceError,
};

/// Inclusive range of calendar days. An open end is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// First day included
    pub from: Option<Date>,

    /// Last day included
    pub to: Option<Date>,
}

impl DateRange {
    /// Range covering a single day.
    #[must_use]
    pub fn day(date: Date) -> Self {
        Self {
            from: Some(date),
            to: Some(date),
        }
    }

    /// Whether `date` lies within the range.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// Filters combined with logical AND. Unset filters match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    /// Substring of the customer name (any case), phone or order id
    pub search: Option<String>,

    /// Exact status
    pub status: Option<OrderStatus>,

    /// Calendar days the order was created on
    pub created: Option<DateRange>,
}

impl OrderFilter {
    /// Whether `order` passes every set filter.
    #[must_use]
    pub fn matches(&self, order: &Order, tz: &TimeZone) -> bool {
        self.matches_search(order)
            && self.status.is_none_or(|status| order.status() == status)
            && self
                .created
                .is_none_or(|range| range.contains(calendar_day(order.created_at(), tz)))
    }

    fn matches_search(&self, order: &Order) -> bool {
        let Some(term) = self.search.as_deref().map(str::trim).filter(|term| !term.is_empty())
        else {
            return true;
        };

        let customer = order.customer();

        customer.name.to_lowercase().contains(&term.to_lowercase())
            || customer.phone.contains(term)
            || order.id().as_str().contains(term)
    }
}

/// Local calendar day of `timestamp` in `tz`.
#[must_use]
pub fn calendar_day(timestamp: Timestamp, tz: &TimeZone) -> Date {
    tz.to_datetime(timestamp).date()
}

/// Orders passing `filter`, in store order.
#[must_use]
pub fn query<'a>(orders: &'a [Order], filter: &OrderFilter, tz: &TimeZone) -> Vec<&'a Order> {
    orders
        .iter()
        .filter(|order| filter.matches(order, tz))
        .collect()
}

/// Orders created on `date`.
#[must_use]
pub fn daily_view<'a>(orders: &'a [Order], date: Date, tz: &TimeZone) -> Vec<&'a Order> {
    query(
        orders,
        &OrderFilter {
            created: Some(DateRange::day(date)),
            ..OrderFilter::default()
        },
        tz,
    )
}

/// Paid orders created on the day before `today`.
#[must_use]
pub fn previous_day_paid_view<'a>(
    orders: &'a [Order],
    today: Date,
    tz: &TimeZone,
) -> Vec<&'a Order> {
    let Ok(yesterday) = today.yesterday() else {
        return Vec::new();
    };

    query(
        orders,
        &OrderFilter {
            status: Some(OrderStatus::Paid),
            created: Some(DateRange::day(yesterday)),
            ..OrderFilter::default()
        },
        tz,
    )
}

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardStats {
    /// Number of orders
    pub total_orders: usize,

    /// Orders still waiting for payment
    pub pending: usize,

    /// Orders handed to the customer
    pub delivered: usize,

    /// Sum of totals of paid and delivered orders
    pub revenue: Reais,
}

impl DashboardStats {
    /// Computes the statistics over `orders`.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if the revenue cannot be summed.
    pub fn compute<'a>(
        orders: impl IntoIterator<Item = &'a Order>,
    ) -> Result<Self, TotalPriceError> {
        let mut total_orders = 0_usize;
        let mut pending = 0_usize;
        let mut delivered = 0_usize;
        let mut revenue = money::zero();

        for order in orders {
            total_orders += 1;

            match order.status() {
                OrderStatus::Pending => pending += 1,
                OrderStatus::Delivered => delivered += 1,
                OrderStatus::Paid | OrderStatus::Preparing | OrderStatus::Ready => {}
            }

            if order.status().is_settled() {
                revenue = revenue.add(order.total())?;
            }
        }

        Ok(Self {
            total_orders,
            pending,
            delivered,
            revenue,
        })
    }

    /// Fraction of orders that were delivered; zero when there are no orders.
    #[must_use]
    pub fn delivered_share(&self) -> Percentage {
        match (
            Decimal::from_usize(self.delivered),
            Decimal::from_usize(self.total_orders),
        ) {
            (Some(delivered), Some(total)) if !total.is_zero() => {
                Percentage::from(delivered / total)
            }
            _ => Percentage::from(0.0),
        }
    }

    /// Delivered share in percent points, rounded to two places (e.g. `33.33`).
    #[must_use]
    pub fn delivered_percent(&self) -> Decimal {
        (self.delivered_share() * Decimal::ONE_HUNDRED).round_dp(2)
    }
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, tz};
    use testresult::TestResult;

    use crate::{
        customers::{DeliveryType, PaymentMethod},
        money::from_cents,
        orders::{OrderCustomer, TransitionPolicy},
    };

    use super::*;

    fn belem() -> TimeZone {
        TimeZone::fixed(tz::offset(-3))
    }

    fn order(
        id: &str,
        name: &str,
        status: OrderStatus,
        total: i64,
        created_at: &str,
    ) -> Result<Order, Box<dyn std::error::Error>> {
        let mut order = Order::new(
            OrderCustomer {
                name: name.to_string(),
                phone: format!("(96) 9{id}000-0000"),
                delivery_type: DeliveryType::Pickup,
                cep: None,
                address: None,
                number: None,
                complement: None,
                reference: None,
            },
            Vec::new(),
            PaymentMethod::Pix,
            from_cents(total),
            created_at.parse()?,
        )
        .with_id(id);

        order.apply_status(status, TransitionPolicy::Override)?;

        Ok(order)
    }

    fn history() -> Result<Vec<Order>, Box<dyn std::error::Error>> {
        Ok(vec![
            order("1", "Ana Maria", OrderStatus::Paid, 30_00, "2026-10-16T15:00:00Z")?,
            order("2", "Bruno", OrderStatus::Pending, 40_00, "2026-10-16T23:30:00Z")?,
            order("3", "Carla", OrderStatus::Delivered, 50_00, "2026-10-17T02:59:00Z")?,
            order("4", "Davi", OrderStatus::Paid, 60_00, "2026-10-17T03:00:00Z")?,
        ])
    }

    fn ids(orders: &[&Order]) -> Vec<String> {
        orders.iter().map(|order| order.id().to_string()).collect()
    }

    #[test]
    fn calendar_day_uses_local_time() -> TestResult {
        let late_evening: Timestamp = "2026-10-17T02:59:00Z".parse()?;

        assert_eq!(calendar_day(late_evening, &belem()), date(2026, 10, 16));

        Ok(())
    }

    #[test]
    fn daily_view_restricts_to_local_day() -> TestResult {
        let orders = history()?;

        let today = daily_view(&orders, date(2026, 10, 17), &belem());

        assert_eq!(ids(&today), vec!["4"]);

        Ok(())
    }

    #[test]
    fn previous_day_view_keeps_paid_only() -> TestResult {
        let orders = history()?;

        let yesterday = previous_day_paid_view(&orders, date(2026, 10, 17), &belem());

        assert_eq!(ids(&yesterday), vec!["1"]);

        Ok(())
    }

    #[test]
    fn search_is_case_insensitive_for_names() -> TestResult {
        let orders = history()?;
        let filter = OrderFilter {
            search: Some("MARIA".to_string()),
            ..OrderFilter::default()
        };

        assert_eq!(ids(&query(&orders, &filter, &belem())), vec!["1"]);

        Ok(())
    }

    #[test]
    fn search_matches_phone_and_id() -> TestResult {
        let orders = history()?;
        let by_phone = OrderFilter {
            search: Some("93000".to_string()),
            ..OrderFilter::default()
        };
        let by_id = OrderFilter {
            search: Some("2".to_string()),
            ..OrderFilter::default()
        };

        assert_eq!(ids(&query(&orders, &by_phone, &belem())), vec!["3"]);
        assert_eq!(ids(&query(&orders, &by_id, &belem())), vec!["2"]);

        Ok(())
    }

    #[test]
    fn filters_combine_with_and() -> TestResult {
        let orders = history()?;
        let filter = OrderFilter {
            search: None,
            status: Some(OrderStatus::Paid),
            created: Some(DateRange {
                from: Some(date(2026, 10, 17)),
                to: None,
            }),
        };

        assert_eq!(ids(&query(&orders, &filter, &belem())), vec!["4"]);

        Ok(())
    }

    #[test]
    fn empty_filter_keeps_store_order() -> TestResult {
        let orders = history()?;

        let all = query(&orders, &OrderFilter::default(), &belem());

        assert_eq!(ids(&all), vec!["1", "2", "3", "4"]);

        Ok(())
    }

    #[test]
    fn date_range_is_inclusive() {
        let range = DateRange {
            from: Some(date(2026, 10, 1)),
            to: Some(date(2026, 10, 31)),
        };

        assert!(range.contains(date(2026, 10, 1)));
        assert!(range.contains(date(2026, 10, 31)));
        assert!(!range.contains(date(2026, 11, 1)));
    }

    #[test]
    fn dashboard_counts_settled_revenue() -> TestResult {
        let orders = history()?;

        let stats = DashboardStats::compute(&orders)?;

        assert_eq!(stats.total_orders, 4);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.delivered, 1);
        assert_eq!(stats.revenue, from_cents(140_00));
        assert_eq!(stats.delivered_percent(), Decimal::new(25, 0));

        Ok(())
    }

    #[test]
    fn dashboard_of_nothing_is_zero() -> TestResult {
        let stats = DashboardStats::compute(&[])?;

        assert_eq!(stats.total_orders, 0);
        assert_eq!(stats.revenue, from_cents(0));
        assert_eq!(stats.delivered_percent(), Decimal::ZERO);

        Ok(())
    }
}
