//! Customer ledger
//!
//! Per-phone aggregates derived from the order history. Nothing here is stored:
//! the ledger is rebuilt from the full list of orders every time it is read.

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::{
    money::{self, Reais},
    orders::Order,
    pricing::TotalPriceError,
};

/// Order history summary for one phone number.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerStat {
    /// Phone number, the grouping key
    pub phone: String,

    /// Name on the most recent order
    pub name: String,

    /// Number of orders placed
    pub total_orders: usize,

    /// Sum of order totals
    #[serde(with = "money::as_number")]
    pub total_spent: Reais,

    /// Time of the most recent order
    pub last_order_at: Timestamp,
}

impl CustomerStat {
    fn first(order: &Order) -> Self {
        Self {
            phone: order.customer().phone.clone(),
            name: order.customer().name.clone(),
            total_orders: 1,
            total_spent: order.total(),
            last_order_at: order.created_at(),
        }
    }

    fn record(&mut self, order: &Order) -> Result<(), TotalPriceError> {
        self.total_orders += 1;
        self.total_spent = self.total_spent.add(order.total())?;

        if order.created_at() > self.last_order_at {
            self.last_order_at = order.created_at();
            self.name.clone_from(&order.customer().name);
        }

        Ok(())
    }

    /// Case-insensitive match of `term` against the name, or a plain match against the phone.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim();

        term.is_empty()
            || self.name.to_lowercase().contains(&term.to_lowercase())
            || self.phone.contains(term)
    }
}

/// Folds every order into per-phone statistics, highest spenders first.
///
/// Customers with equal spend keep the order in which their phone first appears.
///
/// # Errors
///
/// Returns a [`TotalPriceError`] if order totals cannot be summed.
pub fn rebuild(orders: &[Order]) -> Result<Vec<CustomerStat>, TotalPriceError> {
    let mut positions: FxHashMap<&str, usize> = FxHashMap::default();
    let mut stats: Vec<CustomerStat> = Vec::new();

    for order in orders {
        let phone = order.customer().phone.as_str();

        match positions.get(phone).and_then(|&position| stats.get_mut(position)) {
            Some(stat) => stat.record(order)?,
            None => {
                positions.insert(phone, stats.len());
                stats.push(CustomerStat::first(order));
            }
        }
    }

    stats.sort_by(|a, b| {
        b.total_spent
            .to_minor_units()
            .cmp(&a.total_spent.to_minor_units())
    });

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        customers::{DeliveryType, PaymentMethod},
        money::from_cents,
        orders::OrderCustomer,
    };

    use super::*;

    fn order(name: &str, phone: &str, total: i64, at: i64) -> Result<Order, jiff::Error> {
        Ok(Order::new(
            OrderCustomer {
                name: name.to_string(),
                phone: phone.to_string(),
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
            Timestamp::from_second(at)?,
        ))
    }

    #[test]
    fn sums_orders_per_phone() -> TestResult {
        let orders = [
            order("Ana", "(96) 99999-0000", 30_00, 100)?,
            order("Ana", "(96) 99999-0000", 45_50, 200)?,
        ];

        let stats = rebuild(&orders)?;
        let stat = stats.first().ok_or("expected one customer")?;

        assert_eq!(stats.len(), 1);
        assert_eq!(stat.total_orders, 2);
        assert_eq!(stat.total_spent, from_cents(75_50));
        assert_eq!(stat.last_order_at, Timestamp::from_second(200)?);

        Ok(())
    }

    #[test]
    fn most_recent_name_wins_regardless_of_order() -> TestResult {
        let orders = [
            order("Ana Maria", "(96) 99999-0000", 10_00, 300)?,
            order("Ana", "(96) 99999-0000", 10_00, 100)?,
        ];

        let stats = rebuild(&orders)?;

        assert_eq!(stats.first().map(|stat| stat.name.as_str()), Some("Ana Maria"));

        Ok(())
    }

    #[test]
    fn name_tie_keeps_first_seen() -> TestResult {
        let orders = [
            order("Primeiro", "(96) 99999-0000", 10_00, 100)?,
            order("Segundo", "(96) 99999-0000", 10_00, 100)?,
        ];

        let stats = rebuild(&orders)?;

        assert_eq!(stats.first().map(|stat| stat.name.as_str()), Some("Primeiro"));

        Ok(())
    }

    #[test]
    fn sorted_by_spend_with_stable_ties() -> TestResult {
        let orders = [
            order("Ana", "(96) 1111-1111", 20_00, 100)?,
            order("Bia", "(96) 2222-2222", 50_00, 100)?,
            order("Caio", "(96) 3333-3333", 20_00, 100)?,
        ];

        let names: Vec<_> = rebuild(&orders)?
            .into_iter()
            .map(|stat| stat.name)
            .collect();

        assert_eq!(names, vec!["Bia", "Ana", "Caio"]);

        Ok(())
    }

    #[test]
    fn rebuild_is_deterministic() -> TestResult {
        let orders = [
            order("Ana", "(96) 1111-1111", 20_00, 100)?,
            order("Bia", "(96) 2222-2222", 50_00, 200)?,
            order("Ana", "(96) 1111-1111", 45_00, 300)?,
        ];

        assert_eq!(rebuild(&orders)?, rebuild(&orders)?);

        Ok(())
    }

    #[test]
    fn empty_history_has_no_customers() -> TestResult {
        assert!(rebuild(&[])?.is_empty());

        Ok(())
    }

    #[test]
    fn matches_name_or_phone() -> TestResult {
        let stats = rebuild(&[order("Ana Maria", "(96) 99999-0000", 10_00, 100)?])?;
        let stat = stats.first().ok_or("expected one customer")?;

        assert!(stat.matches("maria"));
        assert!(stat.matches("99999"));
        assert!(stat.matches(""));
        assert!(!stat.matches("joão"));

        Ok(())
    }
}
