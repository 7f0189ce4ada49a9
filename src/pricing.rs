//! Pricing

use rusty_money::{Money, MoneyError};
use thiserror::Error;

use crate::{
    cart::CartLine,
    customers::DeliveryType,
    money::{self, Reais},
};

/// Errors that can occur while calculating prices.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// An amount does not fit in minor units.
    #[error("amount overflow")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Unit price multiplied by quantity.
///
/// # Errors
///
/// Returns [`TotalPriceError::Overflow`] if the product does not fit.
pub fn line_total(unit_price: Reais, quantity: u32) -> Result<Reais, TotalPriceError> {
    let cents = unit_price
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .ok_or(TotalPriceError::Overflow)?;

    Ok(Money::from_minor(cents, unit_price.currency()))
}

/// Calculates the subtotal of a list of cart lines. An empty list totals zero.
///
/// # Errors
///
/// - [`TotalPriceError::Overflow`]: a line total does not fit.
/// - [`TotalPriceError::Money`]: wrapped money arithmetic or currency mismatch error.
pub fn total_price(lines: &[CartLine]) -> Result<Reais, TotalPriceError> {
    lines
        .iter()
        .try_fold(money::zero(), |acc, line| Ok(acc.add(line.total()?)?))
}

/// Subtotal, delivery fee and grand total of an order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBreakdown {
    /// Sum of line totals
    pub subtotal: Reais,

    /// Flat delivery fee, zero for pickup
    pub delivery_fee: Reais,

    /// Subtotal plus delivery fee
    pub total: Reais,
}

/// Prices an order: subtotal of the lines plus the flat fee when delivering.
///
/// # Errors
///
/// Returns a [`TotalPriceError`] if the amounts cannot be summed.
pub fn price_order(
    lines: &[CartLine],
    delivery_type: DeliveryType,
    delivery_fee: Reais,
) -> Result<PriceBreakdown, TotalPriceError> {
    let subtotal = total_price(lines)?;

    let delivery_fee = match delivery_type {
        DeliveryType::Delivery => delivery_fee,
        DeliveryType::Pickup => money::zero(),
    };

    Ok(PriceBreakdown {
        subtotal,
        delivery_fee,
        total: subtotal.add(delivery_fee)?,
    })
}
