//! Money

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{BRL, Currency},
};
use thiserror::Error;

/// Amount of money in the storefront currency (Brazilian Real).
pub type Reais = Money<'static, Currency>;

/// Errors converting decimal amounts into money.
#[derive(Debug, Error, PartialEq)]
pub enum AmountError {
    /// The amount could not be parsed as a decimal number.
    #[error("invalid amount: {0}")]
    Invalid(String),

    /// The amount does not fit in minor units.
    #[error("amount out of range: {0}")]
    OutOfRange(Decimal),

    /// The amount is below zero where only non-negative amounts make sense.
    #[error("amount must not be negative: {0}")]
    Negative(String),
}

/// Money from a number of centavos.
#[must_use]
pub fn from_cents(cents: i64) -> Reais {
    Money::from_minor(cents, BRL)
}

/// Zero reais.
#[must_use]
pub fn zero() -> Reais {
    from_cents(0)
}

/// Converts a decimal amount of reais to money, rounding half-up to the centavo.
///
/// # Errors
///
/// Returns [`AmountError::OutOfRange`] if the amount overflows the minor unit range.
pub fn from_decimal(amount: Decimal) -> Result<Reais, AmountError> {
    let cents = amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|value| value.to_i64())
        .ok_or(AmountError::OutOfRange(amount))?;

    Ok(from_cents(cents))
}

/// Parses an amount such as `"38.00"` or `"38,50"`.
///
/// # Errors
///
/// Returns [`AmountError::Invalid`] if the input is not a decimal number.
pub fn parse_amount(s: &str) -> Result<Reais, AmountError> {
    let normalized = s.trim().replace(',', ".");

    let amount = normalized
        .parse::<Decimal>()
        .map_err(|_err| AmountError::Invalid(s.to_string()))?;

    from_decimal(amount)
}

/// Amount in reais as a decimal (two decimal places).
#[must_use]
pub fn to_decimal(money: &Reais) -> Decimal {
    Decimal::new(money.to_minor_units(), 2)
}

/// Formats money the Brazilian way without the symbol, e.g. `135,00`.
#[must_use]
pub fn format_reais(money: &Reais) -> String {
    let cents = money.to_minor_units();
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();

    format!("{sign}{},{:02}", abs / 100, abs % 100)
}

/// Serde adapter storing money as a JSON number of reais (e.g. `38.5`).
pub mod as_number {
    use rust_decimal::{
        Decimal,
        prelude::{FromPrimitive, ToPrimitive},
    };
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _, ser::Error as _};

    use super::{Reais, from_decimal, to_decimal};

    /// Serializes money as a floating point number of reais.
    ///
    /// # Errors
    ///
    /// Returns the serializer's error.
    pub fn serialize<S: Serializer>(money: &Reais, serializer: S) -> Result<S::Ok, S::Error> {
        let value = to_decimal(money)
            .to_f64()
            .ok_or_else(|| S::Error::custom("amount not representable"))?;

        serializer.serialize_f64(value)
    }

    /// Deserializes a JSON number of reais, rounding half-up to the centavo.
    ///
    /// # Errors
    ///
    /// Returns an error if the number is not finite or out of range.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Reais, D::Error> {
        let value = f64::deserialize(deserializer)?;

        let amount = Decimal::from_f64(value)
            .ok_or_else(|| D::Error::custom(format!("invalid amount: {value}")))?;

        from_decimal(amount).map_err(D::Error::custom)
    }

    /// Optional variant of [`as_number`](self).
    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer};

        use crate::money::Reais;

        /// Serializes an optional amount.
        ///
        /// # Errors
        ///
        /// Returns the serializer's error.
        #[expect(clippy::ref_option, reason = "signature required by `serde(with)`")]
        pub fn serialize<S: Serializer>(
            money: &Option<Reais>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match money {
                Some(money) => super::serialize(money, serializer),
                None => serializer.serialize_none(),
            }
        }

        /// Deserializes an optional amount.
        ///
        /// # Errors
        ///
        /// Returns an error if a present number is invalid.
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Reais>, D::Error> {
            #[derive(Deserialize)]
            struct Wrapper(#[serde(with = "super")] Reais);

            Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|Wrapper(money)| money))
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn from_decimal_rounds_half_up() -> TestResult {
        assert_eq!(from_decimal(Decimal::new(10_005, 3))?, from_cents(1001));
        assert_eq!(from_decimal(Decimal::new(10_004, 3))?, from_cents(1000));

        Ok(())
    }

    #[test]
    fn parse_amount_accepts_comma_decimal_separator() -> TestResult {
        assert_eq!(parse_amount("38,50")?, from_cents(3850));
        assert_eq!(parse_amount(" 7.00 ")?, from_cents(700));

        Ok(())
    }

    #[test]
    fn parse_amount_rejects_garbage() {
        assert!(matches!(parse_amount("sete"), Err(AmountError::Invalid(_))));
    }

    #[test]
    fn format_reais_uses_comma_and_two_places() {
        assert_eq!(format_reais(&from_cents(13_500)), "135,00");
        assert_eq!(format_reais(&from_cents(705)), "7,05");
        assert_eq!(format_reais(&from_cents(0)), "0,00");
        assert_eq!(format_reais(&from_cents(-250)), "-2,50");
    }

    #[test]
    fn to_decimal_keeps_two_places() {
        assert_eq!(to_decimal(&from_cents(4550)), Decimal::new(4550, 2));
    }
}
