//! Postal codes and the serviceable area

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::customers::{Address, digits};

/// A postal code that is not 8 digits long.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid postal code: {0}")]
pub struct InvalidPostalCode(pub String);

/// Brazilian postal code (CEP), normalised to 8 digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalCode(String);

impl PostalCode {
    /// Digits only, e.g. `68900000`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display form, e.g. `68900-000`.
    #[must_use]
    pub fn formatted(&self) -> String {
        let (head, tail) = self.0.split_at(5);

        format!("{head}-{tail}")
    }
}

impl FromStr for PostalCode {
    type Err = InvalidPostalCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = digits(s);

        if digits.len() == 8 {
            Ok(Self(digits))
        } else {
            Err(InvalidPostalCode(s.to_string()))
        }
    }
}

impl Display for PostalCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Address returned by a postal code lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAddress {
    /// Street
    pub street: String,

    /// Neighborhood
    pub neighborhood: String,

    /// City
    pub city: String,

    /// State (UF)
    pub state: String,
}

impl ResolvedAddress {
    /// Builds a delivery address from the lookup result and the customer's own details.
    #[must_use]
    pub fn into_address(
        self,
        cep: &PostalCode,
        number: impl Into<String>,
        complement: Option<String>,
        reference: Option<String>,
    ) -> Address {
        Address {
            cep: cep.formatted(),
            street: self.street,
            neighborhood: self.neighborhood,
            city: self.city,
            state: self.state,
            number: number.into(),
            complement,
            reference,
        }
    }
}

/// The city (and optionally state) where deliveries are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceableArea {
    city: String,
    state: Option<String>,
}

impl ServiceableArea {
    /// Area covering a single city.
    pub fn new(city: impl Into<String>, state: Option<String>) -> Self {
        Self {
            city: city.into(),
            state,
        }
    }

    /// Serviceable city name as configured.
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Serviceable state, if restricted.
    #[must_use]
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    /// Whether `city`/`state` fall inside the area, ignoring case and accents.
    #[must_use]
    pub fn accepts(&self, city: &str, state: &str) -> bool {
        let city_matches = fold_place_name(city) == fold_place_name(&self.city);

        let state_matches = self
            .state
            .as_deref()
            .is_none_or(|expected| fold_place_name(state) == fold_place_name(expected));

        city_matches && state_matches
    }
}

/// Lowercases, strips accents and collapses whitespace, so `MACAPÁ ` equals `Macapa`.
#[must_use]
pub fn fold_place_name(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
