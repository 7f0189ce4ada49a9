//! Customers

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::money::Reais;

/// How the order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryType {
    /// Delivered to the customer's address
    Delivery,

    /// Picked up at the store
    Pickup,
}

impl DeliveryType {
    /// Label used in order messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            DeliveryType::Delivery => "Entrega",
            DeliveryType::Pickup => "Retirada",
        }
    }
}

impl Display for DeliveryType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How the customer pays on delivery or pickup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Instant bank transfer
    #[serde(rename = "pix")]
    Pix,

    /// Cash
    #[serde(rename = "money")]
    Cash,

    /// Credit or debit card
    #[serde(rename = "card")]
    Card,
}

impl PaymentMethod {
    /// Label used in order messages and the dashboard.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            PaymentMethod::Pix => "PIX",
            PaymentMethod::Cash => "Dinheiro",
            PaymentMethod::Card => "Cartão",
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Delivery address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Postal code (CEP)
    pub cep: String,

    /// Street name
    pub street: String,

    /// Neighborhood
    pub neighborhood: String,

    /// City
    pub city: String,

    /// State (UF)
    pub state: String,

    /// Street number
    pub number: String,

    /// Apartment, block, etc.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,

    /// Landmark to help the courier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Address {
    /// Single line address, e.g. `Rua A, 10 - Centro, Macapá/AP`. Empty parts are skipped.
    #[must_use]
    pub fn line(&self) -> String {
        let street = join_non_empty(&[self.street.trim(), self.number.trim()], ", ");
        let city = join_non_empty(&[self.city.trim(), self.state.trim()], "/");
        let locality = join_non_empty(&[self.neighborhood.trim(), city.as_str()], ", ");

        join_non_empty(&[street.as_str(), locality.as_str()], " - ")
    }
}

fn join_non_empty(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(separator)
}

/// Customer details entered at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    /// Full name
    pub name: String,

    /// Phone number, formatted `(DD) DDDDD-DDDD`
    pub phone: String,

    /// Delivery or pickup
    pub delivery_type: DeliveryType,

    /// Delivery address; required for [`DeliveryType::Delivery`]
    pub address: Option<Address>,

    /// Payment method
    pub payment_method: PaymentMethod,

    /// Whether the customer needs change for a cash payment
    pub change_requested: bool,

    /// Amount the customer will pay with, when change is requested
    pub change_amount: Option<Reais>,

    /// Free-text notes for a pickup order
    pub notes: Option<String>,
}

impl Customer {
    /// Pickup customer paying by PIX.
    pub fn pickup(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            delivery_type: DeliveryType::Pickup,
            address: None,
            payment_method: PaymentMethod::Pix,
            change_requested: false,
            change_amount: None,
            notes: None,
        }
    }

    /// Delivery customer paying by PIX.
    pub fn delivery(name: impl Into<String>, phone: impl Into<String>, address: Address) -> Self {
        Self {
            delivery_type: DeliveryType::Delivery,
            address: Some(address),
            ..Self::pickup(name, phone)
        }
    }

    /// Attach pickup notes; blank notes are dropped.
    #[must_use]
    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes.filter(|notes| !notes.trim().is_empty());
        self
    }

    /// Pay in cash, optionally asking for change for `change_amount`.
    #[must_use]
    pub fn paying_cash(mut self, change_amount: Option<Reais>) -> Self {
        self.payment_method = PaymentMethod::Cash;
        self.change_requested = change_amount.is_some();
        self.change_amount = change_amount;
        self
    }

    /// Pay with the given method (no change).
    #[must_use]
    pub fn paying_with(mut self, method: PaymentMethod) -> Self {
        self.payment_method = method;
        self.change_requested = false;
        self.change_amount = None;
        self
    }
}

/// Applies the storefront phone mask: 10 digits become `(DD) DDDD-DDDD`,
/// 11 digits become `(DD) DDDDD-DDDD`, anything else is returned as digits.
#[must_use]
pub fn format_phone(input: &str) -> String {
    let digits = digits(input);

    let split = match digits.len() {
        10 => 6,
        11 => 7,
        _ => return digits,
    };

    let (area, rest) = digits.split_at(2);
    let (prefix, line) = rest.split_at(split - 2);

    format!("({area}) {prefix}-{line}")
}

/// Phone number in international form for messaging links (`55` + digits).
#[must_use]
pub fn whatsapp_number(phone: &str) -> String {
    format!("55{}", digits(phone))
}

/// Keep only ASCII digits.
#[must_use]
pub fn digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}
