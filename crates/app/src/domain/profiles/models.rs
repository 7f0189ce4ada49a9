//! Profile models

use jiff::Timestamp;
use pizzeria::customers::{Address, Customer, DeliveryType, PaymentMethod};
use serde::{Deserialize, Serialize};

/// Details remembered from a customer's latest order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfile {
    pub name: String,
    pub phone: String,
    pub delivery_type: DeliveryType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,

    pub payment_method: PaymentMethod,
    pub updated_at: Timestamp,
}

impl CustomerProfile {
    /// Profile from the checkout form, as of `updated_at`.
    #[must_use]
    pub fn from_customer(customer: &Customer, updated_at: Timestamp) -> Self {
        Self {
            name: customer.name.trim().to_string(),
            phone: customer.phone.trim().to_string(),
            delivery_type: customer.delivery_type,
            address: customer.address.clone(),
            payment_method: customer.payment_method,
            updated_at,
        }
    }

    /// Checkout form pre-filled from this profile. Cash change is never carried over.
    #[must_use]
    pub fn to_customer(&self) -> Customer {
        let customer = match (&self.address, self.delivery_type) {
            (Some(address), DeliveryType::Delivery) => {
                Customer::delivery(&self.name, &self.phone, address.clone())
            }
            _ => Customer::pickup(&self.name, &self.phone),
        };

        customer.paying_with(self.payment_method)
    }
}
