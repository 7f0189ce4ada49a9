//! Checkout: validation and order composition

use std::sync::LazyLock;

use jiff::Timestamp;
use regex::Regex;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    address::ServiceableArea,
    cart::CartLine,
    customers::{Customer, DeliveryType, PaymentMethod},
    money::{self, Reais, format_reais},
    orders::{Order, OrderCustomer, OrderItem},
    pricing::{PriceBreakdown, TotalPriceError, price_order},
    summary,
};

#[expect(clippy::expect_used, reason = "Pattern is a literal")]
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\([0-9]{2}\)\s[0-9]{4,5}-[0-9]{4}$").expect("valid phone pattern"));

/// A user-correctable problem with the checkout form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Nothing in the cart.
    #[error("the cart is empty")]
    EmptyCart,

    /// One or more required fields are blank.
    #[error("missing required fields: {}", .fields.join(", "))]
    MissingFields {
        /// Names of the blank fields
        fields: SmallVec<[&'static str; 4]>,
    },

    /// Phone is not in `(DD) DDDDD-DDDD` form.
    #[error("malformed phone number: {0}")]
    MalformedPhone(String),

    /// Delivery address is outside the serviceable area.
    #[error("we do not deliver to {city}")]
    OutOfServiceArea {
        /// City on the address
        city: String,
    },

    /// Cash change requested for less than the total.
    #[error(
        "change for {} does not cover the total of R$ {}",
        describe_offer(.offered.as_ref()),
        format_reais(.total)
    )]
    InsufficientChange {
        /// Amount the customer will pay with
        offered: Option<Reais>,
        /// Grand total
        total: Reais,
    },
}

fn describe_offer(offered: Option<&Reais>) -> String {
    offered.map_or_else(
        || "an unspecified amount".to_string(),
        |amount| format!("R$ {}", format_reais(amount)),
    )
}

/// Errors returned while checking out.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The form did not pass validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The order could not be priced.
    #[error(transparent)]
    Price(#[from] TotalPriceError),
}

/// Store settings that drive validation, pricing and the order message.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutPolicy {
    /// Store name shown in the order message
    pub store_name: String,

    /// Flat fee charged for delivery orders
    pub delivery_fee: Reais,

    /// Where deliveries are accepted
    pub serviceable_area: ServiceableArea,

    /// Messaging contact that receives orders, in international form
    pub whatsapp_contact: String,
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        Self {
            store_name: "Norte Pizza Mania".to_string(),
            delivery_fee: money::from_cents(7_00),
            serviceable_area: ServiceableArea::new("Macapá", Some("AP".to_string())),
            whatsapp_contact: "5596981121594".to_string(),
        }
    }
}

impl CheckoutPolicy {
    /// Prices `lines` for the given delivery type.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if the amounts cannot be summed.
    pub fn price(
        &self,
        lines: &[CartLine],
        delivery_type: DeliveryType,
    ) -> Result<PriceBreakdown, TotalPriceError> {
        price_order(lines, delivery_type, self.delivery_fee)
    }
}

/// Checks the checkout form. Rules run in order and the first failure is returned.
///
/// # Errors
///
/// - [`CheckoutError::Validation`]: the form is not acceptable.
/// - [`CheckoutError::Price`]: the total needed for the change check could not be computed.
pub fn validate(
    customer: &Customer,
    lines: &[CartLine],
    policy: &CheckoutPolicy,
) -> Result<(), CheckoutError> {
    if lines.is_empty() {
        return Err(ValidationError::EmptyCart.into());
    }

    let mut missing: SmallVec<[&'static str; 4]> = SmallVec::new();

    if customer.name.trim().is_empty() {
        missing.push("name");
    }

    if customer.phone.trim().is_empty() {
        missing.push("phone");
    }

    if !missing.is_empty() {
        return Err(ValidationError::MissingFields { fields: missing }.into());
    }

    if !PHONE_PATTERN.is_match(&customer.phone) {
        return Err(ValidationError::MalformedPhone(customer.phone.clone()).into());
    }

    if customer.delivery_type == DeliveryType::Delivery {
        let address = customer.address.as_ref();

        if address.is_none_or(|address| address.cep.trim().is_empty()) {
            missing.push("cep");
        }

        if address.is_none_or(|address| address.number.trim().is_empty()) {
            missing.push("number");
        }

        let Some(address) = address.filter(|_| missing.is_empty()) else {
            return Err(ValidationError::MissingFields { fields: missing }.into());
        };

        if address.city.trim().is_empty()
            || !policy.serviceable_area.accepts(&address.city, &address.state)
        {
            return Err(ValidationError::OutOfServiceArea {
                city: address.city.clone(),
            }
            .into());
        }
    }

    if customer.payment_method == PaymentMethod::Cash && customer.change_requested {
        let total = policy.price(lines, customer.delivery_type)?.total;

        let covered = customer
            .change_amount
            .is_some_and(|offered| offered.to_minor_units() >= total.to_minor_units());

        if !covered {
            return Err(ValidationError::InsufficientChange {
                offered: customer.change_amount,
                total,
            }
            .into());
        }
    }

    Ok(())
}

/// A new order together with the message that confirms it.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedOrder {
    /// The pending order
    pub order: Order,

    /// Plain-text order summary
    pub summary: String,
}

impl ComposedOrder {
    /// Messaging deep link that carries the summary to the store.
    #[must_use]
    pub fn whatsapp_link(&self, policy: &CheckoutPolicy) -> String {
        summary::whatsapp_link(&policy.whatsapp_contact, &self.summary)
    }
}

/// Validates the form and turns the cart into a pending order.
///
/// Items and customer details are copied, so later cart changes do not affect the order.
///
/// # Errors
///
/// Returns a [`CheckoutError`] if validation or pricing fails.
pub fn compose(
    customer: &Customer,
    lines: &[CartLine],
    policy: &CheckoutPolicy,
    created_at: Timestamp,
) -> Result<ComposedOrder, CheckoutError> {
    validate(customer, lines, policy)?;

    let breakdown = policy.price(lines, customer.delivery_type)?;

    let change_for = match customer.payment_method {
        PaymentMethod::Cash if customer.change_requested => customer.change_amount,
        _ => None,
    };

    let order = Order::new(
        OrderCustomer::from(customer),
        lines.iter().map(OrderItem::from).collect(),
        customer.payment_method,
        breakdown.total,
        created_at,
    )
    .with_change_for(change_for);

    let summary = summary::render(&order, &policy.store_name)?;

    Ok(ComposedOrder { order, summary })
}
