//! Orders

use std::fmt::{self, Display, Formatter};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    cart::CartLine,
    catalog::SizeLabel,
    customers::{Customer, DeliveryType, PaymentMethod},
    money::{self, Reais},
    pricing::{TotalPriceError, line_total},
};

pub mod status;

pub use status::{OrderStatus, StatusLocked, TransitionPolicy};

/// Order identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Generates a new, time-ordered unique id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for OrderId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A line of an order, copied from the cart when the order was placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product name
    pub name: String,

    /// Size
    pub size: SizeLabel,

    /// Unit price
    #[serde(with = "money::as_number")]
    pub price: Reais,

    /// Quantity
    pub quantity: u32,
}

impl OrderItem {
    /// Unit price multiplied by quantity.
    ///
    /// # Errors
    ///
    /// Returns [`TotalPriceError::Overflow`] if the amount does not fit.
    pub fn total(&self) -> Result<Reais, TotalPriceError> {
        line_total(self.price, self.quantity)
    }
}

impl From<&CartLine> for OrderItem {
    fn from(line: &CartLine) -> Self {
        Self {
            name: line.product().name.clone(),
            size: line.size(),
            price: line.unit_price(),
            quantity: line.quantity(),
        }
    }
}

/// Customer details as recorded on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCustomer {
    /// Name
    pub name: String,

    /// Phone
    pub phone: String,

    /// Delivery or pickup
    pub delivery_type: DeliveryType,

    /// Postal code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cep: Option<String>,

    /// Single line address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Street number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,

    /// Complement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,

    /// Reference point
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl From<&Customer> for OrderCustomer {
    fn from(customer: &Customer) -> Self {
        let address = match customer.delivery_type {
            DeliveryType::Delivery => customer.address.as_ref(),
            DeliveryType::Pickup => None,
        };

        // Pickup orders carry their notes in the address field.
        let address_line = match customer.delivery_type {
            DeliveryType::Delivery => address.map(crate::customers::Address::line),
            DeliveryType::Pickup => customer
                .notes
                .as_deref()
                .map(str::trim)
                .filter(|notes| !notes.is_empty())
                .map(str::to_string),
        };

        Self {
            name: customer.name.trim().to_string(),
            phone: customer.phone.trim().to_string(),
            delivery_type: customer.delivery_type,
            cep: address.map(|address| address.cep.clone()),
            address: address_line,
            number: address.map(|address| address.number.clone()),
            complement: address.and_then(|address| address.complement.clone()),
            reference: address.and_then(|address| address.reference.clone()),
        }
    }
}

/// A placed order.
///
/// Customer and items are fixed once the order exists; only the status changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    id: OrderId,
    customer: OrderCustomer,
    items: Vec<OrderItem>,
    payment_method: PaymentMethod,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "money::as_number::option"
    )]
    change_for: Option<Reais>,
    #[serde(with = "money::as_number")]
    total: Reais,
    status: OrderStatus,
    created_at: Timestamp,
}

impl Order {
    /// Creates a pending order with a fresh id.
    #[must_use]
    pub fn new(
        customer: OrderCustomer,
        items: Vec<OrderItem>,
        payment_method: PaymentMethod,
        total: Reais,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: OrderId::generate(),
            customer,
            items,
            payment_method,
            change_for: None,
            total,
            status: OrderStatus::Pending,
            created_at,
        }
    }

    /// Use the given id instead of a generated one.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<OrderId>) -> Self {
        self.id = id.into();
        self
    }

    /// Record the amount the customer pays with in cash.
    #[must_use]
    pub fn with_change_for(mut self, change_for: Option<Reais>) -> Self {
        self.change_for = change_for;
        self
    }

    /// Order id
    #[must_use]
    pub fn id(&self) -> &OrderId {
        &self.id
    }

    /// Customer snapshot
    #[must_use]
    pub fn customer(&self) -> &OrderCustomer {
        &self.customer
    }

    /// Ordered items
    #[must_use]
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Payment method
    #[must_use]
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Cash amount the customer pays with, when change was requested
    #[must_use]
    pub fn change_for(&self) -> Option<Reais> {
        self.change_for
    }

    /// Grand total
    #[must_use]
    pub fn total(&self) -> Reais {
        self.total
    }

    /// Current status
    #[must_use]
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Creation time
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Sum of the item totals.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if the amounts cannot be summed.
    pub fn subtotal(&self) -> Result<Reais, TotalPriceError> {
        self.items
            .iter()
            .try_fold(money::zero(), |acc, item| Ok(acc.add(item.total()?)?))
    }

    /// Delivery fee charged, derived as total minus subtotal.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if the amounts cannot be combined.
    pub fn delivery_fee(&self) -> Result<Reais, TotalPriceError> {
        Ok(self.total.sub(self.subtotal()?)?)
    }

    /// Move the order to `next`, subject to `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`StatusLocked`] if the change is refused; the order is left untouched.
    pub fn apply_status(
        &mut self,
        next: OrderStatus,
        policy: TransitionPolicy,
    ) -> Result<OrderStatus, StatusLocked> {
        let previous = self.status;

        self.status = previous.transition(next, policy)?;

        Ok(previous)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::money::from_cents;

    use super::*;

    fn order() -> Result<Order, jiff::Error> {
        Ok(Order::new(
            OrderCustomer {
                name: "Maria".to_string(),
                phone: "(96) 99999-1234".to_string(),
                delivery_type: DeliveryType::Delivery,
                cep: Some("68900-000".to_string()),
                address: Some("Rua A, 10 - Centro, Macapá/AP".to_string()),
                number: Some("10".to_string()),
                complement: None,
                reference: Some("Perto da praça".to_string()),
            },
            vec![
                OrderItem {
                    name: "Pizza de Tucumã".to_string(),
                    size: SizeLabel::M,
                    price: from_cents(38_00),
                    quantity: 2,
                },
                OrderItem {
                    name: "Pizza de Tambaqui".to_string(),
                    size: SizeLabel::G,
                    price: from_cents(52_00),
                    quantity: 1,
                },
            ],
            PaymentMethod::Pix,
            from_cents(135_00),
            "2026-10-17T18:30:00Z".parse()?,
        )
        .with_id("order-1"))
    }

    #[test]
    fn serializes_to_stable_shape() -> TestResult {
        let json = serde_json::to_value(order()?)?;

        assert_eq!(json["id"], "order-1");
        assert_eq!(json["customer"]["deliveryType"], "delivery");
        assert_eq!(json["customer"]["cep"], "68900-000");
        assert!(json["customer"].get("complement").is_none());
        assert_eq!(json["items"][0]["size"], "M");
        assert_eq!(json["items"][0]["price"], 38.0);
        assert_eq!(json["items"][1]["quantity"], 1);
        assert_eq!(json["paymentMethod"], "pix");
        assert_eq!(json["total"], 135.0);
        assert_eq!(json["status"], "pending");
        assert_eq!(json["createdAt"], "2026-10-17T18:30:00Z");
        assert!(json.get("changeFor").is_none());

        Ok(())
    }

    #[test]
    fn json_round_trip_is_lossless() -> TestResult {
        let original = order()?.with_change_for(Some(from_cents(150_50)));

        let json = serde_json::to_string(&original)?;
        let parsed: Order = serde_json::from_str(&json)?;

        assert_eq!(parsed, original);

        Ok(())
    }

    #[test]
    fn parses_browser_written_records() -> TestResult {
        let json = r#"{
            "id": "1718000000000",
            "customer": { "name": "João", "phone": "(96) 98888-7777", "deliveryType": "pickup" },
            "items": [{ "name": "Pizza Nordestina", "size": "EX GG", "price": 73, "quantity": 1 }],
            "paymentMethod": "money",
            "total": 73,
            "status": "paid",
            "createdAt": "2024-06-10T06:13:20.000Z"
        }"#;

        let parsed: Order = serde_json::from_str(json)?;

        assert_eq!(parsed.id().as_str(), "1718000000000");
        assert_eq!(parsed.payment_method(), PaymentMethod::Cash);
        assert_eq!(parsed.items().first().map(|item| item.size), Some(SizeLabel::ExGG));
        assert_eq!(parsed.total(), from_cents(73_00));
        assert_eq!(parsed.status(), OrderStatus::Paid);

        Ok(())
    }

    #[test]
    fn delivery_fee_is_total_minus_items() -> TestResult {
        let order = order()?;

        assert_eq!(order.subtotal()?, from_cents(128_00));
        assert_eq!(order.delivery_fee()?, from_cents(7_00));

        Ok(())
    }

    #[test]
    fn apply_status_keeps_order_on_refusal() -> TestResult {
        let mut order = order()?;

        order.apply_status(OrderStatus::Paid, TransitionPolicy::Standard)?;
        let result = order.apply_status(OrderStatus::Ready, TransitionPolicy::Standard);

        assert!(result.is_err());
        assert_eq!(order.status(), OrderStatus::Paid);

        Ok(())
    }

    #[test]
    fn pickup_notes_travel_in_the_address_field() {
        let customer = Customer::pickup("João", "(96) 98888-7777")
            .with_notes(Some(" Sem cebola ".to_string()));

        let snapshot = OrderCustomer::from(&customer);

        assert_eq!(snapshot.address.as_deref(), Some("Sem cebola"));
        assert_eq!(snapshot.cep, None);

        let blank = Customer::pickup("João", "(96) 98888-7777").with_notes(Some("  ".to_string()));

        assert_eq!(OrderCustomer::from(&blank).address, None);
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(OrderId::generate(), OrderId::generate());
    }
}
