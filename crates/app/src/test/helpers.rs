//! Test Helpers

use jiff::tz::{self, TimeZone};
use pizzeria::{
    cart::Cart,
    catalog::{Catalog, SizeLabel},
    customers::{Address, Customer, DeliveryType, PaymentMethod},
    money::from_cents,
    orders::{Order, OrderCustomer},
};

/// Fixed UTC-3, the offset of the store's zone.
pub(crate) fn belem() -> TimeZone {
    TimeZone::fixed(tz::offset(-3))
}

/// Pickup order for the same customer with a chosen id, timestamp and total.
pub(crate) fn order_at(id: &str, created_at: &str, total: i64) -> Result<Order, jiff::Error> {
    Ok(Order::new(
        OrderCustomer {
            name: "Maria Souza".to_string(),
            phone: "(96) 99123-4567".to_string(),
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
    .with_id(id))
}

pub(crate) fn delivery_customer() -> Customer {
    Customer::delivery(
        "Maria Souza",
        "(96) 99123-4567",
        Address {
            cep: "68900-073".to_string(),
            street: "Avenida FAB".to_string(),
            neighborhood: "Central".to_string(),
            city: "Macapá".to_string(),
            state: "AP".to_string(),
            number: "100".to_string(),
            complement: None,
            reference: None,
        },
    )
}

/// Two medium Tucumã and one large Tambaqui from the house menu: 128,00.
pub(crate) fn example_cart() -> Result<Cart, Box<dyn std::error::Error>> {
    let catalog = Catalog::house_menu()?;
    let tucuma = catalog.get("1").ok_or("missing Tucumã")?;
    let tambaqui = catalog.get("2").ok_or("missing Tambaqui")?;
    let mut cart = Cart::new();

    cart.add_selection(tucuma, SizeLabel::M);
    cart.add_selection(tucuma, SizeLabel::M);
    cart.add_selection(tambaqui, SizeLabel::G);

    Ok(cart)
}
