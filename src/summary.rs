//! Order summary message and messaging deep link

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::{
    customers::DeliveryType,
    money::format_reais,
    orders::Order,
    pricing::TotalPriceError,
};

/// Characters left unescaped in a URI component.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Renders the plain-text summary sent to the store for `order`.
///
/// The output only depends on the order and the store name, so a stored order
/// always renders to the message the customer originally sent.
///
/// # Errors
///
/// Returns a [`TotalPriceError`] if the item totals cannot be computed.
pub fn render(order: &Order, store_name: &str) -> Result<String, TotalPriceError> {
    let customer = order.customer();
    let mut lines = vec![
        format!("NOVO PEDIDO - {store_name}"),
        String::new(),
        format!("Cliente: {}", customer.name),
        format!("Telefone: {}", customer.phone),
        format!("Tipo: {}", customer.delivery_type),
    ];

    if customer.delivery_type == DeliveryType::Delivery {
        if let Some(address) = &customer.address {
            lines.push(format!("Endereco: {address}"));
        }

        if let Some(complement) = non_blank(customer.complement.as_deref()) {
            lines.push(format!("Complemento: {complement}"));
        }

        if let Some(reference) = non_blank(customer.reference.as_deref()) {
            lines.push(format!("Referencia: {reference}"));
        }
    } else if let Some(notes) = non_blank(customer.address.as_deref()) {
        lines.push(format!("Observacoes: {notes}"));
    }

    lines.push(String::new());
    lines.push("Pizzas:".to_string());

    for (position, item) in order.items().iter().enumerate() {
        lines.push(format!("{}. {}", position + 1, item.name));
        lines.push(format!("   Tamanho: {}", item.size));
        lines.push(format!("   Quantidade: {}", item.quantity));
        lines.push(format!("   Valor: R$ {}", format_reais(&item.total()?)));
        lines.push(String::new());
    }

    lines.push(format!("Subtotal: R$ {}", format_reais(&order.subtotal()?)));

    if customer.delivery_type == DeliveryType::Delivery {
        lines.push(format!("Taxa de entrega: R$ {}", format_reais(&order.delivery_fee()?)));
    }

    lines.push(format!("Total: R$ {}", format_reais(&order.total())));
    lines.push(format!("Pagamento: {}", order.payment_method()));

    if let Some(change_for) = order.change_for() {
        lines.push(format!("Troco para: R$ {}", format_reais(&change_for)));
    }

    lines.push(String::new());
    lines.push("Aguardando confirmacao!".to_string());

    Ok(lines.join("\n"))
}

/// Deep link that opens a chat with `contact` pre-filled with `summary`.
#[must_use]
pub fn whatsapp_link(contact: &str, summary: &str) -> String {
    format!(
        "https://wa.me/{contact}?text={}",
        utf8_percent_encode(summary, URI_COMPONENT)
    )
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
