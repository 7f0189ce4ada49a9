//! Place an order from the command line

use std::{io::Write, str::FromStr};

use clap::{Args, ValueEnum};
use pizzeria::{
    address::PostalCode,
    cart::Cart,
    catalog::{Catalog, SizeLabel},
    customers::{Address, Customer, PaymentMethod, format_phone},
    money::Reais,
};
use pizzeria_app::{
    context::AppContext,
    domain::{checkout::CheckoutServiceError, profiles::models::CustomerProfile},
};
use tracing::{info, warn};

use crate::{config::store::parse_reais, errors::CliError};

/// One selection: a product id and a size, e.g. `1:M` or `3:EX GG`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ItemSpec {
    product: String,
    size: SizeLabel,
}

impl FromStr for ItemSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (product, size) = s
            .split_once(':')
            .ok_or_else(|| format!("expected <product id>:<size>, got {s:?}"))?;

        let size = SizeLabel::parse(size).ok_or_else(|| format!("unknown size {size:?}"))?;

        Ok(Self {
            product: product.trim().to_string(),
            size,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(super) enum Payment {
    Pix,
    Cash,
    Card,
}

#[derive(Debug, Args)]
pub(super) struct OrderArgs {
    /// Customer phone; 10 or 11 digits, any punctuation
    #[arg(long)]
    phone: String,

    /// Customer name; taken from the saved profile when omitted
    #[arg(long)]
    name: Option<String>,

    /// Item to add, `<product id>:<size>`; repeat for more pizzas
    #[arg(long = "item", required = true)]
    items: Vec<ItemSpec>,

    /// Deliver instead of picking up at the store
    #[arg(long)]
    delivery: bool,

    /// Postal code (CEP), looked up to fill the street, neighborhood and city
    #[arg(long)]
    cep: Option<String>,

    /// Street number
    #[arg(long)]
    number: Option<String>,

    /// Street, when the lookup is unavailable
    #[arg(long)]
    street: Option<String>,

    /// Neighborhood, when the lookup is unavailable
    #[arg(long)]
    neighborhood: Option<String>,

    /// City, when the lookup is unavailable
    #[arg(long)]
    city: Option<String>,

    /// State (UF), when the lookup is unavailable
    #[arg(long)]
    state: Option<String>,

    /// Apartment, block, etc.
    #[arg(long)]
    complement: Option<String>,

    /// Reference point for the courier
    #[arg(long)]
    reference: Option<String>,

    /// Notes for a pickup order
    #[arg(long)]
    notes: Option<String>,

    /// Payment method; the saved profile's method when omitted
    #[arg(long, value_enum)]
    payment: Option<Payment>,

    /// Cash amount the customer pays with, when change is needed
    #[arg(long, value_parser = parse_reais)]
    change_for: Option<Reais>,

    /// Print the stored order as JSON instead of the message
    #[arg(long)]
    json: bool,
}

pub(super) async fn run(
    args: &OrderArgs,
    ctx: &AppContext,
    catalog: &Catalog,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut cart = build_cart(&args.items, catalog)?;

    let phone = format_phone(&args.phone);
    let profile = match ctx.profiles.find(&phone).await {
        Ok(profile) => profile,
        Err(error) => {
            warn!(%phone, %error, "failed to read customer profile");
            None
        }
    };

    let customer = build_customer(args, phone, profile, ctx).await?;

    let placed = ctx.checkout.place_order(&customer, &mut cart).await?;

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &placed.order)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", placed.summary)?;
        writeln!(out)?;
        writeln!(out, "{}", placed.whatsapp_link)?;
    }

    Ok(())
}

fn build_cart(items: &[ItemSpec], catalog: &Catalog) -> Result<Cart, CliError> {
    let mut cart = Cart::new();

    for item in items {
        let product = catalog
            .get(&item.product)
            .ok_or_else(|| CliError::UnknownProduct(item.product.clone()))?;

        let added = cart.add_selection(product, item.size);

        info!(product = %product.id, size = %item.size, quantity = added.quantity, "{added}");
    }

    Ok(cart)
}

async fn build_customer(
    args: &OrderArgs,
    phone: String,
    profile: Option<CustomerProfile>,
    ctx: &AppContext,
) -> Result<Customer, CliError> {
    let remembered = profile.as_ref().map(CustomerProfile::to_customer);

    let name = args
        .name
        .clone()
        .or_else(|| remembered.as_ref().map(|customer| customer.name.clone()))
        .unwrap_or_default();

    let customer = if args.delivery {
        let address = match delivery_address(args, ctx).await? {
            Some(address) => address,
            None => remembered
                .as_ref()
                .and_then(|customer| customer.address.clone())
                .unwrap_or_default(),
        };

        Customer::delivery(name, phone, address)
    } else {
        Customer::pickup(name, phone).with_notes(args.notes.clone())
    };

    let payment = args.payment.or_else(|| {
        remembered
            .as_ref()
            .map(|customer| match customer.payment_method {
                PaymentMethod::Pix => Payment::Pix,
                PaymentMethod::Cash => Payment::Cash,
                PaymentMethod::Card => Payment::Card,
            })
    });

    Ok(match payment.unwrap_or(Payment::Pix) {
        Payment::Pix => customer.paying_with(PaymentMethod::Pix),
        Payment::Card => customer.paying_with(PaymentMethod::Card),
        Payment::Cash => customer.paying_cash(args.change_for),
    })
}

/// Address from the command line, completed by a postal code lookup when
/// the street is not given. `None` when no postal code was passed.
async fn delivery_address(
    args: &OrderArgs,
    ctx: &AppContext,
) -> Result<Option<Address>, CliError> {
    let Some(cep) = args.cep.as_deref() else {
        return Ok(None);
    };

    let manual = Address {
        cep: cep.trim().to_string(),
        street: args.street.clone().unwrap_or_default(),
        neighborhood: args.neighborhood.clone().unwrap_or_default(),
        city: args.city.clone().unwrap_or_default(),
        state: args.state.clone().unwrap_or_default(),
        number: args.number.clone().unwrap_or_default(),
        complement: args.complement.clone(),
        reference: args.reference.clone(),
    };

    if args.street.is_some() {
        return Ok(Some(manual));
    }

    match ctx.checkout.lookup_address(cep).await {
        Ok(resolved) => {
            let cep: PostalCode = cep.parse().map_err(CheckoutServiceError::from)?;

            Ok(Some(resolved.into_address(
                &cep,
                manual.number,
                manual.complement,
                manual.reference,
            )))
        }
        Err(CheckoutServiceError::Lookup(error)) => {
            warn!(%error, "postal code lookup unavailable, using the address as given");

            Ok(Some(manual))
        }
        Err(CheckoutServiceError::AddressNotFound(cep)) => {
            warn!(%cep, "postal code not found, using the address as given");

            Ok(Some(manual))
        }
        Err(error) => Err(error.into()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pizzeria::money::from_cents;
    use pizzeria_app::{
        context::AppSettings,
        domain::checkout::{LookupError, MockAddressLookup},
        storage::MemoryStore,
    };
    use testresult::TestResult;

    use super::*;

    fn pickup_args(items: &[&str]) -> Result<OrderArgs, String> {
        Ok(OrderArgs {
            phone: "96991234567".to_string(),
            name: Some("Maria Souza".to_string()),
            items: items
                .iter()
                .map(|item| item.parse::<ItemSpec>())
                .collect::<Result<Vec<_>, _>>()?,
            delivery: false,
            cep: None,
            number: None,
            street: None,
            neighborhood: None,
            city: None,
            state: None,
            complement: None,
            reference: None,
            notes: None,
            payment: None,
            change_for: None,
            json: false,
        })
    }

    #[test]
    fn item_specs_accept_every_size() -> TestResult {
        assert_eq!(
            "1:M".parse::<ItemSpec>()?,
            ItemSpec {
                product: "1".to_string(),
                size: SizeLabel::M,
            }
        );
        assert_eq!("3:ex gg".parse::<ItemSpec>()?.size, SizeLabel::ExGG);
        assert!("1".parse::<ItemSpec>().is_err(), "expected missing size to fail");
        assert!("1:XL".parse::<ItemSpec>().is_err(), "expected unknown size to fail");

        Ok(())
    }

    #[test]
    fn unknown_product_is_rejected() -> TestResult {
        let catalog = Catalog::house_menu()?;
        let items = vec!["99:M".parse::<ItemSpec>()?];

        let result = build_cart(&items, &catalog);

        assert!(
            matches!(result, Err(CliError::UnknownProduct(ref id)) if id == "99"),
            "expected unknown product, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn pickup_order_prints_message_and_link() -> TestResult {
        let ctx = AppContext::in_memory(AppSettings::default())?;
        let catalog = Catalog::house_menu()?;
        let mut out = Vec::new();

        run(&pickup_args(&["1:M", "1:M", "2:G"])?, &ctx, &catalog, &mut out).await?;

        let text = String::from_utf8(out)?;
        let orders = ctx.orders.list().await?;
        let order = orders.first().ok_or("expected a stored order")?;

        assert!(text.starts_with("NOVO PEDIDO - Norte Pizza Mania"));
        assert!(text.contains("Telefone: (96) 99123-4567"));
        assert!(text.contains("https://wa.me/5596981121594?text="));
        assert_eq!(order.total(), from_cents(128_00));

        Ok(())
    }

    #[tokio::test]
    async fn pickup_notes_reach_the_message() -> TestResult {
        let ctx = AppContext::in_memory(AppSettings::default())?;
        let catalog = Catalog::house_menu()?;
        let mut out = Vec::new();

        let mut args = pickup_args(&["1:M"])?;
        args.notes = Some("Sem cebola".to_string());
        run(&args, &ctx, &catalog, &mut out).await?;

        let text = String::from_utf8(out)?;

        assert!(text.contains("Observacoes: Sem cebola\n"));

        Ok(())
    }

    #[tokio::test]
    async fn returning_customer_is_prefilled_from_profile() -> TestResult {
        let ctx = AppContext::in_memory(AppSettings::default())?;
        let catalog = Catalog::house_menu()?;

        let mut first = pickup_args(&["1:P"])?;
        first.payment = Some(Payment::Card);
        run(&first, &ctx, &catalog, &mut Vec::<u8>::new()).await?;

        let mut again = pickup_args(&["2:P"])?;
        again.name = None;
        run(&again, &ctx, &catalog, &mut Vec::<u8>::new()).await?;

        let orders = ctx.orders.list().await?;
        let last = orders.last().ok_or("expected two orders")?;

        assert_eq!(orders.len(), 2);
        assert_eq!(last.customer().name, "Maria Souza");
        assert_eq!(last.payment_method(), PaymentMethod::Card);

        Ok(())
    }

    #[tokio::test]
    async fn manual_address_skips_the_lookup() -> TestResult {
        let ctx = AppContext::in_memory(AppSettings::default())?;
        let catalog = Catalog::house_menu()?;

        let mut args = pickup_args(&["1:M"])?;
        args.delivery = true;
        args.cep = Some("68900-073".to_string());
        args.street = Some("Avenida FAB".to_string());
        args.neighborhood = Some("Central".to_string());
        args.city = Some("Macapá".to_string());
        args.state = Some("AP".to_string());
        args.number = Some("100".to_string());
        args.json = true;

        let mut out = Vec::new();
        run(&args, &ctx, &catalog, &mut out).await?;

        let json: serde_json::Value = serde_json::from_slice(&out)?;

        assert_eq!(json["total"], serde_json::json!(45.0));
        assert_eq!(json["customer"]["deliveryType"], "delivery");

        Ok(())
    }

    fn delivery_without_street(cep: &str) -> Result<OrderArgs, String> {
        let mut args = pickup_args(&["1:M"])?;
        args.delivery = true;
        args.cep = Some(cep.to_string());
        args.neighborhood = Some("Central".to_string());
        args.city = Some("Macapá".to_string());
        args.state = Some("AP".to_string());
        args.number = Some("100".to_string());

        Ok(args)
    }

    fn context_with_lookup(lookup: MockAddressLookup) -> AppContext {
        AppContext::with_lookup(
            Arc::new(MemoryStore::new()),
            Arc::new(lookup),
            AppSettings::default(),
        )
    }

    #[tokio::test]
    async fn unknown_postal_code_falls_back_to_the_typed_address() -> TestResult {
        let mut lookup = MockAddressLookup::new();
        lookup.expect_lookup().once().returning(|_| Ok(None));

        let ctx = context_with_lookup(lookup);
        let catalog = Catalog::house_menu()?;

        run(&delivery_without_street("00000000")?, &ctx, &catalog, &mut Vec::<u8>::new()).await?;

        let orders = ctx.orders.list().await?;
        let order = orders.first().ok_or("expected a stored order")?;
        let address = order.customer().address.as_ref().ok_or("expected an address")?;

        assert_eq!(orders.len(), 1);
        assert_eq!(address, "100 - Central, Macapá/AP");
        assert_eq!(order.customer().cep.as_deref(), Some("00000000"));

        Ok(())
    }

    #[tokio::test]
    async fn unreachable_lookup_falls_back_to_the_typed_address() -> TestResult {
        let mut lookup = MockAddressLookup::new();
        lookup.expect_lookup().once().returning(|_| {
            Err(LookupError::UnexpectedResponse("service unavailable".to_string()))
        });

        let ctx = context_with_lookup(lookup);
        let catalog = Catalog::house_menu()?;

        run(&delivery_without_street("68900-073")?, &ctx, &catalog, &mut Vec::<u8>::new()).await?;

        let orders = ctx.orders.list().await?;
        let order = orders.first().ok_or("expected a stored order")?;
        let address = order.customer().address.as_ref().ok_or("expected an address")?;

        assert_eq!(address, "100 - Central, Macapá/AP");

        Ok(())
    }

    #[tokio::test]
    async fn delivery_outside_the_area_is_refused() -> TestResult {
        let ctx = AppContext::in_memory(AppSettings::default())?;
        let catalog = Catalog::house_menu()?;

        let mut args = pickup_args(&["1:M"])?;
        args.delivery = true;
        args.cep = Some("80010-000".to_string());
        args.street = Some("Rua XV de Novembro".to_string());
        args.neighborhood = Some("Centro".to_string());
        args.city = Some("Curitiba".to_string());
        args.state = Some("PR".to_string());
        args.number = Some("1".to_string());

        let result = run(&args, &ctx, &catalog, &mut Vec::<u8>::new()).await;

        assert!(
            matches!(result, Err(CliError::Checkout(_))),
            "expected checkout failure, got {result:?}"
        );
        assert!(ctx.orders.list().await?.is_empty());

        Ok(())
    }
}
