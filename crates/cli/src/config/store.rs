//! Store Config

use std::path::PathBuf;

use clap::Args;
use jiff::tz::TimeZone;
use pizzeria::{
    address::ServiceableArea,
    catalog::{Catalog, CatalogError},
    checkout::CheckoutPolicy,
    money::{self, AmountError, Reais},
};

/// Store identity, delivery terms and menu.
#[derive(Debug, Args)]
pub(crate) struct StoreConfig {
    /// Store name shown in order messages
    #[arg(long, env = "STORE_NAME", default_value = "Norte Pizza Mania")]
    pub store_name: String,

    /// Flat delivery fee in reais
    #[arg(long, env = "DELIVERY_FEE", default_value = "7.00", value_parser = parse_reais)]
    pub delivery_fee: Reais,

    /// City where deliveries are accepted
    #[arg(long, env = "SERVICE_CITY", default_value = "Macapá")]
    pub city: String,

    /// State (UF) where deliveries are accepted; empty accepts any state
    #[arg(long, env = "SERVICE_STATE", default_value = "AP")]
    pub state: String,

    /// WhatsApp number receiving orders, with country code
    #[arg(long, env = "WHATSAPP_CONTACT", default_value = "5596981121594")]
    pub whatsapp_contact: String,

    /// IANA time zone used for calendar days
    #[arg(long, env = "TIME_ZONE", default_value = "America/Belem", value_parser = parse_time_zone)]
    pub time_zone: TimeZone,

    /// Menu file (YAML); the house menu is used when omitted
    #[arg(long, env = "MENU_FILE")]
    pub menu: Option<PathBuf>,
}

impl StoreConfig {
    pub(crate) fn policy(&self) -> CheckoutPolicy {
        let state = Some(self.state.trim().to_string()).filter(|state| !state.is_empty());

        CheckoutPolicy {
            store_name: self.store_name.clone(),
            delivery_fee: self.delivery_fee,
            serviceable_area: ServiceableArea::new(&self.city, state),
            whatsapp_contact: self.whatsapp_contact.clone(),
        }
    }

    /// Loads the configured menu.
    pub(crate) fn catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.menu {
            Some(path) => Catalog::load(path),
            None => Catalog::house_menu(),
        }
    }
}

/// Non-negative amount such as `7,00`.
pub(crate) fn parse_reais(value: &str) -> Result<Reais, AmountError> {
    let amount = money::parse_amount(value)?;

    if amount.to_minor_units() < 0 {
        return Err(AmountError::Negative(value.to_string()));
    }

    Ok(amount)
}

fn parse_time_zone(value: &str) -> Result<TimeZone, jiff::Error> {
    TimeZone::get(value.trim())
}
