//! Checkout service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use pizzeria::{
    address::{PostalCode, ResolvedAddress},
    cart::Cart,
    checkout::{CheckoutPolicy, compose},
    customers::Customer,
    orders::Order,
};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::{
    checkout::{errors::CheckoutServiceError, lookup::AddressLookup},
    orders::OrdersService,
    profiles::ProfilesService,
};

/// A stored order and the message that hands it to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder {
    pub order: Order,
    pub summary: String,
    pub whatsapp_link: String,
}

/// Checkout over the order store, the profile cache and a postal code lookup.
///
/// One submission and one lookup may be in flight at a time; a second
/// concurrent call is refused with [`CheckoutServiceError::Busy`].
pub struct StoredCheckoutService {
    policy: CheckoutPolicy,
    orders: Arc<dyn OrdersService>,
    profiles: Arc<dyn ProfilesService>,
    lookup: Arc<dyn AddressLookup>,
    submitting: Mutex<()>,
    looking_up: Mutex<()>,
}

impl std::fmt::Debug for StoredCheckoutService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredCheckoutService")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl StoredCheckoutService {
    #[must_use]
    pub fn new(
        policy: CheckoutPolicy,
        orders: Arc<dyn OrdersService>,
        profiles: Arc<dyn ProfilesService>,
        lookup: Arc<dyn AddressLookup>,
    ) -> Self {
        Self {
            policy,
            orders,
            profiles,
            lookup,
            submitting: Mutex::new(()),
            looking_up: Mutex::new(()),
        }
    }
}

#[async_trait]
impl CheckoutService for StoredCheckoutService {
    #[tracing::instrument(
        name = "checkout.service.place_order",
        skip(self, customer, cart),
        fields(phone = %customer.phone, lines = cart.len()),
        err
    )]
    async fn place_order(
        &self,
        customer: &Customer,
        cart: &mut Cart,
    ) -> Result<PlacedOrder, CheckoutServiceError> {
        let Ok(_guard) = self.submitting.try_lock() else {
            return Err(CheckoutServiceError::Busy);
        };

        let composed = compose(customer, cart.lines(), &self.policy, Timestamp::now())?;
        let whatsapp_link = composed.whatsapp_link(&self.policy);

        let order = self.orders.append(composed.order).await?;

        if let Err(error) = self.profiles.remember(customer, order.created_at()).await {
            warn!(order_id = %order.id(), %error, "failed to remember customer profile");
        }

        cart.clear();

        info!(order_id = %order.id(), total = %order.total(), "placed order");

        Ok(PlacedOrder {
            order,
            summary: composed.summary,
            whatsapp_link,
        })
    }

    #[tracing::instrument(name = "checkout.service.lookup_address", skip(self), err)]
    async fn lookup_address(&self, cep: &str) -> Result<ResolvedAddress, CheckoutServiceError> {
        let Ok(_guard) = self.looking_up.try_lock() else {
            return Err(CheckoutServiceError::Busy);
        };

        let cep: PostalCode = cep.parse()?;

        let resolved = self
            .lookup
            .lookup(&cep)
            .await?
            .ok_or_else(|| CheckoutServiceError::AddressNotFound(cep.formatted()))?;

        if !self
            .policy
            .serviceable_area
            .accepts(&resolved.city, &resolved.state)
        {
            return Err(CheckoutServiceError::OutOfServiceArea {
                city: resolved.city,
            });
        }

        Ok(resolved)
    }

    fn policy(&self) -> &CheckoutPolicy {
        &self.policy
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Validates the form, stores the order and empties the cart.
    ///
    /// On failure nothing is stored and the cart is left as it was.
    async fn place_order(
        &self,
        customer: &Customer,
        cart: &mut Cart,
    ) -> Result<PlacedOrder, CheckoutServiceError>;

    /// Resolves a postal code, accepting only addresses inside the serviceable area.
    async fn lookup_address(&self, cep: &str) -> Result<ResolvedAddress, CheckoutServiceError>;

    /// Store settings used at checkout.
    fn policy(&self) -> &CheckoutPolicy;
}
