//! Pizzeria prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    address::{InvalidPostalCode, PostalCode, ResolvedAddress, ServiceableArea},
    cart::{Cart, CartLine, SelectionAdded},
    catalog::{Catalog, CatalogError, Product, ProductId, SizeLabel, SizePrices},
    checkout::{CheckoutError, CheckoutPolicy, ComposedOrder, ValidationError, compose, validate},
    customers::{Address, Customer, DeliveryType, PaymentMethod, format_phone, whatsapp_number},
    ledger::CustomerStat,
    money::{AmountError, Reais, format_reais},
    orders::{
        Order, OrderCustomer, OrderId, OrderItem, OrderStatus, StatusLocked, TransitionPolicy,
    },
    pricing::{PriceBreakdown, TotalPriceError},
    query::{DashboardStats, DateRange, OrderFilter},
};
