//! Order status

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where an order is in its lifecycle.
///
/// The usual progression is `Pending → Paid → Preparing → Ready → Delivered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, waiting for payment confirmation
    Pending,
    /// Payment confirmed
    Paid,
    /// In the kitchen
    Preparing,
    /// Ready for pickup or dispatch
    Ready,
    /// Handed to the customer
    Delivered,
}

/// How strictly a status change is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Regular dashboard edits: a paid order is locked.
    #[default]
    Standard,

    /// Administrative correction: any status may be set.
    Override,
}

/// A status change that was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("order is {from} and cannot be moved to {to} without an override")]
pub struct StatusLocked {
    /// Current status
    pub from: OrderStatus,
    /// Requested status
    pub to: OrderStatus,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Paid,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
    ];

    /// Wire name (`pending`, `paid`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
        }
    }

    /// Dashboard label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pendente",
            OrderStatus::Paid => "Pago",
            OrderStatus::Preparing => "Preparando",
            OrderStatus::Ready => "Pronto",
            OrderStatus::Delivered => "Entregue",
        }
    }

    /// Parses a wire name, ignoring case.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();

        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(name))
    }

    /// Whether the order counts towards revenue.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, OrderStatus::Paid | OrderStatus::Delivered)
    }

    /// Checks a change to `next` under `policy`.
    ///
    /// Re-applying the current status is always allowed. Under
    /// [`TransitionPolicy::Standard`] a paid order cannot be changed.
    ///
    /// # Errors
    ///
    /// Returns [`StatusLocked`] when the change is refused.
    pub fn transition(
        self,
        next: OrderStatus,
        policy: TransitionPolicy,
    ) -> Result<OrderStatus, StatusLocked> {
        if self == next {
            return Ok(next);
        }

        match (self, policy) {
            (OrderStatus::Paid, TransitionPolicy::Standard) => Err(StatusLocked {
                from: self,
                to: next,
            }),
            _ => Ok(next),
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
