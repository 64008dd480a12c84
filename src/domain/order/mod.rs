//! Order domain — placement, lookup and cancellation.

pub mod client;
mod convert;
pub mod reconcile;
pub mod wire;

use crate::shared::{to_plain_string, OrderId, Side};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use reconcile::reconcile;

/// Fee percent reported for every order lookup.
pub const ORDER_FEE_PERCENT: Decimal = Decimal::from_parts(16, 0, 0, false, 2);

/// A limit order ready for submission. The price is already rounded to the
/// market's precision; the amount is sent as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub side: Side,
    pub amount: Decimal,
    pub price: Decimal,
}

impl OrderRequest {
    /// Wire value for `rate`.
    pub fn rate_param(&self) -> String {
        to_plain_string(&self.price)
    }

    /// Wire value for `amount`.
    pub fn amount_param(&self) -> String {
        to_plain_string(&self.amount)
    }
}

/// Result of a placement that did not fail outright.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "order_id", rename_all = "snake_case")]
pub enum OrderOutcome {
    /// The exchange acknowledged the order.
    Confirmed(OrderId),
    /// The acknowledgement was lost but an order id was recovered. The order
    /// may or may not rest on the book; check it before resubmitting.
    Uncertain(OrderId),
}

impl OrderOutcome {
    pub fn order_id(&self) -> &OrderId {
        match self {
            OrderOutcome::Confirmed(id) | OrderOutcome::Uncertain(id) => id,
        }
    }

    pub fn is_uncertain(&self) -> bool {
        matches!(self, OrderOutcome::Uncertain(_))
    }
}

/// Snapshot of a single order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderInfo {
    pub price: Decimal,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub fee_percent: Decimal,
}

/// State of an order after a cancel request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelResult {
    /// The whole volume had already been filled.
    pub executed: bool,
    pub open: bool,
    pub filled_amount: Decimal,
}
