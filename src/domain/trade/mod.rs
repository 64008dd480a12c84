//! Trade domain — public trade history for the bound pair.

pub mod client;
mod convert;
pub mod wire;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A public trade execution record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trade {
    pub id: String,
    pub occurred_at: DateTime<Utc>,
    pub price: Decimal,
    pub amount: Decimal,
}

/// Order trades by time, oldest first, or newest first when `descending`.
///
/// Trades sharing a timestamp keep their upstream order.
pub fn order_trades(mut trades: Vec<Trade>, descending: bool) -> Vec<Trade> {
    if descending {
        trades.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    } else {
        trades.sort_by_key(|t| t.occurred_at);
    }
    trades
}
