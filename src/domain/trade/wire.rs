//! Wire types for the `trades` endpoint.

use crate::shared::serde_util;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// `{ "<PAIR>": [ ... ] }`
pub type TradesResponse = HashMap<String, Vec<TradeResponse>>;

#[derive(Debug, Clone, Deserialize)]
pub struct TradeResponse {
    pub tid: TradeIdValue,
    #[serde(with = "serde_util::timestamp_secs")]
    pub timestamp: DateTime<Utc>,
    #[serde(with = "serde_util::decimal")]
    pub price: Decimal,
    #[serde(with = "serde_util::decimal")]
    pub amount: Decimal,
}

/// Trade ids arrive as numbers or strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TradeIdValue {
    Number(u64),
    Text(String),
}
