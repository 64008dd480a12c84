//! Wire types for the `ticker` endpoint.

use crate::shared::serde_util;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// `[ { "<pair lower-case>": { ... } } ]`
pub type TickerResponse = Vec<HashMap<String, TickerEntry>>;

#[derive(Debug, Clone, Deserialize)]
pub struct TickerEntry {
    #[serde(deserialize_with = "serde_util::decimal::deserialize")]
    pub highest_bid: Decimal,
    #[serde(deserialize_with = "serde_util::decimal::deserialize")]
    pub lowest_ask: Decimal,
}
