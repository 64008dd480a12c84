//! Wire types for the order endpoints.

use crate::shared::serde_util;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

// ─── trade ───────────────────────────────────────────────────────────────────

/// Every body shape a placement can come back with.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PlacementResponse {
    /// A bare order id.
    Bare(String),
    /// `{ result: { txid: [..] } }`, or `{ catched: true, id }` when the client
    /// library caught a timeout after the order was created.
    Object {
        #[serde(default)]
        catched: bool,
        #[serde(default)]
        id: Option<OrderIdValue>,
        #[serde(default)]
        result: Option<PlacementResult>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlacementResult {
    #[serde(default)]
    pub txid: Vec<OrderIdValue>,
}

/// Order ids arrive as numbers or strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OrderIdValue {
    Number(u64),
    Text(String),
}

// ─── order-info ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInfoResponse {
    pub order_info: HashMap<String, OrderInfoEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderInfoEntry {
    #[serde(deserialize_with = "serde_util::decimal::deserialize")]
    pub rate: Decimal,
    #[serde(deserialize_with = "serde_util::decimal::deserialize")]
    pub amount: Decimal,
    #[serde(deserialize_with = "serde_util::timestamp_secs::deserialize")]
    pub timestamp_created: DateTime<Utc>,
}

// ─── cancel-order ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct CancelResponse {
    pub data: CancelEntry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CancelEntry {
    #[serde(deserialize_with = "serde_util::decimal::deserialize")]
    pub vol: Decimal,
    #[serde(deserialize_with = "serde_util::decimal::deserialize")]
    pub vol_exec: Decimal,
    pub status: String,
}
